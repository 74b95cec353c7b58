//! Application driver
//!
//! Connects the router to the view actions and owns the single shared
//! output, the [`Surface`]. Every dispatch takes a new generation number;
//! results from an older dispatch are dropped instead of overwriting a newer
//! view, and any job poller started from the create form is cancelled.

use postboard_client::ApiClient;
use postboard_core::domain::route::Route;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::controller;
use crate::create::{self, CreateForm, CreateOutcome};
use crate::poller::{CancelHandle, JobPoller};
use crate::router::{Router, SubscriptionId};
use crate::status::StatusSink;
use crate::surface::Surface;
use crate::view::{StatusLine, View};

/// Identifies one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Default)]
struct Screen {
    view: Option<View>,
    form: CreateForm,
    status: Option<StatusLine>,
    poll: Option<CancelHandle>,
}

struct AppInner {
    config: AppConfig,
    client: ApiClient,
    router: Arc<Router>,
    surface: Arc<dyn Surface>,
    clock: Arc<dyn Clock>,
    generation: AtomicU64,
    screen: Mutex<Screen>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

/// The client application
#[derive(Clone)]
pub struct App {
    inner: Arc<AppInner>,
}

impl App {
    pub fn new(
        config: AppConfig,
        client: ApiClient,
        router: Arc<Router>,
        surface: Arc<dyn Surface>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(AppInner {
                config,
                client,
                router,
                surface,
                clock,
                generation: AtomicU64::new(0),
                screen: Mutex::new(Screen::default()),
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.inner.router
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Subscribe to navigation and render the initial route
    ///
    /// The router does not report the fragment it started with, so the
    /// first dispatch happens here.
    pub async fn start(&self) -> SubscriptionId {
        let weak: Weak<AppInner> = Arc::downgrade(&self.inner);
        let id = self.inner.router.subscribe(move |route| {
            if let Some(inner) = weak.upgrade() {
                App { inner }.spawn_dispatch(route.clone());
            }
        });

        let route = self.inner.router.current_route();
        info!("Starting at {}", route);
        self.dispatch(route).await;
        id
    }

    /// Wait until every dispatch triggered by navigation has finished
    pub async fn settle(&self) {
        loop {
            let handles: Vec<_> = std::mem::take(&mut *self.lock_pending());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!("Dispatch task failed: {}", e);
                }
            }
        }
    }

    fn spawn_dispatch(&self, route: Route) {
        let app = self.clone();
        let handle = tokio::spawn(async move { app.dispatch(route).await });
        self.lock_pending().push(handle);
    }

    /// Render a route
    ///
    /// Safe to call repeatedly for the same route; each call simply renders
    /// again.
    pub async fn dispatch(&self, route: Route) {
        let generation = self.begin_render();
        debug!("Dispatching {} as {:?}", route, generation);

        match route {
            Route::List => {
                self.render(generation, View::loading(controller::LIST_LOADING));
                let view = controller::list_view(&self.inner.client).await;
                self.render(generation, view);
            }
            Route::Detail(id) => {
                self.render(generation, View::loading(controller::DETAIL_LOADING));
                let view = controller::detail_view(&self.inner.client, &id).await;
                self.render(generation, view);
            }
            Route::New => {
                let view = {
                    let mut screen = self.lock_screen();
                    screen.form = CreateForm::default();
                    screen.status = None;
                    View::Create(screen.form.view(None))
                };
                self.render(generation, view);
            }
        }
    }

    /// Start a new generation, invalidating all earlier ones
    pub fn begin_render(&self) -> Generation {
        let generation = Generation(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1);
        if let Some(poll) = self.lock_screen().poll.take() {
            poll.cancel();
        }
        generation
    }

    /// The generation currently allowed to draw
    pub fn generation(&self) -> Generation {
        Generation(self.inner.generation.load(Ordering::SeqCst))
    }

    /// Show `view` if `generation` is still current
    pub fn render(&self, generation: Generation, view: View) -> bool {
        let mut screen = self.lock_screen();
        if generation != self.generation() {
            debug!("Discarding stale view from {:?}", generation);
            return false;
        }
        self.inner.surface.show(&view);
        screen.view = Some(view);
        true
    }

    /// The view currently on the surface
    pub fn current_view(&self) -> Option<View> {
        self.lock_screen().view.clone()
    }

    /// The detail image could not be loaded: drop it without reporting
    pub fn image_failed(&self) {
        let mut screen = self.lock_screen();
        if let Some(view) = screen.view.as_ref().and_then(View::without_image) {
            debug!("Removing image that failed to load");
            self.inner.surface.show(&view);
            screen.view = Some(view);
        }
    }

    /// Change the create form and redraw it if it is showing
    pub fn edit_form<R>(&self, edit: impl FnOnce(&mut CreateForm) -> R) -> R {
        let mut screen = self.lock_screen();
        let result = edit(&mut screen.form);
        if matches!(screen.view, Some(View::Create(_))) {
            let view = View::Create(screen.form.view(screen.status.clone()));
            self.inner.surface.show(&view);
            screen.view = Some(view);
        }
        result
    }

    /// Submit the create form
    pub async fn submit(&self) -> CreateOutcome {
        let generation = self.generation();
        let poller = JobPoller::new(
            self.inner.client.clone(),
            Arc::clone(&self.inner.clock),
            self.inner.config.poll_interval,
        );

        let form = {
            let mut screen = self.lock_screen();
            if let Some(previous) = screen.poll.replace(poller.cancel_handle()) {
                debug!("Cancelling poller of the previous submission");
                previous.cancel();
            }
            screen.form.clone()
        };

        let status = FormStatus {
            app: self,
            generation,
        };
        create::submit(
            &self.inner.client,
            &form,
            self.inner.router.as_ref(),
            &poller,
            &status,
        )
        .await
    }

    fn set_status(&self, generation: Generation, status: Option<StatusLine>) {
        let mut screen = self.lock_screen();
        if generation != self.generation() {
            return;
        }
        screen.status = status;
        if matches!(screen.view, Some(View::Create(_))) {
            let view = View::Create(screen.form.view(screen.status.clone()));
            self.inner.surface.show(&view);
            screen.view = Some(view);
        }
    }

    fn lock_screen(&self) -> MutexGuard<'_, Screen> {
        self.inner.screen.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Routes workflow status into the create view of one generation
struct FormStatus<'a> {
    app: &'a App,
    generation: Generation,
}

impl StatusSink for FormStatus<'_> {
    fn show(&self, status: StatusLine) {
        self.app.set_status(self.generation, Some(status));
    }

    fn clear(&self) {
        self.app.set_status(self.generation, None);
    }
}
