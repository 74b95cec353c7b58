//! Fragment router
//!
//! Owns the current location fragment and notifies subscribers whenever it
//! changes. Subscribers are never called for the initial fragment; startup
//! code reads [`Router::current_route`] and dispatches it explicitly.

use postboard_core::domain::route::Route;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Something that can move the user to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Handle returned by [`Router::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&Route) + Send + Sync>;

struct RouterState {
    fragment: String,
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

/// Location-fragment router
pub struct Router {
    state: Mutex<RouterState>,
}

impl Router {
    /// Create a router positioned at `fragment`
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(RouterState {
                fragment: fragment.into(),
                next_id: 0,
                handlers: Vec::new(),
            }),
        }
    }

    /// The current raw fragment
    pub fn fragment(&self) -> String {
        self.lock().fragment.clone()
    }

    /// The route for the current fragment
    pub fn current_route(&self) -> Route {
        Route::parse(&self.lock().fragment)
    }

    /// Register a handler called with the new route after every change
    pub fn subscribe(&self, handler: impl Fn(&Route) + Send + Sync + 'static) -> SubscriptionId {
        let mut state = self.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.handlers.len();
        state.handlers.retain(|(sid, _)| *sid != id);
        state.handlers.len() != before
    }

    /// Replace the fragment, notifying subscribers if it actually changed
    pub fn set_fragment(&self, fragment: &str) {
        let handlers: Vec<Handler> = {
            let mut state = self.lock();
            if state.fragment == fragment {
                debug!("Fragment unchanged: {}", fragment);
                return;
            }
            state.fragment = fragment.to_string();
            state.handlers.iter().map(|(_, h)| Arc::clone(h)).collect()
        };

        let route = Route::parse(fragment);
        info!("Navigated to {} ({:?})", fragment, route);

        // Handlers run outside the lock so they may navigate again.
        for handler in handlers {
            handler(&route);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Navigator for Router {
    fn navigate(&self, route: &Route) {
        self.set_fragment(&route.fragment());
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingNavigator;
