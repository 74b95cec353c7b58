//! Post creation
//!
//! [`CreateForm`] holds what the user has entered; [`submit`] runs the
//! ordered workflow: create the post, upload its image, then optionally start
//! and watch an effect job. Each step starts only after the previous one
//! settled.

use postboard_client::{ApiClient, ClassifiedError};
use postboard_core::domain::effect::Effect;
use postboard_core::domain::post::Post;
use postboard_core::domain::route::Route;
use postboard_core::dto::image::ImageFile;
use postboard_core::dto::post::CreatePost;
use tracing::{info, warn};

use crate::poller::{JobPoller, PollReport};
use crate::router::Navigator;
use crate::status::StatusSink;
use crate::view::{CreateFormView, StatusLine};

/// State of the create form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub body: String,
    image: Option<ImageFile>,
    effect: Effect,
}

impl CreateForm {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn attach_image(&mut self, image: ImageFile) {
        self.image = Some(image);
    }

    /// Detach the image; the effect choice goes back to `None`
    pub fn clear_image(&mut self) {
        self.image = None;
        self.effect = Effect::None;
    }

    /// Choose an effect; only possible while an image is attached
    pub fn select_effect(&mut self, effect: Effect) -> bool {
        if self.image.is_none() {
            return false;
        }
        self.effect = effect;
        true
    }

    pub fn effects_visible(&self) -> bool {
        self.image.is_some()
    }

    /// Describe the form for rendering
    pub fn view(&self, status: Option<StatusLine>) -> CreateFormView {
        CreateFormView {
            title: self.title.clone(),
            body: self.body.clone(),
            image_name: self.image.as_ref().map(|img| img.file_name.clone()),
            effect: self.effect,
            effects_visible: self.effects_visible(),
            status,
        }
    }
}

/// Where a submission stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The post could not be created; nothing else was attempted
    PostFailed(ClassifiedError),
    /// Navigated to the new post right away
    ///
    /// `image_error` is set when the upload failed; the post still exists.
    Navigated {
        post: Post,
        image_error: Option<ClassifiedError>,
    },
    /// The effect job could not be started; no navigation happened
    JobStartFailed { post: Post, error: ClassifiedError },
    /// The effect job was watched to a terminal state
    ///
    /// Navigation happened only if the job succeeded.
    JobFinished { post: Post, report: PollReport },
}

/// Run the create workflow for a filled-in form
pub async fn submit(
    client: &ApiClient,
    form: &CreateForm,
    navigator: &dyn Navigator,
    poller: &JobPoller,
    status: &dyn StatusSink,
) -> CreateOutcome {
    status.clear();

    let request = CreatePost {
        title: form.title.clone(),
        body: form.body.clone(),
    };
    let post = match client.create_post(&request).await {
        Ok(post) => post,
        Err(e) => {
            warn!("Create post failed: {}", e);
            status.show(StatusLine::Error(format!("Create post failed: {}", e)));
            return CreateOutcome::PostFailed(e);
        }
    };
    info!("Created post {}", post.id);
    let detail = Route::detail(&post.id);

    let Some(image) = form.image() else {
        navigator.navigate(&detail);
        return CreateOutcome::Navigated {
            post,
            image_error: None,
        };
    };

    if let Err(e) = client.upload_image(&post.id, image).await {
        warn!("Image upload failed for post {}: {}", post.id, e);
        status.show(StatusLine::Error(format!("Image upload failed: {}", e)));
        navigator.navigate(&detail);
        return CreateOutcome::Navigated {
            post,
            image_error: Some(e),
        };
    }
    info!("Uploaded image {} for post {}", image.file_name, post.id);

    let effect = form.effect();
    if !effect.requires_job() {
        navigator.navigate(&detail);
        return CreateOutcome::Navigated {
            post,
            image_error: None,
        };
    }

    status.show(StatusLine::Progress(format!(
        "Starting image job ({})…",
        effect
    )));
    let job_name = match client.create_effect_job(&post.id, effect).await {
        Ok(created) => created.job_name,
        Err(e) => {
            warn!("Failed to start {} job for post {}: {}", effect, post.id, e);
            status.show(StatusLine::Error(format!("Failed to start job: {}", e)));
            return CreateOutcome::JobStartFailed { post, error: e };
        }
    };
    info!("Started {} job {} for post {}", effect, job_name, post.id);

    let report = poller
        .run(&job_name, status, || navigator.navigate(&detail))
        .await;
    CreateOutcome::JobFinished { post, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::InstantClock;
    use crate::poller::PollState;
    use crate::router::RecordingNavigator;
    use crate::status::RecordingStatus;
    use postboard_client::HttpResponse;
    use postboard_client::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    struct Fixture {
        transport: Arc<ScriptedTransport>,
        client: ApiClient,
        poller: JobPoller,
        navigator: RecordingNavigator,
        status: RecordingStatus,
    }

    fn fixture() -> Fixture {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::with_transport("http://api", transport.clone());
        let poller = JobPoller::new(
            client.clone(),
            Arc::new(InstantClock::default()),
            Duration::from_millis(1000),
        );
        Fixture {
            transport,
            client,
            poller,
            navigator: RecordingNavigator::default(),
            status: RecordingStatus::default(),
        }
    }

    impl Fixture {
        async fn submit(&self, form: &CreateForm) -> CreateOutcome {
            submit(&self.client, form, &self.navigator, &self.poller, &self.status).await
        }

        fn push_created_post(&self) {
            self.transport.push_json(
                201,
                json!({"id": "p1", "title": "Hello", "body": "World", "created_at": 1}),
            );
        }

        fn uploads(&self) -> usize {
            self.transport.count_matching("/api/images/")
        }

        fn job_creations(&self) -> usize {
            self.transport
                .requests()
                .iter()
                .filter(|r| r.url.ends_with("/api/jobs/effect"))
                .count()
        }
    }

    fn image() -> ImageFile {
        ImageFile {
            file_name: "cat.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    fn form_with_image(effect: Effect) -> CreateForm {
        let mut form = CreateForm::new("Hello", "World");
        form.attach_image(image());
        assert!(form.select_effect(effect));
        form
    }

    #[test]
    fn test_effect_requires_image() {
        let mut form = CreateForm::new("t", "b");
        assert!(!form.effects_visible());
        assert!(!form.select_effect(Effect::Invert));
        assert_eq!(form.effect(), Effect::None);

        form.attach_image(image());
        assert!(form.effects_visible());
        assert!(form.select_effect(Effect::Invert));
        assert_eq!(form.view(None).effect, Effect::Invert);

        form.clear_image();
        assert!(!form.effects_visible());
        assert_eq!(form.effect(), Effect::None);
        assert_eq!(form.view(None).image_name, None);
    }

    #[tokio::test]
    async fn test_post_failure_stops_everything() {
        let f = fixture();
        f.transport.push(HttpResponse::text(
            500,
            "Internal Server Error",
            Some("text/plain"),
            "db down",
        ));

        let outcome = f.submit(&form_with_image(Effect::Grayscale)).await;

        assert!(matches!(outcome, CreateOutcome::PostFailed(_)));
        assert_eq!(f.transport.request_count(), 1);
        assert_eq!(f.uploads(), 0);
        assert_eq!(f.job_creations(), 0);
        assert!(f.navigator.routes().is_empty());
        assert_eq!(
            f.status.last(),
            Some(StatusLine::Error(
                "Create post failed: HTTP 500 Internal Server Error: db down".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_no_image_navigates_immediately() {
        let f = fixture();
        f.push_created_post();

        let outcome = f.submit(&CreateForm::new("Hello", "World")).await;

        assert!(matches!(
            outcome,
            CreateOutcome::Navigated {
                image_error: None,
                ..
            }
        ));
        assert_eq!(f.transport.request_count(), 1);
        assert_eq!(f.navigator.routes(), vec![Route::detail("p1")]);
    }

    #[tokio::test]
    async fn test_upload_failure_still_navigates_once() {
        let f = fixture();
        f.push_created_post();
        f.transport.push_network_failure("connection reset");

        let outcome = f.submit(&form_with_image(Effect::Invert)).await;

        match outcome {
            CreateOutcome::Navigated { post, image_error } => {
                assert_eq!(post.id, "p1");
                assert!(image_error.is_some());
            }
            other => panic!("expected navigation, got {:?}", other),
        }
        assert_eq!(f.navigator.routes(), vec![Route::detail("p1")]);
        assert_eq!(f.job_creations(), 0);
        assert_eq!(
            f.status.last(),
            Some(StatusLine::Error("Image upload failed: Network error".to_string()))
        );
    }

    #[tokio::test]
    async fn test_effect_none_skips_job() {
        let f = fixture();
        f.push_created_post();
        f.transport
            .push(HttpResponse::text(200, "OK", Some("text/plain"), "stored"));

        let outcome = f.submit(&form_with_image(Effect::None)).await;

        assert!(matches!(outcome, CreateOutcome::Navigated { image_error: None, .. }));
        assert_eq!(f.uploads(), 1);
        assert_eq!(f.job_creations(), 0);
        assert_eq!(f.navigator.routes(), vec![Route::detail("p1")]);
    }

    #[tokio::test]
    async fn test_job_start_failure_does_not_navigate() {
        let f = fixture();
        f.push_created_post();
        f.transport
            .push(HttpResponse::text(200, "OK", Some("text/plain"), "stored"));
        f.transport.push(HttpResponse::text(
            503,
            "Service Unavailable",
            Some("text/plain"),
            "kubernetes not available in this environment",
        ));

        let outcome = f.submit(&form_with_image(Effect::Grayscale)).await;

        assert!(matches!(outcome, CreateOutcome::JobStartFailed { .. }));
        assert!(f.navigator.routes().is_empty());
        assert_eq!(
            f.status.last(),
            Some(StatusLine::Error(
                "Failed to start job: HTTP 503 Service Unavailable: kubernetes not available in this environment"
                    .to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_job_success_navigates_via_poller() {
        let f = fixture();
        f.push_created_post();
        f.transport
            .push(HttpResponse::text(200, "OK", Some("text/plain"), "stored"));
        f.transport.push_json(202, json!({"job_name": "effect-p1"}));
        f.transport.push_json(200, json!({"status": "running"}));
        f.transport.push_json(200, json!({"status": "succeeded"}));

        let outcome = f.submit(&form_with_image(Effect::Grayscale)).await;

        match outcome {
            CreateOutcome::JobFinished { report, .. } => {
                assert_eq!(report.state, PollState::Succeeded);
                assert_eq!(report.polls, 2);
            }
            other => panic!("expected job outcome, got {:?}", other),
        }
        assert_eq!(f.navigator.routes(), vec![Route::detail("p1")]);
        assert_eq!(f.transport.count_matching("/api/jobs/effect-p1/status"), 2);

        let lines = f.status.lines();
        assert_eq!(lines[0], None);
        assert_eq!(
            lines[1],
            Some(StatusLine::Progress("Starting image job (grayscale)…".to_string()))
        );
    }

    #[tokio::test]
    async fn test_job_failure_does_not_navigate() {
        let f = fixture();
        f.push_created_post();
        f.transport
            .push(HttpResponse::text(200, "OK", Some("text/plain"), "stored"));
        f.transport.push_json(202, json!({"job_name": "effect-p1"}));
        f.transport
            .push_json(200, json!({"status": "failed", "reason": "OOMKilled"}));

        let outcome = f.submit(&form_with_image(Effect::Invert)).await;

        assert!(matches!(
            outcome,
            CreateOutcome::JobFinished { report, .. } if report.state == PollState::Failed
        ));
        assert!(f.navigator.routes().is_empty());
    }
}
