//! Effect job endpoints

use postboard_core::domain::effect::Effect;
use postboard_core::dto::job::{CreateEffectJob, EffectJobCreated, JobStatusReport};
use postboard_core::encoding::encode_component;

use crate::ApiClient;
use crate::error::{ClassifiedError, Result};
use crate::transport::HttpRequest;

impl ApiClient {
    // =============================================================================
    // Effect Jobs
    // =============================================================================

    /// Start a background job applying `effect` to a post's image
    ///
    /// # Returns
    /// The name of the created job, used to poll its status
    pub async fn create_effect_job(&self, post_id: &str, effect: Effect) -> Result<EffectJobCreated> {
        let req = CreateEffectJob {
            post_id: post_id.to_string(),
            effect,
        };
        let body = serde_json::to_value(&req).map_err(|e| ClassifiedError::network(e.to_string()))?;
        self.request_as(HttpRequest::post_json(self.url("/jobs/effect"), body))
            .await
    }

    /// Get the current status of a job
    pub async fn job_status(&self, job_name: &str) -> Result<JobStatusReport> {
        let url = self.url(&format!("/jobs/{}/status", encode_component(job_name)));
        self.request_as(HttpRequest::get(url)).await
    }
}
