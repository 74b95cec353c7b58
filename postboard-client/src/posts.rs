//! Post endpoints

use postboard_core::domain::post::Post;
use postboard_core::dto::post::CreatePost;
use postboard_core::encoding::encode_component;
use serde_json::Value;

use crate::error::{ClassifiedError, Result};
use crate::transport::HttpRequest;
use crate::{ApiClient, decode};

impl ApiClient {
    // =============================================================================
    // Posts
    // =============================================================================

    /// List all posts, in server order
    ///
    /// A successful response that is not a JSON array yields an empty list.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let value = self.request(HttpRequest::get(self.url("/posts"))).await?;

        match value {
            Value::Array(items) => items.into_iter().map(decode).collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// Get a single post by id
    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let url = self.url(&format!("/posts/{}", encode_component(id)));
        self.request_as(HttpRequest::get(url)).await
    }

    /// Create a new post
    ///
    /// # Returns
    /// The created post, including its server-assigned id
    pub async fn create_post(&self, req: &CreatePost) -> Result<Post> {
        let body = serde_json::to_value(req).map_err(|e| ClassifiedError::network(e.to_string()))?;
        self.request_as(HttpRequest::post_json(self.url("/posts"), body))
            .await
    }
}
