//! Postboard HTTP Client
//!
//! A typed client for the posts API. All requests go through one
//! [`HttpTransport`] and every failure is reported as a [`ClassifiedError`].
//!
//! # Example
//!
//! ```no_run
//! use postboard_client::ApiClient;
//! use postboard_core::dto::post::CreatePost;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new("http://localhost:8045");
//!
//!     match client.create_post(&CreatePost {
//!         title: "hello".to_string(),
//!         body: "first post".to_string(),
//!     }).await {
//!         Ok(post) => println!("Created post: {}", post.id),
//!         Err(e) => eprintln!("Create post failed: {}", e),
//!     }
//! }
//! ```

pub mod error;
mod images;
mod jobs;
mod posts;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod transport;

// Re-export commonly used types
pub use error::{ClassifiedError, Result};
pub use transport::{
    FilePart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, ReqwestTransport,
};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the posts API
///
/// Endpoint methods are grouped by resource:
/// - Posts (list, get, create)
/// - Images (URL, upload)
/// - Effect jobs (create, status)
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL the `/api/...` paths are appended to (e.g., "http://localhost:8045")
    base_url: String,
    /// Transport performing the round trips
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client using a default `reqwest` transport
    ///
    /// # Example
    /// ```
    /// use postboard_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8045");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::default()))
    }

    /// Create a new client with a configured `reqwest` client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new(client)))
    }

    /// Create a new client over an arbitrary transport
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    // =============================================================================
    // Request Handling
    // =============================================================================

    /// Perform a request whose successful response must be JSON
    ///
    /// Exactly one round trip is made. Any failure, including a body that is
    /// not valid JSON, comes back as a [`ClassifiedError`].
    pub async fn request(&self, request: HttpRequest) -> Result<Value> {
        let method = request.method;
        let url = request.url.clone();
        debug!("{} {}", method.as_str(), url);

        let result = match self.transport.send(request).await {
            Ok(response) => transport::classify(response),
            Err(message) => Err(ClassifiedError::network(message)),
        };

        if let Err(e) = &result {
            warn!("{} {} failed: {} ({})", method.as_str(), url, e, e.detail());
        }
        result
    }

    /// Perform a request where only the status matters
    pub async fn request_ok(&self, request: HttpRequest) -> Result<()> {
        let method = request.method;
        let url = request.url.clone();
        debug!("{} {}", method.as_str(), url);

        let result = match self.transport.send(request).await {
            Ok(response) => transport::classify_status(&response),
            Err(message) => Err(ClassifiedError::network(message)),
        };

        if let Err(e) = &result {
            warn!("{} {} failed: {} ({})", method.as_str(), url, e, e.detail());
        }
        result
    }

    /// Perform a JSON request and decode the result
    async fn request_as<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let value = self.request(request).await?;
        decode(value)
    }
}

/// Decode a JSON value into a typed response
///
/// A shape mismatch is reported like any other unreadable body.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ClassifiedError::network(format!("Failed to decode response: {}", e)))
}
