//! HTTP transport
//!
//! [`HttpTransport`] is the single seam where bytes leave the process: one
//! call, one round trip, no retries. Everything above it works on the
//! classified result produced by [`classify`] and [`classify_status`].

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::{ClassifiedError, Result};

/// HTTP method used by the posts API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A file sent as a single multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(FilePart),
}

/// A fully described request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: RequestBody::Json(body),
        }
    }

    pub fn post_file(url: impl Into<String>, part: FilePart) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: RequestBody::Multipart(part),
        }
    }
}

/// A received response
///
/// `body` is an error when the response arrived but its body could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: std::result::Result<String, String>,
}

impl HttpResponse {
    /// A response with a JSON body
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            status_text: String::new(),
            content_type: Some("application/json".to_string()),
            body: Ok(value.to_string()),
        }
    }

    /// A response with an arbitrary body and content type
    pub fn text(
        status: u16,
        status_text: impl Into<String>,
        content_type: Option<&str>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            content_type: content_type.map(str::to_string),
            body: Ok(body.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn declares_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// One network round trip
///
/// Implementations return `Err` only when no response was received at all;
/// the message is a best-effort description of the cause.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, String>;
}

/// [`HttpTransport`] backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, String> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let mut part = Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = file.content_type {
                    part = part.mime_str(&content_type).map_err(|e| e.to_string())?;
                }
                builder.multipart(Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| e.to_string());

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body,
        })
    }
}

/// Classify a response whose body must be JSON
pub fn classify(response: HttpResponse) -> Result<Value> {
    classify_status(&response)?;

    if !response.declares_json() {
        return Err(ClassifiedError::invalid_content_type(
            response.body_or_empty(),
        ));
    }

    let body = response.body.map_err(ClassifiedError::network)?;
    serde_json::from_str(&body).map_err(|e| ClassifiedError::network(e.to_string()))
}

/// Classify a response by status alone, ignoring its body on success
pub fn classify_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ClassifiedError::http(
            response.status,
            response.status_text.clone(),
            response.body_or_empty(),
        ))
    }
}
