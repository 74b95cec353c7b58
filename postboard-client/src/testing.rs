//! Scripted transport for tests
//!
//! Responses are consumed in the order they were pushed; every request is
//! recorded so tests can assert on what was sent and how often. A held
//! response keeps its request in flight until the test releases it.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug)]
struct Scripted {
    response: Result<HttpResponse, String>,
    hold: Option<Arc<Notify>>,
}

impl Scripted {
    fn ready(response: Result<HttpResponse, String>) -> Self {
        Self {
            response,
            hold: None,
        }
    }
}

/// [`HttpTransport`] replaying a queue of canned responses
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push(&self, response: HttpResponse) {
        self.lock_responses().push_back(Scripted::ready(Ok(response)));
    }

    /// Queue a JSON response that is only delivered once the returned
    /// [`Notify`] is signalled
    pub fn push_held_json(&self, status: u16, value: Value) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        self.lock_responses().push_back(Scripted {
            response: Ok(HttpResponse::json(status, &value)),
            hold: Some(Arc::clone(&release)),
        });
        release
    }

    /// Queue a JSON response
    pub fn push_json(&self, status: u16, value: Value) {
        self.push(HttpResponse::json(status, &value));
    }

    /// Queue a failed round trip
    pub fn push_network_failure(&self, message: &str) {
        self.lock_responses()
            .push_back(Scripted::ready(Err(message.to_string())));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of requests whose URL contains `fragment`
    pub fn count_matching(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Scripted>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        let next = self.lock_responses().pop_front();
        let Some(scripted) = next else {
            return Err(format!("no scripted response for {}", url));
        };
        if let Some(release) = scripted.hold {
            release.notified().await;
        }
        scripted.response
    }
}
