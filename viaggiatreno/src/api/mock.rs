//! In-memory transport for testing without network access.
//!
//! Serves canned bodies keyed by a URL fragment and records every request
//! it sees, so tests can check both what was asked and what came back.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::error::TransportError;
use super::transport::{Request, Transport};

/// Canned reply for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// 200 with the given body.
    Body(String),
    /// Non-2xx status with an empty body.
    Status(u16),
}

/// Mock transport that serves registered responses.
///
/// Routes are matched by substring against the full URL, first registered
/// wins. Unmatched requests get a 404. Clones share the request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Vec<(String, MockResponse)>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `fragment` with `body`.
    pub fn with_body(mut self, fragment: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes
            .push((fragment.into(), MockResponse::Body(body.into())));
        self
    }

    /// Answer requests whose URL contains `fragment` with `status`.
    pub fn with_status(mut self, fragment: impl Into<String>, status: u16) -> Self {
        self.routes
            .push((fragment.into(), MockResponse::Status(status)));
        self
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.log().clone()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.requests.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<String, TransportError> {
        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(MockResponse::Status(404));

        self.log().push(request);

        match response {
            MockResponse::Body(body) => Ok(body),
            MockResponse::Status(status) => Err(TransportError::Status {
                status,
                body: String::new(),
            }),
        }
    }
}
