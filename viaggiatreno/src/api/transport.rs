//! HTTP transport for the ViaggiaTreno service.
//!
//! A [`Transport`] performs exactly one request and hands back the raw
//! body. Decoding lives in the client so the transport stays swappable
//! (see [`MockTransport`](super::MockTransport)).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use super::error::TransportError;

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Payload of a POST request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// JSON document.
    Json(serde_json::Value),
}

/// A single request to the upstream service.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Ask for `application/json`. Text endpoints leave this off.
    pub accept_json: bool,
    pub body: Option<RequestBody>,
}

impl Request {
    pub fn get(url: impl Into<String>, accept_json: bool) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            accept_json,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: RequestBody, accept_json: bool) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            accept_json,
            body: Some(body),
        }
    }
}

/// Performs one request/response round trip.
///
/// Implementations must return `Err` for any non-2xx status so callers
/// only ever see successful bodies in `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<String, TransportError>;
}

/// reqwest-backed transport.
///
/// Every request carries the configured `User-Agent`; the upstream turns
/// away clients it does not recognize as a browser. Idle connections are
/// not kept, so each request opens its own connection.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(user_agent).map_err(|_| TransportError::Client {
            message: "invalid user agent".to_string(),
        })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<String, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };

        if request.accept_json {
            builder = builder.header(ACCEPT, "application/json");
        }

        builder = match &request.body {
            Some(RequestBody::Form(fields)) => builder.form(fields),
            Some(RequestBody::Json(payload)) => builder.json(payload),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
