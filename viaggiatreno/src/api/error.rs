//! Transport error types.

/// Errors from a single round trip to the upstream service.
///
/// The endpoint methods absorb these into an absent result; they are
/// exposed for callers that use the low-level helpers directly.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, DNS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The HTTP client could not be set up
    #[error("client setup error: {message}")]
    Client { message: String },
}

impl TransportError {
    /// Build a decode error, keeping a bounded excerpt of the body.
    pub(crate) fn json(err: &serde_json::Error, body: &str) -> Self {
        TransportError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransportError::Status {
            status: 503,
            body: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = TransportError::Client {
            message: "invalid user agent".into(),
        };
        assert_eq!(err.to_string(), "client setup error: invalid user agent");
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        match TransportError::json(&parse_err, &body) {
            TransportError::Json { message, body } => {
                assert!(!message.is_empty());
                assert_eq!(body.unwrap().len(), 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
