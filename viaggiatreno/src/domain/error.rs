//! Caller-side argument errors.

/// Error returned when a caller passes an argument the facade cannot use.
///
/// This is the only failure surfaced as an `Err` by the endpoint methods;
/// upstream and network problems are reported as absent results instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument: {reason}")]
pub struct InvalidArgument {
    reason: String,
}

impl InvalidArgument {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable description of what was wrong.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
