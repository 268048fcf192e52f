//! Station references returned by the search endpoints.

use std::fmt;

use serde::Serialize;

/// A station as reported by the upstream autocomplete service.
///
/// The code (e.g. `S01700`) is what the status, stop and board endpoints
/// expect. No validation is applied beyond what the upstream returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StationRef {
    #[serde(rename = "station")]
    pub name: String,
    #[serde(rename = "station_code")]
    pub code: String,
}

impl StationRef {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for StationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
