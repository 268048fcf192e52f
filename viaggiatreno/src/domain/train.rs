//! Train references returned by the train search endpoint.

use std::fmt;

use serde::Serialize;

/// A train number together with the station it departs from.
///
/// The upstream service identifies a running train by the pair
/// (origin station code, train number), so this is the value to feed
/// into the status and stop-list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TrainRef {
    #[serde(rename = "train")]
    pub train_number: String,
    #[serde(rename = "station")]
    pub origin_station: String,
    #[serde(rename = "station_code")]
    pub origin_station_code: String,
}

impl fmt::Display for TrainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} ({})",
            self.train_number, self.origin_station, self.origin_station_code
        )
    }
}
