//! ViaggiaTreno API client.
//!
//! One async method per upstream endpoint. Each builds its path, performs
//! a single request and decodes the body. Network failures, non-2xx
//! statuses and undecodable bodies are logged and reported as `None`;
//! only a bad time argument comes back as an `Err`, before any request
//! is made.

use chrono::{FixedOffset, Utc};
use serde_json::Value;

use crate::domain::{
    InvalidArgument, StationRef, TimeArg, TrainRef, TrainType, join_train_types,
    select_train_types,
};

use super::error::TransportError;
use super::parse::{parse_station_autocomplete, parse_train_search};
use super::transport::{HttpTransport, Request, RequestBody, Transport};
use super::url::{DEFAULT_BASE_URL, build_url, encode_segment, encode_segment_raw};

/// Browser identity sent with every request. The upstream rejects
/// requests carrying a default HTTP client agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.3; WOW64; rv:56.0) Gecko/20100101 Firefox/56.0";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the ViaggiaTreno client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API (defaults to the public service)
    pub base_url: String,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Offset for date-times given without one; `None` uses the local zone
    pub utc_offset: Option<FixedOffset>,
}

impl ClientConfig {
    /// Create a config pointing at the public service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            utc_offset: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Resolve offset-free date-times at this offset instead of local time.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// ViaggiaTreno API client.
///
/// Holds no state between calls beyond its configuration, so a shared
/// reference can be used from many tasks at once.
#[derive(Debug, Clone)]
pub struct ViaggiaTrenoClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    utc_offset: Option<FixedOffset>,
}

impl ViaggiaTrenoClient<HttpTransport> {
    /// Create a client that talks HTTP to `config.base_url`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.user_agent, config.timeout_secs)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ViaggiaTrenoClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            transport,
            base_url: config.base_url,
            utc_offset: config.utc_offset,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full URL for an endpoint path. The path is not encoded here.
    pub fn url(&self, path: &str) -> String {
        build_url(&self.base_url, path)
    }

    // ==================== Transport helpers ====================

    /// GET a text body.
    pub async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.send(Request::get(url, false)).await
    }

    /// GET a JSON body with `Accept: application/json`.
    pub async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let body = self.send(Request::get(url, true)).await?;
        serde_json::from_str(&body).map_err(|e| TransportError::json(&e, &body))
    }

    /// POST form fields and return the text body.
    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, TransportError> {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.send(Request::post(url, RequestBody::Form(fields), false))
            .await
    }

    /// POST a JSON payload and decode the JSON answer.
    pub async fn post_json(&self, url: &str, payload: &Value) -> Result<Value, TransportError> {
        let request = Request::post(url, RequestBody::Json(payload.clone()), true);
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| TransportError::json(&e, &body))
    }

    async fn send(&self, request: Request) -> Result<String, TransportError> {
        tracing::debug!(method = ?request.method, url = %request.url, "viaggiatreno request");
        self.transport.send(request).await
    }

    async fn fetch_text(&self, endpoint: &'static str, path: &str) -> Option<String> {
        match self.get_text(&self.url(path)).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "request failed");
                None
            }
        }
    }

    async fn fetch_json(&self, endpoint: &'static str, path: &str) -> Option<Value> {
        match self.get_json(&self.url(path)).await {
            Ok(Value::Null) => {
                tracing::debug!(endpoint, "upstream returned null");
                None
            }
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "request failed");
                None
            }
        }
    }

    // ==================== Endpoints ====================

    /// Look up a train number and its origin station.
    ///
    /// Calls `cercaNumeroTrenoTrenoAutocomplete`. `None` on failure or when
    /// the body does not match `<n> - <station>|<n>-<code>`.
    pub async fn search_train_and_station(&self, query: &str) -> Option<TrainRef> {
        let path = format!("cercaNumeroTrenoTrenoAutocomplete/{}", encode_segment(query));
        let body = self
            .fetch_text("cercaNumeroTrenoTrenoAutocomplete", &path)
            .await?;
        let train = parse_train_search(&body);
        if train.is_none() {
            tracing::debug!(query, "no train matched");
        }
        train
    }

    /// Complete a partial station name.
    ///
    /// Calls `autocompletaStazione`. A blank query returns an empty list
    /// without a request; a failed request returns `None`.
    pub async fn autocomplete_station(&self, partial: &str) -> Option<Vec<StationRef>> {
        if partial.trim().is_empty() {
            return Some(Vec::new());
        }

        let path = format!("autocompletaStazione/{}", encode_segment_raw(partial));
        let body = self.fetch_text("autocompletaStazione", &path).await?;
        Some(parse_station_autocomplete(&body))
    }

    /// Current running status of a train (`andamentoTreno`).
    pub async fn train_status(&self, station_code: &str, train_number: &str) -> Option<Value> {
        let path = format!(
            "andamentoTreno/{}/{}",
            encode_segment(station_code),
            encode_segment(train_number)
        );
        self.fetch_json("andamentoTreno", &path).await
    }

    /// Stop-by-stop progress of a train (`tratteCanvas`).
    pub async fn train_stops(&self, station_code: &str, train_number: &str) -> Option<Value> {
        let path = format!(
            "tratteCanvas/{}/{}",
            encode_segment(station_code),
            encode_segment(train_number)
        );
        self.fetch_json("tratteCanvas", &path).await
    }

    /// [`train_status`](Self::train_status) for a search result.
    pub async fn train_status_for(&self, train: &TrainRef) -> Option<Value> {
        self.train_status(&train.origin_station_code, &train.train_number)
            .await
    }

    /// [`train_stops`](Self::train_stops) for a search result.
    pub async fn train_stops_for(&self, train: &TrainRef) -> Option<Value> {
        self.train_stops(&train.origin_station_code, &train.train_number)
            .await
    }

    /// Departure board for a station at a given time (`partenze`).
    ///
    /// Returns `Err` without making a request if `time` cannot be
    /// normalized.
    pub async fn departures(
        &self,
        station_code: &str,
        time: impl Into<TimeArg>,
    ) -> Result<Option<Value>, InvalidArgument> {
        let path = self.board_path("partenze", station_code, &time.into())?;
        Ok(self.fetch_json("partenze", &path).await)
    }

    /// Arrival board for a station at a given time (`arrivi`).
    ///
    /// Returns `Err` without making a request if `time` cannot be
    /// normalized.
    pub async fn arrivals(
        &self,
        station_code: &str,
        time: impl Into<TimeArg>,
    ) -> Result<Option<Value>, InvalidArgument> {
        let path = self.board_path("arrivi", station_code, &time.into())?;
        Ok(self.fetch_json("arrivi", &path).await)
    }

    fn board_path(
        &self,
        endpoint: &str,
        station_code: &str,
        time: &TimeArg,
    ) -> Result<String, InvalidArgument> {
        let time = time.to_upstream(self.utc_offset)?;
        // The time segment must stay unencoded.
        Ok(format!("{endpoint}/{}/{time}", encode_segment(station_code)))
    }

    /// Route segments carrying the selected train types (`elencoTratte`).
    ///
    /// Unknown type codes are dropped. `timestamp` is Unix seconds; `None`
    /// and `Some(0)` both mean now.
    pub async fn list_route_segments<I, S>(&self, types: I, timestamp: Option<i64>) -> Option<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types = join_train_types(&select_train_types(types));
        let millis = timestamp
            .filter(|&secs| secs != 0)
            .unwrap_or_else(|| Utc::now().timestamp())
            .saturating_mul(1000);
        let path = format!("elencoTratte/0/6/{}/null/{millis}", encode_segment(&types));
        self.fetch_json("elencoTratte", &path).await
    }

    /// Details of one route segment (`dettagliTratta`).
    ///
    /// Unknown type codes are dropped.
    pub async fn route_segment_details<I, S>(&self, section: &str, types: I) -> Option<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types = join_train_types(&select_train_types(types));
        let path = format!(
            "dettagliTratta/0/8/{}/{}/null",
            encode_segment(section),
            encode_segment(&types)
        );
        self.fetch_json("dettagliTratta", &path).await
    }

    /// [`list_route_segments`](Self::list_route_segments) for every train type.
    pub async fn list_route_segments_all(&self, timestamp: Option<i64>) -> Option<Value> {
        self.list_route_segments(TrainType::ALL, timestamp).await
    }

    /// [`route_segment_details`](Self::route_segment_details) for every train type.
    pub async fn route_segment_details_all(&self, section: &str) -> Option<Value> {
        self.route_segment_details(section, TrainType::ALL).await
    }
}
