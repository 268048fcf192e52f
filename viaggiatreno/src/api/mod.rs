//! ViaggiaTreno REST client.
//!
//! This module provides an HTTP client for the ViaggiaTreno service run by
//! Trenitalia, which publishes live train status and station boards.
//!
//! Key characteristics of the service:
//! - Trains are identified by (origin station code, train number)
//! - Two endpoints answer in pipe-delimited text, the rest in JSON
//! - Board times go in the path in JavaScript `Date.toString()` form,
//!   unencoded
//! - Requests without a browser-like `User-Agent` are refused

mod client;
mod error;
mod mock;
mod parse;
mod transport;
mod url;

pub use client::{ClientConfig, DEFAULT_USER_AGENT, ViaggiaTrenoClient};
pub use error::TransportError;
pub use mock::{MockResponse, MockTransport};
pub use parse::{parse_station_autocomplete, parse_train_search};
pub use transport::{HttpTransport, Method, Request, RequestBody, Transport};
pub use url::{DEFAULT_BASE_URL, build_url, encode_segment, encode_segment_raw};
