//! Value types exchanged with the ViaggiaTreno service.
//!
//! Everything here is immutable and request-scoped: references produced by
//! one call and fed into the next, plus the argument types that are
//! validated before a request is built.

mod error;
mod station;
mod time;
mod train;
mod train_type;

pub use error::InvalidArgument;
pub use station::StationRef;
pub use time::{TimeArg, UPSTREAM_FORMAT, format_upstream, parse_time_text};
pub use train::TrainRef;
pub use train_type::{TrainType, UnknownTrainType, join_train_types, select_train_types};
