//! Train category filters for the route segment endpoints.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown train category code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown train type: {0:?}")]
pub struct UnknownTrainType(String);

/// A train category recognized by the route segment endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrainType {
    /// Eurostar / Frecce family, matched by prefix upstream (`ES*`).
    Es,
    /// InterCity.
    Ic,
    /// Express.
    Exp,
    /// EuroCity.
    Ec,
    /// EuroNight.
    En,
}

impl TrainType {
    /// Every category, in the order the upstream expects them joined.
    pub const ALL: [TrainType; 5] = [
        TrainType::Es,
        TrainType::Ic,
        TrainType::Exp,
        TrainType::Ec,
        TrainType::En,
    ];

    /// The code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            TrainType::Es => "ES*",
            TrainType::Ic => "IC",
            TrainType::Exp => "EXP",
            TrainType::Ec => "EC",
            TrainType::En => "EN",
        }
    }
}

impl AsRef<str> for TrainType {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

impl fmt::Display for TrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TrainType {
    type Err = UnknownTrainType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrainType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| UnknownTrainType(s.to_string()))
    }
}

/// Intersect requested codes with the whitelist.
///
/// The result follows whitelist order, not request order. Unknown codes
/// are dropped silently and duplicates collapse.
///
/// ```
/// use viaggiatreno::domain::{TrainType, select_train_types};
///
/// let selected = select_train_types(["EXP", "bogus", "IC"]);
/// assert_eq!(selected, vec![TrainType::Ic, TrainType::Exp]);
/// ```
pub fn select_train_types<I, S>(requested: I) -> Vec<TrainType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let requested: Vec<S> = requested.into_iter().collect();
    TrainType::ALL
        .into_iter()
        .filter(|t| requested.iter().any(|r| r.as_ref() == t.code()))
        .collect()
}

/// Join categories with commas, as the upstream path segment expects.
pub fn join_train_types(types: &[TrainType]) -> String {
    types
        .iter()
        .map(|t| t.code())
        .collect::<Vec<_>>()
        .join(",")
}
