//! Time arguments for the departure and arrival boards.
//!
//! The board endpoints take a moment in time as a path segment in the
//! JavaScript `Date.toString()` shape, e.g. `Thu Jan 02 2020 15:04:05 GMT+0100`.
//! The upstream parses it positionally, so the layout must be exact.
//!
//! Callers may hand over free text, a naive date-time or a zoned date-time;
//! every form is normalized to a single `DateTime<FixedOffset>` before
//! formatting.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

use super::error::InvalidArgument;

/// Layout of the time segment understood by the board endpoints.
pub const UPSTREAM_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Layouts with an explicit offset, tried after RFC 3339 and RFC 2822.
/// The second is chrono's own `Display` form for zoned date-times.
const OFFSET_DATETIME_FORMATS: &[&str] = &[UPSTREAM_FORMAT, "%Y-%m-%d %H:%M:%S%.f %:z"];

/// Offset-free layouts accepted for text input, tried in order.
/// `%.f` also matches a missing fraction.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// A moment in time as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeArg {
    /// Free text, parsed with [`parse_time_text`].
    Text(String),
    /// A wall-clock date-time with no offset attached.
    Naive(NaiveDateTime),
    /// An already-normalized date-time.
    Zoned(DateTime<FixedOffset>),
}

impl TimeArg {
    /// Resolve to a single zoned date-time.
    ///
    /// `utc_offset` is used for values that carry no offset of their own;
    /// `None` means the host's local zone.
    pub fn normalize(
        &self,
        utc_offset: Option<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>, InvalidArgument> {
        match self {
            TimeArg::Text(text) => parse_time_text(text, utc_offset),
            TimeArg::Naive(naive) => resolve_naive(naive, utc_offset),
            TimeArg::Zoned(dt) => Ok(*dt),
        }
    }

    /// Normalize and render in the upstream layout.
    pub fn to_upstream(&self, utc_offset: Option<FixedOffset>) -> Result<String, InvalidArgument> {
        self.normalize(utc_offset).map(|dt| format_upstream(&dt))
    }
}

impl From<&str> for TimeArg {
    fn from(s: &str) -> Self {
        TimeArg::Text(s.to_string())
    }
}

impl From<String> for TimeArg {
    fn from(s: String) -> Self {
        TimeArg::Text(s)
    }
}

impl From<NaiveDateTime> for TimeArg {
    fn from(naive: NaiveDateTime) -> Self {
        TimeArg::Naive(naive)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeArg {
    fn from(dt: DateTime<Tz>) -> Self {
        TimeArg::Zoned(dt.fixed_offset())
    }
}

/// Render a date-time in the layout expected by the board endpoints.
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use viaggiatreno::domain::format_upstream;
///
/// let offset = FixedOffset::east_opt(3600).unwrap();
/// let dt = offset.with_ymd_and_hms(2020, 1, 2, 15, 4, 5).unwrap();
/// assert_eq!(format_upstream(&dt), "Thu Jan 02 2020 15:04:05 GMT+0100");
/// ```
pub fn format_upstream(dt: &DateTime<FixedOffset>) -> String {
    dt.format(UPSTREAM_FORMAT).to_string()
}

/// Parse free-form time text.
///
/// Accepts `now`, RFC 3339, RFC 2822, the layouts in
/// `OFFSET_DATETIME_FORMATS`, the offset-free layouts in
/// `NAIVE_DATETIME_FORMATS` (optionally followed by ` UTC`) and a bare
/// `YYYY-MM-DD` (taken as midnight). This covers the `Display` output of
/// chrono's `DateTime` and `NaiveDateTime`. Offset-free values are
/// resolved in `utc_offset`, or the local zone when that is `None`.
pub fn parse_time_text(
    text: &str,
    utc_offset: Option<FixedOffset>,
) -> Result<DateTime<FixedOffset>, InvalidArgument> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InvalidArgument::new("empty time text"));
    }

    if text.eq_ignore_ascii_case("now") {
        return Ok(match utc_offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt);
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    if let Some(naive) = text.strip_suffix(" UTC").and_then(parse_naive) {
        return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
    }

    match parse_naive(text) {
        Some(naive) => resolve_naive(&naive, utc_offset),
        None => Err(InvalidArgument::new(format!("unparseable time {text:?}"))),
    }
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn resolve_naive(
    naive: &NaiveDateTime,
    utc_offset: Option<FixedOffset>,
) -> Result<DateTime<FixedOffset>, InvalidArgument> {
    let resolved = match utc_offset {
        Some(offset) => offset.from_local_datetime(naive).single(),
        // Ambiguous wall-clock times (DST fall-back) take the earlier instant.
        None => Local
            .from_local_datetime(naive)
            .earliest()
            .map(|dt| dt.fixed_offset()),
    };

    resolved.ok_or_else(|| InvalidArgument::new(format!("{naive} does not exist locally")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn cet() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    fn sample() -> DateTime<FixedOffset> {
        cet().with_ymd_and_hms(2020, 1, 2, 15, 4, 5).unwrap()
    }

    #[test]
    fn formats_upstream_layout() {
        assert_eq!(format_upstream(&sample()), "Thu Jan 02 2020 15:04:05 GMT+0100");
    }

    #[test]
    fn formats_negative_offset() {
        let offset = FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap();
        let dt = offset.with_ymd_and_hms(2023, 7, 9, 8, 0, 0).unwrap();
        assert_eq!(format_upstream(&dt), "Sun Jul 09 2023 08:00:00 GMT-0530");
    }

    #[test]
    fn zoned_passes_through() {
        let arg = TimeArg::from(sample());
        assert_eq!(arg.normalize(None).unwrap(), sample());
    }

    #[test]
    fn utc_datetime_keeps_its_offset() {
        let utc = Utc.with_ymd_and_hms(2020, 1, 2, 14, 4, 5).unwrap();
        assert_eq!(
            TimeArg::from(utc).to_upstream(Some(cet())).unwrap(),
            "Thu Jan 02 2020 14:04:05 GMT+0000"
        );
    }

    #[test]
    fn naive_resolved_in_given_offset() {
        let arg = TimeArg::from(sample().naive_local());
        assert_eq!(arg.normalize(Some(cet())).unwrap(), sample());
    }

    #[test]
    fn text_forms() {
        let expected = "Thu Jan 02 2020 15:04:05 GMT+0100";
        for text in [
            "2020-01-02T15:04:05+01:00",
            "Thu, 02 Jan 2020 15:04:05 +0100",
            "Thu Jan 02 2020 15:04:05 GMT+0100",
            "2020-01-02 15:04:05",
            "2020-01-02T15:04:05",
            "02/01/2020 15:04:05",
            "  2020-01-02 15:04:05  ",
        ] {
            assert_eq!(
                TimeArg::from(text).to_upstream(Some(cet())).unwrap(),
                expected,
                "input {text:?}"
            );
        }
    }

    #[test]
    fn chrono_display_forms_roundtrip() {
        let dt = sample().with_nanosecond(250_000_000).unwrap();

        for text in [
            dt.to_string(),
            dt.with_timezone(&Utc).to_string(),
            dt.with_timezone(&Local).to_string(),
            dt.naive_local().to_string(),
            dt.naive_local().format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        ] {
            assert_eq!(
                TimeArg::from(text.as_str()).normalize(Some(cet())).unwrap(),
                dt,
                "input {text:?}"
            );
        }
    }

    #[test]
    fn fractional_and_utc_text() {
        let expected = "Thu Jan 02 2020 15:04:05 GMT+0100";
        for text in [
            "2020-01-02 15:04:05 +01:00",
            "2020-01-02 15:04:05.250",
            "2020-01-02T15:04:05.250",
            "2020-01-02T15:04:05.250+01:00",
        ] {
            assert_eq!(
                TimeArg::from(text).to_upstream(Some(cet())).unwrap(),
                expected,
                "input {text:?}"
            );
        }

        assert_eq!(
            TimeArg::from("2020-01-02 14:04:05 UTC")
                .to_upstream(Some(cet()))
                .unwrap(),
            "Thu Jan 02 2020 14:04:05 GMT+0000"
        );
    }

    #[test]
    fn text_without_seconds() {
        assert_eq!(
            TimeArg::from("2020-01-02 15:04").to_upstream(Some(cet())).unwrap(),
            "Thu Jan 02 2020 15:04:00 GMT+0100"
        );
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(
            TimeArg::from("2020-01-02").to_upstream(Some(cet())).unwrap(),
            "Thu Jan 02 2020 00:00:00 GMT+0100"
        );
    }

    #[test]
    fn now_uses_given_offset() {
        let now = TimeArg::from("now").normalize(Some(cet())).unwrap();
        assert_eq!(*now.offset(), cet());
        let drift = (Utc::now() - now.with_timezone(&Utc)).num_seconds().abs();
        assert!(drift < 60);
    }

    #[test]
    fn garbage_text_rejected() {
        for text in ["", "   ", "soon", "2020-13-45", "25:00", "1577973845"] {
            let err = TimeArg::from(text).normalize(Some(cet())).unwrap_err();
            assert!(err.to_string().starts_with("invalid argument"), "input {text:?}");
        }
    }
}
