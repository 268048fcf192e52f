//! Decoders for the pipe-delimited text endpoints.
//!
//! Two endpoints answer in plain text rather than JSON. Each has a small
//! fixed grammar, matched with one regex per format.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{StationRef, TrainRef};

/// `<digits> - <station>|<digits>-<code>`, spaces optional around the first dash.
static TRAIN_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*-\s*([^|]+)\|([0-9]+)-(\S+)").expect("train search pattern")
});

/// `<station>|<code>`, one per line.
static STATION_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^|]*)\|(\S+)").expect("station row pattern"));

/// Decode a `cercaNumeroTrenoTrenoAutocomplete` body.
///
/// The first match anywhere in the body wins. The number after the pipe
/// repeats the train number and is discarded; the text after the second
/// dash is the origin station code. Returns `None` when the body does not
/// contain a full match, never a partial result.
///
/// ```
/// use viaggiatreno::api::parse_train_search;
///
/// let train = parse_train_search("9544 - NAPOLI CENTRALE|9544-S09218\n").unwrap();
/// assert_eq!(train.train_number, "9544");
/// assert_eq!(train.origin_station, "NAPOLI CENTRALE");
/// assert_eq!(train.origin_station_code, "S09218");
/// ```
pub fn parse_train_search(body: &str) -> Option<TrainRef> {
    let caps = TRAIN_SEARCH.captures(body)?;
    Some(TrainRef {
        train_number: caps[1].to_string(),
        origin_station: caps[2].to_string(),
        origin_station_code: caps[4].to_string(),
    })
}

/// Decode an `autocompletaStazione` body.
///
/// The body is trimmed, then split on `\n`. Each line matching
/// `<name>|<code>` yields one station with both fields trimmed; other
/// lines are skipped. Order follows the body.
pub fn parse_station_autocomplete(body: &str) -> Vec<StationRef> {
    body.trim()
        .split('\n')
        .filter_map(|row| {
            let parsed = STATION_ROW
                .captures(row)
                .map(|caps| StationRef::new(caps[1].trim(), caps[2].trim()));
            if parsed.is_none() {
                tracing::trace!(row, "skipping unrecognized station row");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_search_basic() {
        let train = parse_train_search("500 - MILANO CENTRALE|830-MILANO").unwrap();
        assert_eq!(
            train,
            TrainRef {
                train_number: "500".into(),
                origin_station: "MILANO CENTRALE".into(),
                origin_station_code: "MILANO".into(),
            }
        );
    }

    #[test]
    fn train_search_without_spaces_around_dash() {
        let train = parse_train_search("2101-TORINO P.NUOVA|2101-S00219").unwrap();
        assert_eq!(train.train_number, "2101");
        assert_eq!(train.origin_station, "TORINO P.NUOVA");
        assert_eq!(train.origin_station_code, "S00219");
    }

    #[test]
    fn train_search_first_match_wins() {
        let body = "500 - MILANO CENTRALE|500-S01700\n500 - TORINO PORTA NUOVA|500-S00219\n";
        let train = parse_train_search(body).unwrap();
        assert_eq!(train.origin_station, "MILANO CENTRALE");
        assert_eq!(train.origin_station_code, "S01700");
    }

    #[test]
    fn train_search_missing_pipe() {
        assert_eq!(parse_train_search("500 - MILANO CENTRALE 830-MILANO"), None);
    }

    #[test]
    fn train_search_missing_dash() {
        assert_eq!(parse_train_search("500 MILANO CENTRALE|830-MILANO"), None);
        assert_eq!(parse_train_search("500 - MILANO CENTRALE|830 MILANO"), None);
    }

    #[test]
    fn train_search_empty() {
        assert_eq!(parse_train_search(""), None);
        assert_eq!(parse_train_search("\n"), None);
    }

    #[test]
    fn autocomplete_two_rows() {
        let stations = parse_station_autocomplete("MILANO CENTRALE|S01700\nROMA TERMINI|S08409\n");
        assert_eq!(
            stations,
            vec![
                StationRef::new("MILANO CENTRALE", "S01700"),
                StationRef::new("ROMA TERMINI", "S08409"),
            ]
        );
    }

    #[test]
    fn autocomplete_trims_fields() {
        let stations = parse_station_autocomplete("  MILANO ROGOREDO |S01820  \r\n");
        assert_eq!(stations, vec![StationRef::new("MILANO ROGOREDO", "S01820")]);
    }

    #[test]
    fn autocomplete_skips_bad_rows() {
        let body = "MILANO CENTRALE|S01700\nnot a station row\n\nROMA TERMINI|S08409";
        let stations = parse_station_autocomplete(body);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].code, "S08409");
    }

    #[test]
    fn autocomplete_code_must_follow_pipe() {
        assert!(parse_station_autocomplete("MILANO | S01700").is_empty());
    }

    #[test]
    fn autocomplete_empty_body() {
        assert!(parse_station_autocomplete("").is_empty());
        assert!(parse_station_autocomplete(" \n \n").is_empty());
    }
}
