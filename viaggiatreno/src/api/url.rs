//! Endpoint URL construction.
//!
//! The upstream is picky about encoding. Identifiers are percent-encoded
//! per segment by each endpoint, in one of two flavors, while the board
//! time segment must go out unencoded: its spaces and `+` sign are read
//! positionally and the service rejects the escaped form.

/// Base URL of the ViaggiaTreno REST service.
pub const DEFAULT_BASE_URL: &str = "http://www.viaggiatreno.it/viaggiatrenonew/resteasy/viaggiatreno/";

/// Join the service base with an endpoint path.
///
/// The path is appended as-is; encoding is the caller's job.
pub fn build_url(base_url: &str, path: &str) -> String {
    if base_url.ends_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

/// Form-style encoding: space becomes `+` and only `A-Z a-z 0-9 - _ .`
/// stay bare.
///
/// ```
/// use viaggiatreno::api::encode_segment;
///
/// assert_eq!(encode_segment("ES*,IC"), "ES%2A%2CIC");
/// assert_eq!(encode_segment("S. MARIA NOVELLA"), "S.+MARIA+NOVELLA");
/// ```
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%20", "+")
        .replace('~', "%7E")
}

/// RFC 3986 encoding: space becomes `%20`, `~` stays bare.
pub fn encode_segment_raw(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_with_and_without_slash() {
        assert_eq!(
            build_url(DEFAULT_BASE_URL, "andamentoTreno/S01700/9544"),
            "http://www.viaggiatreno.it/viaggiatrenonew/resteasy/viaggiatreno/andamentoTreno/S01700/9544"
        );
        assert_eq!(
            build_url("http://localhost:8080/vt", "arrivi/S1"),
            "http://localhost:8080/vt/arrivi/S1"
        );
    }

    #[test]
    fn form_style_encoding() {
        assert_eq!(encode_segment("ROMA TERMINI"), "ROMA+TERMINI");
        assert_eq!(encode_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(encode_segment("1+1"), "1%2B1");
        assert_eq!(encode_segment("x~y"), "x%7Ey");
        assert_eq!(encode_segment("plain-id_1.0"), "plain-id_1.0");
    }

    #[test]
    fn raw_encoding() {
        assert_eq!(encode_segment_raw("ROMA TERMINI"), "ROMA%20TERMINI");
        assert_eq!(encode_segment_raw("x~y"), "x~y");
        assert_eq!(encode_segment_raw("FORLÌ"), "FORL%C3%8C");
    }
}
