//! Inline content sources (`data:` URLs).
//!
//! File contents in an Ignition config are URLs. Only inline `data:` URLs
//! are supported:
//!
//! ```text
//! data:[<media type>][;<param>=<value>]*[;base64],<payload>
//! ```
//!
//! The payload is query-unescaped (`+` is a space, `%XX` is a byte) and,
//! with the `base64` flag, then base64-decoded. Escapes are validated
//! strictly: a stray `%` is an error rather than a literal.
use base64::Engine as _;
use percent_encoding::percent_decode_str;

use crate::error::ContentError;

/// URL scheme for inline content.
const DATA_SCHEME: &str = "data";

/// Header flag selecting base64 payloads.
const BASE64_FLAG: &str = "base64";

/// A parsed, not yet decoded, data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    base64: bool,
    payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split `source` into header and payload, checking the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingScheme`] if there is no `:`,
    /// [`ContentError::UnsupportedScheme`] for anything but `data`, and
    /// [`ContentError::MissingPayload`] if there is no `,`.
    pub fn parse(source: &'a str) -> Result<Self, ContentError> {
        let (scheme, rest) = source.split_once(':').ok_or(ContentError::MissingScheme)?;
        if !scheme.eq_ignore_ascii_case(DATA_SCHEME) {
            return Err(ContentError::UnsupportedScheme(scheme.to_string()));
        }

        let (header, payload) = rest.split_once(',').ok_or(ContentError::MissingPayload)?;
        // The media type and any parameters come first; only a trailing
        // `;base64` changes how the payload decodes.
        let params = header.split(';').skip(1);
        let base64 = params
            .last()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case(BASE64_FLAG));

        Ok(Self { base64, payload })
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidEscape`] for a malformed `%` escape and
    /// [`ContentError::Base64`] for an invalid base64 payload.
    pub fn decode(&self) -> Result<Vec<u8>, ContentError> {
        // '+' is a base64 digit, so only plain payloads treat it as a space.
        let bytes = unescape(self.payload, !self.base64)?;
        if self.base64 {
            Ok(base64::engine::general_purpose::STANDARD.decode(bytes)?)
        } else {
            Ok(bytes)
        }
    }
}

/// Decode a file content source into raw bytes.
///
/// An empty source yields empty contents.
///
/// # Errors
///
/// Returns a [`ContentError`] if the source is not a well-formed data URL.
///
/// # Examples
///
/// ```
/// use ignition_unpack::resources::data_url::decode;
///
/// assert_eq!(decode("data:,hello%20world").unwrap(), b"hello world");
/// assert_eq!(decode("data:;base64,aGVsbG8=").unwrap(), b"hello");
/// assert!(decode("https://example.com/motd").is_err());
/// ```
pub fn decode(source: &str) -> Result<Vec<u8>, ContentError> {
    if source.is_empty() {
        return Ok(Vec::new());
    }
    DataUrl::parse(source)?.decode()
}

/// Query-unescape `payload`, rejecting `%` not followed by two hex digits.
fn unescape(payload: &str, plus_as_space: bool) -> Result<Vec<u8>, ContentError> {
    let bytes = payload.as_bytes();
    for (offset, _) in payload.match_indices('%') {
        let escape = bytes.get(offset + 1..offset + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(ContentError::InvalidEscape { offset });
        }
    }

    if plus_as_space && payload.contains('+') {
        Ok(percent_decode_str(&payload.replace('+', " ")).collect())
    } else {
        Ok(percent_decode_str(payload).collect())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plain_payload_round_trips() {
        assert_eq!(decode("data:,hello").unwrap(), b"hello");
    }

    #[test]
    fn percent_escapes_decode_to_bytes() {
        assert_eq!(
            decode("data:,line%201%0Aline%202%0A").unwrap(),
            b"line 1\nline 2\n"
        );
        assert_eq!(decode("data:,%ff%00").unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn plus_is_a_space_in_plain_payloads() {
        assert_eq!(decode("data:,a+b%2Bc").unwrap(), b"a b+c");
    }

    #[test]
    fn empty_payload_is_empty_file() {
        assert!(decode("data:,").unwrap().is_empty());
    }

    #[test]
    fn empty_source_is_empty_file() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn media_type_and_params_are_skipped() {
        let url = DataUrl::parse("data:text/x-shellscript;charset=utf-8,echo").unwrap();
        assert!(!url.base64);
        assert_eq!(url.decode().unwrap(), b"echo");
    }

    #[test]
    fn bare_base64_media_type_is_not_a_flag() {
        let url = DataUrl::parse("data:base64,aGk=").unwrap();
        assert!(!url.base64);
        assert_eq!(url.decode().unwrap(), b"aGk=");
    }

    #[test]
    fn base64_payload_decodes() {
        assert_eq!(decode("data:;base64,YStiCg==").unwrap(), b"a+b\n");
        assert_eq!(
            decode("data:application/octet-stream;base64,AP8=").unwrap(),
            vec![0x00, 0xff]
        );
    }

    #[test]
    fn base64_keeps_plus_digits() {
        // 0xfb 0xef 0xbe encodes to "++++"
        assert_eq!(decode("data:;base64,++++").unwrap(), vec![0xfb, 0xef, 0xbe]);
    }

    #[test]
    fn base64_payload_may_be_percent_escaped() {
        assert_eq!(decode("data:;base64,aGVsbG8%3D").unwrap(), b"hello");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = decode("data:;base64,!!!").unwrap_err();
        assert!(matches!(err, ContentError::Base64(_)));
    }

    #[test]
    fn malformed_escapes_are_rejected() {
        assert_eq!(
            decode("data:,100%"),
            Err(ContentError::InvalidEscape { offset: 3 })
        );
        assert_eq!(
            decode("data:,%zz"),
            Err(ContentError::InvalidEscape { offset: 0 })
        );
        assert_eq!(
            decode("data:,ok%4"),
            Err(ContentError::InvalidEscape { offset: 2 })
        );
    }

    #[test]
    fn other_schemes_are_rejected() {
        for source in [
            "https://example.com/f",
            "http://example.com/f",
            "s3://bucket/key",
            "tftp://host/f",
        ] {
            let err = decode(source).unwrap_err();
            assert!(
                matches!(err, ContentError::UnsupportedScheme(_)),
                "{source} should be rejected"
            );
        }
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(decode("DATA:,x").unwrap(), b"x");
    }

    #[test]
    fn missing_scheme_is_rejected() {
        assert_eq!(decode("hello"), Err(ContentError::MissingScheme));
    }

    #[test]
    fn missing_comma_is_rejected() {
        assert_eq!(decode("data:text/plain"), Err(ContentError::MissingPayload));
    }

    #[test]
    fn commas_after_the_first_belong_to_payload() {
        assert_eq!(decode("data:,a,b,c").unwrap(), b"a,b,c");
    }
}
