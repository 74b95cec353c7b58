//! Percent-encoding for path segments and location fragments
//!
//! Uses the same reserved set as a browser's `encodeURIComponent`, so ids
//! round-trip through `#/post/{id}` and `/api/posts/{id}` unchanged.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left untouched by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URL component
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Decode a percent-encoded component
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn decode_component(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_browser_component_encoding() {
        assert_eq!(encode_component("abc def"), "abc%20def");
        assert_eq!(encode_component("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("abc%20def"), "abc def");
        assert_eq!(decode_component("caf%C3%A9"), "café");
        assert_eq!(decode_component("100%"), "100%");
    }

    #[test]
    fn test_encode_decode_symmetric() {
        let id = "post #1/ünïcode";
        assert_eq!(decode_component(&encode_component(id)), id);
    }
}
