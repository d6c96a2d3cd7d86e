//! Response body decoding.
//!
//! Fetched pages arrive as bytes. The charset comes from the `Content-Type`
//! header when the server sends one, otherwise from the document's own meta
//! declarations, otherwise UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `charset=` parameter of a `Content-Type` header value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/]+)"#).expect("valid regex")
});

/// Number of leading bytes searched for a meta charset declaration.
const SNIFF_LEN: usize = 1024;

/// Encoding named by a `Content-Type` header value, if recognised.
#[must_use]
pub fn encoding_from_header(content_type: &str) -> Option<&'static Encoding> {
    let label = HEADER_CHARSET_RE.captures(content_type)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Encoding declared by a meta tag in the first kilobyte, if recognised.
///
/// Covers both `<meta charset="...">` and the `http-equiv="Content-Type"`
/// form, whose `content` attribute also carries `charset=`.
#[must_use]
pub fn encoding_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    let label = CHARSET_META_RE.captures(&head)?.get(1)?.as_str().to_string();
    Encoding::for_label(label.as_bytes())
}

/// Decode a response body to UTF-8.
///
/// Invalid sequences become U+FFFD instead of failing.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(encoding_from_header)
        .or_else(|| encoding_from_meta(body))
        .unwrap_or(UTF_8);

    // A byte-order mark overrides both declarations
    let (decoded, _used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins() {
        let body = b"<html><head><meta charset=\"utf-8\"></head><body>Caf\xE9</body></html>";
        let text = decode_body(body, Some("text/html; charset=ISO-8859-1"));
        assert!(text.contains("Café"));
    }

    #[test]
    fn meta_charset_used_without_header_charset() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hi\x94</body></html>";
        let text = decode_body(body, Some("text/html"));
        assert!(text.contains("\u{201C}Hi\u{201D}"));
    }

    #[test]
    fn http_equiv_meta_is_recognised() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(encoding_from_meta(body).map(Encoding::name), Some("windows-1252"));
    }

    #[test]
    fn defaults_to_utf8() {
        let text = decode_body("<p>naïve</p>".as_bytes(), None);
        assert_eq!(text, "<p>naïve</p>");
    }

    #[test]
    fn unknown_labels_are_ignored() {
        assert!(encoding_from_header("text/html; charset=klingon").is_none());
        let text = decode_body(b"<p>ok</p>", Some("text/html; charset=klingon"));
        assert_eq!(text, "<p>ok</p>");
    }

    #[test]
    fn invalid_bytes_do_not_panic() {
        let text = decode_body(b"<p>Test \xFF\xFE Invalid</p>", None);
        assert!(text.contains("Test"));
        assert!(text.contains("Invalid"));
    }
}
