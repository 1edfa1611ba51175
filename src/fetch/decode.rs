//! Charset-cascade body decoding
//!
//! Sites declare wrong charsets often enough that decoding must be a
//! fallback chain: the declared charset first, then UTF-8, then the
//! Latin-1 family (latin1, cp1252, iso-8859-1). Each attempt is strict;
//! the first one that decodes without error wins.

use encoding_rs::{Encoding, UTF_8};

/// Decodes raw body bytes, trying the declared charset then fallbacks
///
/// Returns `None` only if no encoding in the cascade decodes the bytes
/// (callers treat that as empty content).
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> Option<String> {
    let declared = content_type.and_then(charset_from_content_type);

    let mut candidates: Vec<&'static Encoding> = Vec::new();
    if let Some(label) = declared {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            candidates.push(encoding);
        }
    }
    candidates.push(UTF_8);
    for label in ["latin1", "cp1252", "iso-8859-1"] {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            candidates.push(encoding);
        }
    }

    for encoding in candidates {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return Some(text.into_owned());
        }
    }

    None
}

/// Pulls the charset parameter out of a Content-Type header value
fn charset_from_content_type(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    let idx = lower.find("charset=")?;
    let raw = &content_type[idx + "charset=".len()..];
    let charset = raw
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches('"');
    if charset.is_empty() {
        None
    } else {
        Some(charset.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_utf8() {
        let body = "héllo wörld".as_bytes();
        assert_eq!(decode_body(body, None).unwrap(), "héllo wörld");
    }

    #[test]
    fn test_decode_declared_charset() {
        // "café" in ISO-8859-1
        let body = b"caf\xe9";
        let decoded = decode_body(body, Some("text/html; charset=iso-8859-1")).unwrap();
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_latin1() {
        // 0xE9 alone is invalid UTF-8 but valid Latin-1
        let body = b"r\xe9sultat";
        let decoded = decode_body(body, Some("text/html; charset=utf-8")).unwrap();
        assert_eq!(decoded, "résultat");
    }

    #[test]
    fn test_unknown_declared_charset_ignored() {
        let body = "plain ascii".as_bytes();
        let decoded = decode_body(body, Some("text/html; charset=bogus-charset")).unwrap();
        assert_eq!(decoded, "plain ascii");
    }

    #[test]
    fn test_charset_extraction() {
        assert_eq!(
            charset_from_content_type("text/html; charset=UTF-8"),
            Some("UTF-8".to_string())
        );
        assert_eq!(
            charset_from_content_type("text/html; charset=\"utf-8\"; boundary=x"),
            Some("utf-8".to_string())
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }
}
