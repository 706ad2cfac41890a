//! Encoding reconciliation for fetched documents.
//!
//! The streaming reader only understands UTF-8. When the transport did not
//! promise UTF-8 the body is decoded speculatively (UTF-8, then ISO-8859-1,
//! then macOS Roman), the XML declaration is rewritten to claim UTF-8, and
//! the text is handed on as UTF-8 bytes.

use std::borrow::Cow;

use encoding_rs::MACINTOSH;

use crate::error::FeedError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A fallible single-encoding decode attempt.
type Decoder = for<'a> fn(&'a [u8]) -> Option<Cow<'a, str>>;

const FALLBACK_CHAIN: &[(&str, Decoder)] = &[
    ("UTF-8", decode_utf8 as Decoder),
    ("ISO-8859-1", decode_latin1 as Decoder),
    ("macintosh", decode_mac_roman as Decoder),
];

/// Returns UTF-8 bytes ready for the streaming reader.
///
/// `declared` is the transport's text encoding name, if any. Only an exact
/// (case-insensitive) `utf-8` skips the speculative decode.
pub(crate) fn reconcile<'a>(
    body: &'a [u8],
    declared: Option<&str>,
) -> Result<Cow<'a, [u8]>, FeedError> {
    if declared.is_some_and(|name| name.eq_ignore_ascii_case("utf-8")) {
        return Ok(Cow::Borrowed(body.strip_prefix(UTF8_BOM).unwrap_or(body)));
    }

    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    let (label, text) = FALLBACK_CHAIN
        .iter()
        .find_map(|&(label, decode)| decode(body).map(|text| (label, text)))
        .ok_or_else(|| {
            FeedError::Encoding("document is not valid in any supported encoding".into())
        })?;

    tracing::debug!(declared = ?declared, decoded_as = label, "Reconciled feed encoding");

    Ok(match claim_utf8(&text) {
        Some(rewritten) => Cow::Owned(rewritten.into_bytes()),
        None => match text {
            Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
            Cow::Owned(s) => Cow::Owned(s.into_bytes()),
        },
    })
}

fn decode_utf8(bytes: &[u8]) -> Option<Cow<'_, str>> {
    std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
}

/// ISO-8859-1 proper: the C1 control range marks the bytes as something else.
///
/// Windows-1252 text mislabelled as Latin-1 therefore falls through to macOS
/// Roman, so its curly quotes (0x93/0x94) come out as `ì`/`î`. Accepting C1
/// bytes here would make the macOS Roman attempt unreachable.
fn decode_latin1(bytes: &[u8]) -> Option<Cow<'_, str>> {
    if bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
        return None;
    }
    Some(encoding_rs::mem::decode_latin1(bytes))
}

fn decode_mac_roman(bytes: &[u8]) -> Option<Cow<'_, str>> {
    MACINTOSH.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Rewrites the XML declaration's `encoding` to UTF-8 when it says otherwise.
///
/// Returns `None` when the text can be used as is.
fn claim_utf8(text: &str) -> Option<String> {
    if !text.starts_with("<?xml") {
        return None;
    }
    let decl_end = text.find("?>")?;
    let decl = &text[..decl_end];

    let attr = decl.find("encoding=")?;
    let value_start = attr + "encoding=".len();
    let quote = decl[value_start..]
        .chars()
        .next()
        .filter(|c| *c == '"' || *c == '\'')?;
    let value_len = decl[value_start + 1..].find(quote)?;
    let value = &decl[value_start + 1..value_start + 1 + value_len];
    if value.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    let value_end = value_start + 1 + value_len + 1;
    let mut rewritten = String::with_capacity(text.len());
    rewritten.push_str(&text[..attr]);
    rewritten.push_str("encoding=\"UTF-8\"");
    rewritten.push_str(&text[value_end..]);
    Some(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reconciled(body: &[u8], declared: Option<&str>) -> String {
        String::from_utf8(reconcile(body, declared).unwrap().into_owned()).unwrap()
    }

    #[test]
    fn test_declared_utf8_passes_through() {
        let body = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><rss/>";
        let out = reconcile(body, Some("UTF-8")).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, &body[..]);
    }

    #[test]
    fn test_declared_utf8_strips_bom() {
        let out = reconcile(b"\xEF\xBB\xBF<rss/>", Some("utf-8")).unwrap();
        assert_eq!(&*out, b"<rss/>");
    }

    #[test]
    fn test_undeclared_utf8_declaration_rewritten() {
        let body = "<?xml version=\"1.0\" encoding=\"windows-1252\"?><rss>é</rss>";
        assert_eq!(
            reconciled(body.as_bytes(), None),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><rss>é</rss>"
        );
    }

    #[test]
    fn test_single_quoted_declaration_rewritten() {
        let body = b"<?xml version='1.0' encoding='iso-8859-1'?><rss/>";
        assert_eq!(
            reconciled(body, Some("iso-8859-1")),
            "<?xml version='1.0' encoding=\"UTF-8\"?><rss/>"
        );
    }

    #[test]
    fn test_utf8_declaration_left_alone() {
        let body = b"<?xml version=\"1.0\" encoding=\"utf-8\"?><rss/>";
        assert!(matches!(reconcile(body, None).unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_latin1_fallback() {
        // "café" in ISO-8859-1.
        let body = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><t>caf\xE9</t>";
        assert_eq!(
            reconciled(body, Some("iso-8859-1")),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><t>café</t>"
        );
    }

    #[test]
    fn test_mac_roman_fallback() {
        // 0x8E is é in macOS Roman and a C1 control in ISO-8859-1.
        let body = b"<t>caf\x8E</t>";
        assert_eq!(reconciled(body, None), "<t>café</t>");
    }

    #[test]
    fn test_windows_1252_quotes_decode_as_mac_roman() {
        let body = b"<t>\x93hi\x94</t>";
        assert_eq!(reconciled(body, Some("ISO-8859-1")), "<t>\u{ec}hi\u{ee}</t>");
    }

    #[test]
    fn test_no_declaration_untouched() {
        assert_eq!(reconciled(b"<feed/>", None), "<feed/>");
    }
}
