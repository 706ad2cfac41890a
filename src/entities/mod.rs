//! HTML/XML character entity codec.
//!
//! Escaping looks every scalar up in one of two code-point-sorted tables
//! ([`EntityTable`]) and optionally falls back to decimal numeric references
//! for anything outside ASCII. Unescaping walks the text right to left and
//! decodes named entities from the compact table plus numeric references.
//!
//! The two directions are not strict inverses: names that only
//! exist in the ASCII table (`&nbsp;`, `&alpha;`, ...) are produced by
//! [`escape_for_ascii_html`] but left untouched by [`unescape`].
//!
//! # Examples
//!
//! ```
//! use feedkit::entities::{escape_for_ascii_html, unescape};
//!
//! assert_eq!(escape_for_ascii_html("<this & that>"), "&lt;this &amp; that&gt;");
//! assert_eq!(unescape("&lt;span&gt;blah&lt;span&gt;"), "<span>blah<span>");
//! ```

mod tables;
mod text;

use std::borrow::Cow;
use std::fmt::Write as _;

pub use tables::EscapeEntry;
pub use text::html_to_plain_text;

use tables::{ASCII_HTML_ESCAPES, HTML_ESCAPES};

/// Shortest escape sequence that can be decoded (`&lt;`).
const MIN_ESCAPE_LEN: usize = 4;
/// Longest named entity in the tables (`&thetasym;`).
const MAX_ESCAPE_LEN: usize = 10;
/// Numeric references must fit in a single 16-bit code unit.
const NUMERIC_CEILING: u32 = 0x1_0000;

/// Which named-entity table to escape with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTable {
    /// Markup specials plus a handful of typographic characters.
    Html,
    /// The full XHTML set, including Latin-1, Greek and symbols.
    AsciiHtml,
}

impl EntityTable {
    /// The entries of this table, ordered by code point.
    pub fn entries(self) -> &'static [EscapeEntry] {
        match self {
            EntityTable::Html => HTML_ESCAPES,
            EntityTable::AsciiHtml => ASCII_HTML_ESCAPES,
        }
    }

    /// Binary search for the entity naming `ch`.
    pub fn lookup(self, ch: char) -> Option<&'static EscapeEntry> {
        let entries = self.entries();
        entries
            .binary_search_by_key(&ch, |entry| entry.ch)
            .ok()
            .map(|idx| &entries[idx])
    }
}

/// Escapes `text` using `table`.
///
/// Every scalar with an entry in the table becomes `&name;`. When
/// `escape_non_ascii` is set, any other scalar above 127 becomes a decimal
/// reference `&#N;`. Everything else is copied unchanged.
///
/// Returns `Cow::Borrowed` when nothing needed escaping.
pub fn escape(text: &str, table: EntityTable, escape_non_ascii: bool) -> Cow<'_, str> {
    let needs_escape = |ch: char| (escape_non_ascii && !ch.is_ascii()) || table.lookup(ch).is_some();

    let Some(first) = text.find(needs_escape) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);
    for ch in text[first..].chars() {
        if let Some(entry) = table.lookup(ch) {
            out.push('&');
            out.push_str(entry.name);
            out.push(';');
        } else if escape_non_ascii && !ch.is_ascii() {
            // Writing to a String cannot fail.
            let _ = write!(out, "&#{};", u32::from(ch));
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Escapes markup characters, leaving other non-ASCII text in place.
///
/// From `<span>blah<span>` to `&lt;span&gt;blah&lt;span&gt;`.
pub fn escape_for_html(text: &str) -> Cow<'_, str> {
    escape(text, EntityTable::Html, false)
}

/// Escapes so the result is pure ASCII: named entities from the full table,
/// decimal references for everything else above 127.
pub fn escape_for_ascii_html(text: &str) -> Cow<'_, str> {
    escape(text, EntityTable::AsciiHtml, true)
}

/// Decodes named and numeric character references.
///
/// The scan starts at the last `&` and moves left. A candidate runs from an
/// `&` to the first `;` before the previously visited `&`, and is only
/// considered when it is 4 to 10 characters long including both delimiters.
/// Candidates that do not decode are left verbatim.
///
/// From `&lt;span&gt;blah&lt;span&gt;` to `<span>blah<span>`.
pub fn unescape(text: &str) -> Cow<'_, str> {
    let Some(mut amp) = text.rfind('&') else {
        return Cow::Borrowed(text);
    };

    let mut out = text.to_string();
    let mut bound = text.len();
    loop {
        if let Some(offset) = text[amp..bound].find(';') {
            let token = &text[amp..=amp + offset];
            if let Some(ch) = decode_token(token) {
                // Replacements happen right to left, so `amp` is still valid in `out`.
                let mut buf = [0u8; 4];
                out.replace_range(amp..=amp + offset, ch.encode_utf8(&mut buf));
            }
        }

        bound = amp;
        match text[..bound].rfind('&') {
            Some(prev) => amp = prev,
            None => break,
        }
    }

    Cow::Owned(out)
}

/// Decodes a single `&...;` token, or `None` when it should stay verbatim.
fn decode_token(token: &str) -> Option<char> {
    let len = token.chars().count();
    if !(MIN_ESCAPE_LEN..=MAX_ESCAPE_LEN).contains(&len) {
        return None;
    }

    let body = &token[1..token.len() - 1];
    match body.strip_prefix('#') {
        Some(numeric) => decode_numeric(numeric),
        None => HTML_ESCAPES
            .iter()
            .find(|entry| entry.name == body)
            .map(|entry| entry.ch),
    }
}

fn decode_numeric(reference: &str) -> Option<char> {
    let (digits, radix) = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (reference, 10),
    };

    // The whole span must be digits; `from_str_radix` alone would accept a sign.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let value = u32::from_str_radix(digits, radix).ok()?;
    if value == 0 || value >= NUMERIC_CEILING {
        return None;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_tables_sorted_by_code_point() {
        for table in [EntityTable::Html, EntityTable::AsciiHtml] {
            let entries = table.entries();
            for pair in entries.windows(2) {
                assert!(
                    pair[0].ch < pair[1].ch,
                    "{:?} out of order: {} before {}",
                    table,
                    pair[0].name,
                    pair[1].name
                );
            }
        }
    }

    #[test]
    fn test_compact_table_is_subset_of_ascii_table() {
        for entry in HTML_ESCAPES {
            let full = EntityTable::AsciiHtml.lookup(entry.ch);
            assert_eq!(full.map(|e| e.name), Some(entry.name));
        }
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_for_html(""), "");
        assert_eq!(escape_for_ascii_html(""), "");
        assert_eq!(unescape(""), "");
    }

    #[test]
    fn test_escape_markup_specials() {
        assert_eq!(escape_for_html("<this & that>"), "&lt;this &amp; that&gt;");
        assert_eq!(escape_for_ascii_html("<this & that>"), "&lt;this &amp; that&gt;");
    }

    #[test]
    fn test_escape_compact_table_sequence() {
        let input: String = [
            34u32, 38, 39, 60, 62, 338, 339, 352, 353, 376, 710, 732, 8194, 8195, 8201, 8204,
            8205, 8206, 8207, 8211, 8212, 8216, 8217, 8218, 8220, 8221, 8222, 8224, 8225, 8240,
            8249, 8250, 8364,
        ]
        .iter()
        .filter_map(|&c| char::from_u32(c))
        .collect();
        let expected = "&quot;&amp;&apos;&lt;&gt;&OElig;&oelig;&Scaron;&scaron;&Yuml;\
                        &circ;&tilde;&ensp;&emsp;&thinsp;&zwnj;&zwj;&lrm;&rlm;&ndash;\
                        &mdash;&lsquo;&rsquo;&sbquo;&ldquo;&rdquo;&bdquo;&dagger;&Dagger;\
                        &permil;&lsaquo;&rsaquo;&euro;";
        assert_eq!(escape_for_html(&input), expected);
    }

    #[test]
    fn test_escape_for_html_keeps_non_ascii() {
        assert_eq!(
            escape_for_html("パン・&ド・カンパーニュ"),
            "パン・&amp;ド・カンパーニュ"
        );
        assert_eq!(escape_for_html("abcا1ب<تdef&"), "abcا1ب&lt;تdef&amp;");
    }

    #[test]
    fn test_escape_for_ascii_html_numeric_fallback() {
        assert_eq!(
            escape_for_ascii_html("パン・ド・カンパーニュ"),
            "&#12497;&#12531;&#12539;&#12489;&#12539;&#12459;&#12531;&#12497;&#12540;&#12491;&#12517;"
        );
        assert_eq!(
            escape_for_ascii_html("abcا1ب<تdef&"),
            "abc&#1575;1&#1576;&lt;&#1578;def&amp;"
        );
    }

    #[test]
    fn test_escape_for_ascii_html_named_ranges() {
        assert_eq!(escape_for_ascii_html("\u{a0}©é"), "&nbsp;&copy;&eacute;");
        assert_eq!(escape_for_ascii_html("αΩ"), "&alpha;&Omega;");
        assert_eq!(escape_for_ascii_html("ϑ→♦"), "&thetasym;&rarr;&diams;");
    }

    #[test]
    fn test_escape_borrows_when_clean() {
        assert!(matches!(escape_for_html("plain text"), Cow::Borrowed(_)));
        assert!(matches!(unescape("no refs here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_named() {
        assert_eq!(unescape("&lt;span&gt;blah&lt;span&gt;"), "<span>blah<span>");
        assert_eq!(unescape("Fish &amp; Chips"), "Fish & Chips");
        assert_eq!(unescape("&ldquo;quoted&rdquo;"), "\u{201c}quoted\u{201d}");
    }

    #[test]
    fn test_unescape_numeric() {
        assert_eq!(unescape("&#60;"), "<");
        assert_eq!(unescape("&#x3C;&#X3c;"), "<<");
        assert_eq!(unescape("&#8364;"), "\u{20ac}");
    }

    #[test]
    fn test_unescape_numeric_out_of_range_unchanged() {
        assert_eq!(unescape("&#0;"), "&#0;");
        assert_eq!(unescape("&#99999;"), "&#99999;");
        assert_eq!(unescape("&#x10000;"), "&#x10000;");
    }

    #[test]
    fn test_unescape_numeric_trailing_garbage_unchanged() {
        assert_eq!(unescape("&#60a;"), "&#60a;");
        assert_eq!(unescape("&#+60;"), "&#+60;");
        assert_eq!(unescape("&#xZZ;"), "&#xZZ;");
        assert_eq!(unescape("&#x;"), "&#x;");
    }

    #[test]
    fn test_unescape_surrogate_unchanged() {
        assert_eq!(unescape("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_unescape_length_window() {
        // Too short to be an entity.
        assert_eq!(unescape("&a;"), "&a;");
        // Longer than &thetasym;.
        assert_eq!(unescape("&#00000060;"), "&#00000060;");
        // Exactly ten characters still qualifies.
        assert_eq!(unescape("&#0000060;"), "<");
    }

    #[test]
    fn test_unescape_extended_names_left_alone() {
        assert_eq!(unescape("&nbsp;&eacute;"), "&nbsp;&eacute;");
    }

    #[test]
    fn test_unescape_unknown_and_unterminated() {
        assert_eq!(unescape("&bogus; & more"), "&bogus; & more");
        assert_eq!(unescape("AT&T"), "AT&T");
        assert_eq!(unescape("a & b &lt; c"), "a & b < c");
    }

    #[test]
    fn test_unescape_semicolon_bounded_by_next_ampersand() {
        // The first '&' cannot reach past the second to borrow its ';'.
        assert_eq!(unescape("&lt&gt;"), "&lt>");
    }

    #[test]
    fn test_round_trip_every_compact_entry() {
        for entry in HTML_ESCAPES {
            let s = entry.ch.to_string();
            assert_eq!(unescape(&escape_for_html(&s)), s, "entity {}", entry.name);
            assert_eq!(unescape(&escape_for_ascii_html(&s)), s, "entity {}", entry.name);
        }
    }

    proptest! {
        #[test]
        fn prop_unescape_without_ampersand_is_identity(s in "[^&]*") {
            prop_assert_eq!(unescape(&s), s.as_str());
        }

        #[test]
        fn prop_ascii_escape_output_is_ascii(s in "\\PC*") {
            prop_assert!(escape_for_ascii_html(&s).is_ascii());
        }

        #[test]
        fn prop_html_escape_round_trips(s in "[a-zA-Z0-9 <>&\"'\u{2013}\u{20ac}]*") {
            let escaped = escape_for_html(&s);
            prop_assert_eq!(unescape(&escaped), s.as_str());
        }
    }
}
