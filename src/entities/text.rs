use std::borrow::Cow;

use super::unescape;

/// Closing tags that sit inside running text and so are dropped without a space.
const INLINE_TAGS: &[&str] = &[
    "a", "b", "i", "q", "span", "em", "strong", "cite", "abbr", "acronym", "label",
];

fn is_break(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '\u{0085}' | '\u{000C}' | '\u{2028}' | '\u{2029}'
    )
}

/// Converts a fragment of HTML into readable plain text.
///
/// Tags and comments are removed, `<script>` blocks are dropped whole, and
/// any run of whitespace collapses to one space. Closing block-level tags
/// become a space so words on either side stay apart; closing inline tags
/// (`</b>`, `</a>`, ...) vanish without one. Entities are decoded last with
/// [`unescape`](super::unescape).
///
/// Returns `Cow::Borrowed` when the input has no markup, whitespace runs or
/// entities to process.
///
/// # Examples
///
/// ```
/// use feedkit::entities::html_to_plain_text;
///
/// assert_eq!(html_to_plain_text("<p>One</p><p>Two &amp; <b>three</b></p>"), "One Two & three");
/// ```
pub fn html_to_plain_text(html: &str) -> Cow<'_, str> {
    // Fast path: nothing but single spaces between words.
    let needs_work = html.contains(['<', '&'])
        || html.contains("  ")
        || html.chars().any(|c| is_break(c) && c != ' ')
        || html.starts_with(' ')
        || html.ends_with(' ');
    if !needs_work {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while !rest.is_empty() {
        // Copy text up to the next tag or whitespace.
        let stop = rest.find(|c: char| c == '<' || is_break(c)).unwrap_or(rest.len());
        out.push_str(&rest[..stop]);
        rest = &rest[stop..];

        if let Some(tag) = rest.strip_prefix('<') {
            rest = if let Some(comment) = tag.strip_prefix("!--") {
                skip_past(comment, "-->")
            } else if let Some(script) = tag.strip_prefix("script") {
                skip_past(script, "</script>")
            } else {
                let after = skip_past(tag, ">");
                if let Some(closing) = tag.strip_prefix('/') {
                    let name_len = closing
                        .find(|c: char| !c.is_ascii_alphabetic())
                        .unwrap_or(closing.len());
                    let name = closing[..name_len].to_ascii_lowercase();
                    let inline = name_len > 0 && INLINE_TAGS.contains(&name.as_str());
                    if !inline && !out.is_empty() && !after.is_empty() {
                        out.push(' ');
                    }
                }
                after
            };
        } else {
            let run = rest.find(|c: char| !is_break(c)).unwrap_or(rest.len());
            rest = &rest[run..];
            if run > 0 && !out.is_empty() && !rest.is_empty() {
                out.push(' ');
            }
        }
    }

    Cow::Owned(unescape(&out).into_owned())
}

/// Everything after the first `marker`, or the empty tail if there is none.
fn skip_past<'a>(s: &'a str, marker: &str) -> &'a str {
    match s.find(marker) {
        Some(idx) => &s[idx + marker.len()..],
        None => "",
    }
}
