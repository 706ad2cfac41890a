use thiserror::Error;
use url::Url;

/// Errors that can occur while normalizing a feed URL.
#[derive(Error, Debug)]
pub enum FeedUrlError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Normalizes a feed URL and checks that it can be fetched.
///
/// The `feed:` pseudo-scheme is rewritten first:
/// - `feed://host/path` becomes `http://host/path`
/// - `feed:https://host/path` becomes `https://host/path`
///
/// # Examples
///
/// ```
/// use feedkit::util::normalize_feed_url;
///
/// let url = normalize_feed_url("feed://example.com/rss.xml").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/rss.xml");
///
/// assert!(normalize_feed_url("file:///etc/passwd").is_err());
/// ```
pub fn normalize_feed_url(url_str: &str) -> Result<Url, FeedUrlError> {
    let trimmed = url_str.trim();
    let rewritten = match strip_prefix_ignore_case(trimmed, "feed:") {
        Some(rest) if rest.starts_with("//") => format!("http:{rest}"),
        Some(rest) => rest.to_owned(),
        None => trimmed.to_owned(),
    };

    let url = Url::parse(&rewritten)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FeedUrlError::UnsupportedScheme(scheme.to_owned())),
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
