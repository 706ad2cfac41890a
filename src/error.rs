use thiserror::Error;

/// Errors reported to [`FeedObserver::on_failure`](crate::FeedObserver::on_failure).
///
/// Every variant is terminal for the parse that raised it. Recoverable
/// problems (an unparsable date or enclosure length, a missing optional
/// field) are not errors: the field is simply left empty.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Missing URL or observer, or a parse is already running.
    #[error("Parser not configured: {0}")]
    Configuration(String),
    /// The document could not be fetched.
    #[error("Connection failed: {0}")]
    Transport(#[from] TransportError),
    /// The body could not be decoded as text.
    #[error("Error with feed encoding: {0}")]
    Encoding(String),
    /// The root element is not `rss`, `rdf:RDF` or `feed`.
    #[error("XML document is not a valid web feed document (root element <{root}>)")]
    Classification { root: String },
    /// The document is not well-formed XML.
    #[error("Feed parse error: {0}")]
    Syntax(String),
    /// The XML reader rejected the document's structure.
    #[error("Feed validation error: {0}")]
    Validation(String),
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::IllFormed(e) => FeedError::Validation(e.to_string()),
            other => FeedError::Syntax(other.to_string()),
        }
    }
}

/// Errors that can occur while fetching a feed document.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// A runtime for the blocking fetch could not be created.
    #[error("Failed to start fetch runtime: {0}")]
    Runtime(#[from] std::io::Error),
    /// The fetch could not be started or did not complete.
    #[error("{0}")]
    Unavailable(String),
}

/// Errors loading a [`Config`](crate::Config) file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}
