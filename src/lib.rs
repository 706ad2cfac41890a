//! Streaming RSS 2.0 / RSS 1.0 / Atom feed parser.
//!
//! - [`feed`] - The parsing engine and its observer and transport seams
//! - [`entities`] - HTML entity escaping and unescaping
//! - [`date`] - RFC 822 and RFC 3339 date parsing
//! - [`config`] - Parser configuration and TOML loading

pub mod config;
pub mod date;
pub mod entities;
pub mod error;
pub mod feed;
pub mod util;

pub use config::{Acquisition, Config, ParseScope};
pub use error::{ConfigError, FeedError, TransportError};
pub use feed::{
    CachePolicy, Enclosure, FeedCollector, FeedInfo, FeedItem, FeedObserver, FeedParser,
    FeedRequest, FetchedDocument, FinishStatus, HttpTransport, Lifecycle, StopHandle, Transport,
};
