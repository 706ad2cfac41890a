//! Feed parsing: RSS 2.0, RSS 1.0 (RDF) and Atom.
//!
//! - [`parser`] - The [`FeedParser`] engine: lifecycle, acquisition and cancellation
//! - [`transport`] - Fetching documents, with a reqwest-backed default
//! - `machine` - Path-driven dispatch of XML events into records
//! - `dialect` - Per-dialect path tables
//! - `encoding` - Making fetched bytes readable as UTF-8
//!
//! # Example
//!
//! ```no_run
//! use feedkit::feed::{FeedObserver, FeedParser, FeedItem};
//! use feedkit::Config;
//!
//! struct Titles;
//!
//! impl FeedObserver for Titles {
//!     fn on_item(&mut self, item: FeedItem) {
//!         println!("{}", item.title.unwrap_or_default());
//!     }
//! }
//!
//! let mut parser = FeedParser::new(Config::default());
//! parser.set_url("https://example.com/feed.xml")?;
//! parser.set_observer(Titles);
//! parser.parse();
//! # Ok::<(), feedkit::FeedError>(())
//! ```

mod dialect;
mod encoding;
mod machine;
mod model;
mod observer;
pub mod parser;
pub mod transport;

pub use dialect::Dialect;
pub use model::{Enclosure, FeedInfo, FeedItem};
pub use observer::{FeedCollector, FeedObserver, FinishStatus};
pub use parser::{FeedParser, Lifecycle, StopHandle};
pub use transport::{CachePolicy, FeedRequest, FetchedDocument, HttpTransport, Transport};
