//! Utility functions for common operations.
//!
//! - **URL normalization**: `feed:` scheme rewriting and http/https checks

mod url;

pub use self::url::{normalize_feed_url, FeedUrlError};
