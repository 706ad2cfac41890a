use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel-level metadata for a feed.
///
/// Produced at most once per parse, either when the first item is reached
/// or when the document ends without any items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedInfo {
    pub title: Option<String>,
    pub link: Option<String>,
    /// The feed's `description` (RSS) or `subtitle` (Atom).
    pub summary: Option<String>,
    /// URL the document was fetched from.
    pub url: Option<String>,
}

/// A single `item` (RSS) or `entry` (Atom).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// `guid`, `dc:identifier` or Atom `id`.
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    /// Publication date. Falls back to `updated` when the feed gives only that.
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub content: Option<String>,
    /// Attached media, in document order.
    pub enclosures: Vec<Enclosure>,
}

/// An external resource attached to an item, such as a podcast episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    /// MIME type, e.g. `audio/mpeg`.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub length: Option<u64>,
}

impl FeedItem {
    /// Applies the completion rules, consuming the in-progress record.
    ///
    /// Content stands in for a missing summary (and is then cleared), and the
    /// updated date stands in for a missing publication date.
    pub(crate) fn finalize(mut self) -> Self {
        if self.summary.is_none() {
            self.summary = self.content.take();
        }
        if self.published.is_none() {
            self.published = self.updated;
        }
        self
    }
}

impl fmt::Display for FeedInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedInfo: {}", self.title.as_deref().unwrap_or(""))
    }
}

impl fmt::Display for FeedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedItem: {}", self.title.as_deref().unwrap_or(""))?;
        if let Some(date) = self.published {
            write!(f, " - {}", date.to_rfc3339())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_finalize_moves_content_into_missing_summary() {
        let item = FeedItem {
            content: Some("<p>body</p>".into()),
            ..Default::default()
        }
        .finalize();
        assert_eq!(item.summary.as_deref(), Some("<p>body</p>"));
        assert_eq!(item.content, None);
    }

    #[test]
    fn test_finalize_keeps_both_when_summary_present() {
        let item = FeedItem {
            summary: Some("short".into()),
            content: Some("long".into()),
            ..Default::default()
        }
        .finalize();
        assert_eq!(item.summary.as_deref(), Some("short"));
        assert_eq!(item.content.as_deref(), Some("long"));
    }

    #[test]
    fn test_finalize_published_falls_back_to_updated() {
        let updated = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let item = FeedItem {
            updated: Some(updated),
            ..Default::default()
        }
        .finalize();
        assert_eq!(item.published, Some(updated));
        assert_eq!(item.updated, Some(updated));
    }

    #[test]
    fn test_finalize_keeps_existing_published() {
        let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let item = FeedItem {
            published: Some(published),
            updated: Some(updated),
            ..Default::default()
        }
        .finalize();
        assert_eq!(item.published, Some(published));
    }

    #[test]
    fn test_display() {
        let info = FeedInfo {
            title: Some("News".into()),
            ..Default::default()
        };
        assert_eq!(info.to_string(), "FeedInfo: News");

        let item = FeedItem {
            title: Some("Hello".into()),
            published: Some(Utc.with_ymd_and_hms(2002, 5, 19, 15, 21, 36).unwrap()),
            ..Default::default()
        };
        assert_eq!(item.to_string(), "FeedItem: Hello - 2002-05-19T15:21:36+00:00");
    }
}
