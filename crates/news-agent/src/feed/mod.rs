//! Feed retrieval
//!
//! [`FeedFetcher`] is the seam between the pipeline and the network. The
//! default [`HttpFeedFetcher`] downloads a document with reqwest and parses it
//! with feed-rs, which covers every RSS dialect as well as Atom.

mod rss;

pub use rss::{HttpFeedFetcher, parse_feed};

use crate::error::Result;
use async_trait::async_trait;

/// One article from a feed
///
/// Timestamps are RFC 3339 strings; interpretation belongs to
/// [`TimeWindow`](crate::window::TimeWindow).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published: Option<String>,
    pub updated: Option<String>,
}

impl FeedEntry {
    /// Publication time, falling back to the last update time
    pub fn timestamp(&self) -> Option<&str> {
        self.published.as_deref().or(self.updated.as_deref())
    }
}

/// A parsed feed, entries in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

/// Retrieves and parses a feed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the feed at `url`
    async fn fetch(&self, url: &str) -> Result<Feed>;
}
