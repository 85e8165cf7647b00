//! Per-feed pipeline: fetch, window filter, classify, cap

use crate::config::NewsConfig;
use crate::error::Result;
use crate::feed::FeedFetcher;
use crate::relevance::{RelevanceClassifier, Verdict};
use crate::text::clean_html;
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// An accepted article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceResult {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Link")]
    pub link: String,
}

/// Turns one feed into at most `articles_per_coin` relevant articles
#[derive(Clone)]
pub struct FeedProcessor {
    fetcher: Arc<dyn FeedFetcher>,
    classifier: RelevanceClassifier,
    window: TimeWindow,
    cap: usize,
}

impl FeedProcessor {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        classifier: RelevanceClassifier,
        config: &NewsConfig,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            window: TimeWindow::new(config.lookback),
            cap: config.articles_per_coin,
        }
    }

    /// Process the feed at `url` for `coin_name`
    ///
    /// Entries are visited in feed order. Out-of-window entries are skipped
    /// without a model call; once `cap` articles are accepted the remaining
    /// entries are left untouched.
    #[instrument(skip(self))]
    pub async fn process(&self, url: &str, coin_name: &str) -> Result<Vec<RelevanceResult>> {
        let feed = self.fetcher.fetch(url).await?;
        info!(entries = feed.entries.len(), "Fetched feed");

        let mut results = Vec::new();
        for entry in &feed.entries {
            if results.len() >= self.cap {
                break;
            }

            if !self.window.contains(entry.timestamp()) {
                info!(title = %entry.title, timestamp = ?entry.timestamp(), "Skipping entry outside window");
                continue;
            }

            let title = clean_html(&entry.title);
            let content = clean_html(&entry.summary);

            match self.classifier.classify(coin_name, &title, &content).await? {
                Verdict::Relevant { summary } => {
                    info!(%title, "Accepted article");
                    results.push(RelevanceResult {
                        title,
                        summary,
                        link: entry.link.clone(),
                    });
                }
                Verdict::NotRelevant { reason } => {
                    info!(%title, %reason, "Rejected article");
                }
            }
        }

        Ok(results)
    }
}
