//! Multi-coin aggregation

use crate::config::NewsConfig;
use crate::error::Result;
use crate::processor::{FeedProcessor, RelevanceResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// A relevant article tagged with the symbol it was found for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(rename = "Coin")]
    pub coin: String,
    #[serde(flatten)]
    pub result: RelevanceResult,
}

/// Runs the feed processor for each requested coin in turn
#[derive(Clone)]
pub struct NewsAggregator {
    processor: FeedProcessor,
    config: Arc<NewsConfig>,
}

impl NewsAggregator {
    pub fn new(processor: FeedProcessor, config: Arc<NewsConfig>) -> Self {
        Self { processor, config }
    }

    /// Collect relevant news for `coins`, grouped by coin in input order
    ///
    /// Unknown symbols are searched under the symbol itself. Repeated symbols
    /// are processed again.
    #[instrument(skip(self))]
    pub async fn fetch_crypto_news(&self, coins: &[String]) -> Result<Vec<NewsItem>> {
        let mut items = Vec::new();

        for coin in coins {
            let name = self.config.coins.display_name(coin);
            let url = self.config.feed_url(&name);
            info!(%coin, %name, %url, "Fetching news");

            let results = self.processor.process(&url, &name).await?;
            info!(%coin, count = results.len(), "Relevant articles");

            items.extend(
                results
                    .into_iter()
                    .take(self.config.articles_per_coin)
                    .map(|result| NewsItem {
                        coin: coin.clone(),
                        result,
                    }),
            );
        }

        Ok(items)
    }
}
