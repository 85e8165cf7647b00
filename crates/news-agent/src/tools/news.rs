//! Tool for fetching price-relevant crypto news

use crate::aggregator::NewsAggregator;
use async_trait::async_trait;
use news_core::Result as CoreResult;
use news_llm::tools::schema;
use news_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

/// Name under which the tool is registered
pub const FETCH_CRYPTO_NEWS: &str = "fetch_crypto_news";

/// Runs the news pipeline for a list of symbols and returns the items as JSON
#[derive(Clone)]
pub struct FetchCryptoNewsTool {
    aggregator: NewsAggregator,
}

#[derive(Debug, Deserialize)]
struct FetchParams {
    coins: Vec<String>,
}

impl FetchCryptoNewsTool {
    pub fn new(aggregator: NewsAggregator) -> Self {
        Self { aggregator }
    }
}

#[async_trait]
impl Tool for FetchCryptoNewsTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: FetchParams = serde_json::from_value(params)
            .map_err(|e| news_core::Error::InvalidRequest(format!("Invalid parameters: {e}")))?;

        let items = self.aggregator.fetch_crypto_news(&params.coins).await?;
        serde_json::to_value(items).map_err(|e| news_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        FETCH_CRYPTO_NEWS
    }

    fn description(&self) -> &str {
        "Fetch and analyze cryptocurrency news for potential price impacts"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "coins": schema::array(
                    "List of cryptocurrency symbols to fetch news for",
                    schema::item("string"),
                ),
            }),
            vec!["coins"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewsConfig;
    use crate::feed::MockFeedFetcher;
    use crate::processor::FeedProcessor;
    use crate::relevance::RelevanceClassifier;
    use crate::test_support::{ScriptedProvider, entry, feed};
    use std::sync::Arc;

    fn tool(fetcher: MockFeedFetcher, replies: Vec<&str>) -> FetchCryptoNewsTool {
        let config = Arc::new(NewsConfig::default());
        let provider = Arc::new(ScriptedProvider::new(replies));
        let classifier = RelevanceClassifier::new(provider, &config);
        let processor = FeedProcessor::new(Arc::new(fetcher), classifier, &config);
        FetchCryptoNewsTool::new(NewsAggregator::new(processor, config))
    }

    #[test]
    fn test_descriptor() {
        let tool = tool(MockFeedFetcher::new(), vec![]);
        let definition = tool.definition();

        assert_eq!(definition.name, "fetch_crypto_news");
        assert_eq!(
            definition.description,
            "Fetch and analyze cryptocurrency news for potential price impacts"
        );
        assert_eq!(definition.input_schema["type"], "object");
        assert_eq!(definition.input_schema["properties"]["coins"]["type"], "array");
        assert_eq!(
            definition.input_schema["properties"]["coins"]["items"]["type"],
            "string"
        );
        assert_eq!(definition.input_schema["required"], json!(["coins"]));
    }

    #[tokio::test]
    async fn test_execute_returns_items() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(feed(vec![entry("Solana outage", 2)])));

        let value = tool(fetcher, vec!["Outage may weigh on SOL."])
            .execute(json!({"coins": ["SOL"]}))
            .await
            .unwrap();

        assert_eq!(
            value,
            json!([{
                "Coin": "SOL",
                "Title": "Solana outage",
                "Summary": "Outage may weigh on SOL.",
                "Link": "https://news.example.com/solana-outage",
            }])
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_params() {
        let result = tool(MockFeedFetcher::new(), vec![])
            .execute(json!({"symbols": "BTC"}))
            .await;
        assert!(matches!(result, Err(news_core::Error::InvalidRequest(_))));
    }
}
