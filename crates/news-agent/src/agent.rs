//! Chat-facing news agent

use crate::aggregator::{NewsAggregator, NewsItem};
use crate::config::NewsConfig;
use crate::error::{NewsError, Result};
use crate::feed::{FeedFetcher, HttpFeedFetcher};
use crate::processor::FeedProcessor;
use crate::prompts::{
    ERROR_PREFIX, MISSING_PARAMETERS, NO_SYMBOLS, no_news_message, report_header,
};
use crate::relevance::RelevanceClassifier;
use crate::shortener::{LinkShortener, TinyUrlShortener};
use crate::tools::FetchCryptoNewsTool;
use async_trait::async_trait;
use news_core::{ChatAgent, ChatRequest, ChatResponse};
use news_llm::{LLMProvider, ToolDefinition};
use news_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Answers chat requests with a report of price-relevant crypto news
///
/// The agent finds ticker symbols in the prompt, runs the news pipeline for
/// each of them and formats the accepted articles as a numbered report with
/// shortened links. Every outcome, failures included, is an assistant
/// response.
pub struct NewsAgent {
    config: Arc<NewsConfig>,
    aggregator: NewsAggregator,
    shortener: Arc<dyn LinkShortener>,
    tools: ToolRegistry,
}

impl NewsAgent {
    /// Create an agent that fetches feeds over HTTP and shortens links with TinyURL
    pub fn new(provider: Arc<dyn LLMProvider>, config: NewsConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFeedFetcher::new(config.request_timeout)?);
        let shortener = Arc::new(TinyUrlShortener::new(config.request_timeout)?);
        Ok(Self::with_components(
            Arc::new(config),
            fetcher,
            provider,
            shortener,
        ))
    }

    /// Create an agent from explicit collaborators
    pub fn with_components(
        config: Arc<NewsConfig>,
        fetcher: Arc<dyn FeedFetcher>,
        provider: Arc<dyn LLMProvider>,
        shortener: Arc<dyn LinkShortener>,
    ) -> Self {
        let classifier = RelevanceClassifier::new(provider, &config);
        let processor = FeedProcessor::new(fetcher, classifier, &config);
        let aggregator = NewsAggregator::new(processor, config.clone());

        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(FetchCryptoNewsTool::new(aggregator.clone())));

        Self {
            config,
            aggregator,
            shortener,
            tools,
        }
    }

    /// Replace the link shortener
    pub fn with_shortener(mut self, shortener: Arc<dyn LinkShortener>) -> Self {
        self.shortener = shortener;
        self
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Tool descriptors this agent offers
    pub fn tools_provided(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    /// Tool descriptors in OpenAI function-tool form
    pub fn openai_tools(&self) -> Vec<Value> {
        self.tools
            .definitions()
            .iter()
            .map(ToolDefinition::to_openai_function)
            .collect()
    }

    /// Execute one of the advertised tools
    pub async fn call_tool(&self, name: &str, params: Value) -> news_core::Result<Value> {
        self.tools.execute(name, params).await
    }

    /// Relevant news for `coins`, grouped by coin in input order
    pub async fn fetch_crypto_news(&self, coins: &[String]) -> Result<Vec<NewsItem>> {
        self.aggregator.fetch_crypto_news(coins).await
    }

    /// Serve a request, returning the response text
    ///
    /// Input-shape problems that have a fixed reply are `Ok`; everything
    /// else is an `Err` for [`ChatAgent::chat`] to report.
    #[instrument(skip(self, request), fields(conversation_id = ?request.conversation_id))]
    pub async fn try_chat(&self, request: &ChatRequest) -> Result<String> {
        let Some(prompt) = &request.prompt else {
            return Ok(MISSING_PARAMETERS.to_string());
        };
        let text = prompt.text().ok_or_else(|| {
            NewsError::InvalidRequest(
                "prompt must be a string or an object with a string content".to_string(),
            )
        })?;

        let coins = self.config.coins.extract_symbols(text);
        if coins.is_empty() {
            return Ok(NO_SYMBOLS.to_string());
        }
        info!(?coins, "Symbols found in prompt");

        let items = self.fetch_crypto_news(&coins).await?;
        if items.is_empty() {
            return Ok(no_news_message(self.config.lookback_hours()));
        }

        self.format_report(&items).await
    }

    async fn format_report(&self, items: &[NewsItem]) -> Result<String> {
        let mut report = report_header(self.config.lookback_hours());

        for (index, item) in items.iter().enumerate() {
            let name = self.config.coins.display_name(&item.coin);
            let short = self.shortener.shorten(&item.result.link).await?;
            report.push_str(&format!(
                "{}. ***{name} News***:\n{}\n{}\nRead more: {short}\n\n",
                index + 1,
                item.result.title,
                item.result.summary,
            ));
        }

        Ok(report)
    }
}

#[async_trait]
impl ChatAgent for NewsAgent {
    async fn chat(&self, request: ChatRequest) -> ChatResponse {
        match self.try_chat(&request).await {
            Ok(content) => ChatResponse::assistant(content),
            Err(e) => {
                error!(
                    error = %e,
                    causes = ?e.causes(),
                    details = ?e,
                    "Error handling chat request"
                );
                ChatResponse::assistant(format!("{ERROR_PREFIX}{e}"))
            }
        }
    }

    fn name(&self) -> &str {
        "crypto news agent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MockFeedFetcher;
    use crate::shortener::{MockLinkShortener, PassthroughShortener};
    use crate::test_support::{ScriptedProvider, entry, feed};
    use serde_json::json;

    fn agent(
        fetcher: MockFeedFetcher,
        provider: Arc<ScriptedProvider>,
        shortener: Arc<dyn LinkShortener>,
    ) -> NewsAgent {
        NewsAgent::with_components(
            Arc::new(NewsConfig::default()),
            Arc::new(fetcher),
            provider,
            shortener,
        )
    }

    fn idle_agent() -> NewsAgent {
        let mut fetcher = MockFeedFetcher::new();
        fetcher.expect_fetch().times(0);
        agent(
            fetcher,
            Arc::new(ScriptedProvider::new(Vec::<String>::new())),
            Arc::new(PassthroughShortener),
        )
    }

    #[tokio::test]
    async fn test_missing_prompt() {
        let agent = idle_agent();

        let response = agent.chat(ChatRequest::default()).await;
        assert_eq!(response.content, "Missing required parameters");
        assert_eq!(response.role, "assistant");
        assert!(response.next_turn_agent.is_none());

        let request = ChatRequest::from_value(json!({"prompt": null})).unwrap();
        assert_eq!(agent.chat(request).await.content, "Missing required parameters");
    }

    #[tokio::test]
    async fn test_no_symbols_never_fetches() {
        let agent = idle_agent();

        let response = agent.chat(ChatRequest::new("any news today?")).await;
        assert_eq!(
            response.content,
            "I couldn't identify any cryptocurrency symbols in your message. Please specify the cryptocurrencies you want news for."
        );
    }

    #[tokio::test]
    async fn test_malformed_prompt_is_an_error() {
        let agent = idle_agent();

        let request = ChatRequest::from_value(json!({"prompt": 42})).unwrap();
        let response = agent.chat(request).await;
        assert!(response.content.starts_with("An error occurred: Invalid request:"));
    }

    #[tokio::test]
    async fn test_no_relevant_news() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(feed(vec![entry("Celebrity buys NFT", 1)])));
        let provider = Arc::new(ScriptedProvider::new(["NOT RELEVANT: off-topic"]));

        let response = agent(fetcher, provider, Arc::new(PassthroughShortener))
            .chat(ChatRequest::new("BTC?"))
            .await;
        assert_eq!(
            response.content,
            "No relevant news found for the specified cryptocurrencies in the last 24 hours."
        );
    }

    #[tokio::test]
    async fn test_report_format() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url.contains("q=Bitcoin&"))
            .returning(|_| Ok(feed(vec![entry("Bitcoin ETF", 1)])));
        fetcher
            .expect_fetch()
            .withf(|url| url.contains("q=Ethereum&"))
            .returning(|_| Ok(feed(vec![entry("Ethereum upgrade", 3)])));

        let mut shortener = MockLinkShortener::new();
        shortener.expect_shorten().times(2).returning(|url| {
            let slug = url.rsplit('/').next().unwrap_or_default();
            Ok(format!("https://tinyurl.com/{slug}"))
        });

        let provider = Arc::new(ScriptedProvider::new(["BTC summary", "ETH summary"]));
        let agent = agent(fetcher, provider, Arc::new(shortener));

        let response = agent
            .chat(ChatRequest::new("What's new with btc and Eth?").with_conversation_id("c-1"))
            .await;

        assert_eq!(
            response.content,
            "Here are the latest news items relevant to changes in price movement of the mentioned tokens in the last 24 hours:\n\n\
             1. ***Bitcoin News***:\nBitcoin ETF\nBTC summary\nRead more: https://tinyurl.com/bitcoin-etf\n\n\
             2. ***Ethereum News***:\nEthereum upgrade\nETH summary\nRead more: https://tinyurl.com/ethereum-upgrade\n\n"
        );
    }

    #[tokio::test]
    async fn test_object_prompt() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(feed(vec![entry("Dogecoin rally", 1)])));
        let provider = Arc::new(ScriptedProvider::new(["Meme demand."]));

        let request =
            ChatRequest::from_value(json!({"prompt": {"role": "user", "content": "doge"}})).unwrap();
        let response = agent(fetcher, provider, Arc::new(PassthroughShortener))
            .chat(request)
            .await;

        assert!(response.content.contains("1. ***Dogecoin News***:\nDogecoin rally\nMeme demand."));
        assert!(response.content.contains("Read more: https://news.example.com/dogecoin-rally"));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_error_response() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Ok(feed(vec![entry("Bitcoin ETF", 1)])));

        let response = agent(
            fetcher,
            Arc::new(ScriptedProvider::failing()),
            Arc::new(PassthroughShortener),
        )
        .chat(ChatRequest::new("BTC"))
        .await;

        assert!(response.content.starts_with("An error occurred: LLM error:"));
        assert_eq!(response.role, "assistant");
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_cause() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Ok(feed(vec![entry("Bitcoin ETF", 1)])));

        let err = agent(
            fetcher,
            Arc::new(ScriptedProvider::failing()),
            Arc::new(PassthroughShortener),
        )
        .try_chat(&ChatRequest::new("BTC"))
        .await
        .unwrap_err();

        assert!(matches!(err, NewsError::Llm(_)));
        let causes = err.causes();
        assert_eq!(causes.len(), 1);
        assert!(causes[0].contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_shortener_failure_becomes_error_response() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Ok(feed(vec![entry("Bitcoin ETF", 1)])));
        let mut shortener = MockLinkShortener::new();
        shortener
            .expect_shorten()
            .returning(|_| Err(NewsError::Shortener("HTTP 429".to_string())));

        let response = agent(
            fetcher,
            Arc::new(ScriptedProvider::new(["ok"])),
            Arc::new(shortener),
        )
        .chat(ChatRequest::new("BTC"))
        .await;

        assert_eq!(
            response.content,
            "An error occurred: Link shortener error: HTTP 429"
        );
    }

    #[tokio::test]
    async fn test_tools_provided() {
        let agent = idle_agent();

        let definitions = agent.tools_provided();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "fetch_crypto_news");

        let openai = agent.openai_tools();
        assert_eq!(openai[0]["type"], "function");
        assert_eq!(openai[0]["function"]["name"], "fetch_crypto_news");
        assert_eq!(
            openai[0]["function"]["parameters"]["required"],
            json!(["coins"])
        );
    }

    #[tokio::test]
    async fn test_call_tool() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Ok(feed(vec![entry("Cardano fork", 1)])));
        let agent = agent(
            fetcher,
            Arc::new(ScriptedProvider::new(["Fork may add volatility."])),
            Arc::new(PassthroughShortener),
        );

        let value = agent
            .call_tool("fetch_crypto_news", json!({"coins": ["ADA"]}))
            .await
            .unwrap();
        assert_eq!(value[0]["Coin"], "ADA");
        assert_eq!(value[0]["Summary"], "Fork may add volatility.");

        let unknown = agent.call_tool("get_price", json!({})).await;
        assert!(matches!(unknown, Err(news_core::Error::InvalidRequest(_))));
    }
}
