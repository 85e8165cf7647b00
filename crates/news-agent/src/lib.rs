//! Crypto news agent
//!
//! Given a chat prompt that mentions cryptocurrency tickers, this crate finds
//! recent news that could move those coins' prices and answers with a short
//! report. It includes:
//!
//! - Ticker detection against a configurable coin table
//! - RSS and Atom feed retrieval (Google News search by default)
//! - A recency window on article timestamps
//! - LLM relevance screening with a per-coin cap
//! - Report formatting with shortened links
//! - A `fetch_crypto_news` tool descriptor for orchestrators
//!
//! # Example
//!
//! ```rust,ignore
//! use news_agent::{NewsAgent, NewsConfig};
//! use news_core::{ChatAgent, ChatRequest};
//! use news_llm::providers::OpenAIProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(OpenAIProvider::from_env()?);
//!     let config = NewsConfig::builder().from_env().build()?;
//!     let agent = NewsAgent::new(provider, config)?;
//!
//!     let response = agent.chat(ChatRequest::new("Any news on BTC?")).await;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod aggregator;
pub mod coins;
pub mod config;
pub mod error;
pub mod feed;
pub mod processor;
pub mod prompts;
pub mod relevance;
pub mod shortener;
pub mod text;
pub mod tools;
pub mod window;

#[cfg(test)]
mod test_support;

pub use agent::NewsAgent;
pub use aggregator::{NewsAggregator, NewsItem};
pub use coins::CoinTable;
pub use config::{NewsConfig, lookback_from_hours};
pub use error::{NewsError, Result};
pub use feed::{Feed, FeedEntry, FeedFetcher, HttpFeedFetcher};
pub use processor::{FeedProcessor, RelevanceResult};
pub use relevance::{RelevanceClassifier, Verdict};
pub use shortener::{LinkShortener, PassthroughShortener, TinyUrlShortener};
pub use tools::FetchCryptoNewsTool;
pub use window::TimeWindow;
