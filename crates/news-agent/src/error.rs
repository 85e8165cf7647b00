//! Error types for news operations

use thiserror::Error;

/// News pipeline errors
#[derive(Debug, Error)]
pub enum NewsError {
    /// Feed could not be retrieved
    #[error("Feed error for {url}: {reason}")]
    Feed {
        url: String,
        reason: String,
    },

    /// Feed body was not a recognisable RSS or Atom document
    #[error("Failed to parse feed: {0}")]
    FeedParse(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Language model call failed
    #[error("LLM error: {0}")]
    Llm(#[from] news_llm::LLMError),

    /// Prompt template failed to compile or render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Link shortening failed
    #[error("Link shortener error: {0}")]
    Shortener(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request could not be interpreted
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, NewsError>;

impl NewsError {
    /// Messages of the underlying errors, outermost first
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }
}

impl From<NewsError> for news_core::Error {
    fn from(err: NewsError) -> Self {
        match err {
            NewsError::InvalidRequest(msg) => news_core::Error::InvalidRequest(msg),
            other => news_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}

impl From<news_utils::EnvError> for NewsError {
    fn from(err: news_utils::EnvError) -> Self {
        NewsError::Config(err.to_string())
    }
}
