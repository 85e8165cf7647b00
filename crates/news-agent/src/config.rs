//! Configuration for the news pipeline
//!
//! Everything the pipeline treats as static lives in one immutable
//! [`NewsConfig`] built at startup and shared by `Arc`.

use crate::coins::CoinTable;
use crate::error::{NewsError, Result};
use crate::prompts::RELEVANCE_PROMPT;
use news_utils::{env_parse, env_string};
use std::time::Duration;

/// Placeholder substituted with the coin's display name in feed URLs
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Google News RSS search
pub const GOOGLE_NEWS_URL_TEMPLATE: &str =
    "https://news.google.com/rss/search?q={query}&hl=en-US&gl=US&ceid=US:en";

const SECS_PER_HOUR: u64 = 3600;

/// Convert a user-supplied hour count into a lookback duration
pub fn lookback_from_hours(hours: u64) -> Result<Duration> {
    hours
        .checked_mul(SECS_PER_HOUR)
        .map(Duration::from_secs)
        .ok_or_else(|| NewsError::Config(format!("lookback of {hours} hours is too large")))
}

/// Configuration for the news pipeline
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// How far back an article may be published and still count
    pub lookback: Duration,

    /// Maximum accepted articles per coin per request
    pub articles_per_coin: usize,

    /// Model identifier passed to the LLM provider
    pub model: String,

    /// Token limit for each relevance completion
    pub llm_max_tokens: usize,

    /// Sampling temperature for relevance completions
    pub llm_temperature: f32,

    /// Feed URL with a `{query}` placeholder
    pub feed_url_template: String,

    /// Timeout for feed and shortener HTTP requests
    pub request_timeout: Duration,

    /// Recognised coin symbols
    pub coins: CoinTable,

    /// MiniJinja template for the relevance check (`coin`, `title`, `content`)
    pub relevance_prompt: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            lookback: Duration::from_secs(24 * 3600),
            articles_per_coin: 1,
            model: "gpt-4o-mini".to_string(),
            llm_max_tokens: 150,
            llm_temperature: 0.3,
            feed_url_template: GOOGLE_NEWS_URL_TEMPLATE.to_string(),
            request_timeout: Duration::from_secs(30),
            coins: CoinTable::default(),
            relevance_prompt: RELEVANCE_PROMPT.to_string(),
        }
    }
}

impl NewsConfig {
    /// Create a new configuration builder
    pub fn builder() -> NewsConfigBuilder {
        NewsConfigBuilder::default()
    }

    /// Apply environment overrides on top of this configuration
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `NEWS_LOOKBACK_HOURS` | `lookback` |
    /// | `NEWS_ARTICLES_PER_COIN` | `articles_per_coin` |
    /// | `OPENAI_MODEL` | `model` |
    /// | `NEWS_LLM_MAX_TOKENS` | `llm_max_tokens` |
    /// | `NEWS_LLM_TEMPERATURE` | `llm_temperature` |
    /// | `NEWS_FEED_URL_TEMPLATE` | `feed_url_template` |
    /// | `NEWS_REQUEST_TIMEOUT_SECS` | `request_timeout` |
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(hours) = env_parse::<u64>("NEWS_LOOKBACK_HOURS")? {
            self.lookback = lookback_from_hours(hours)?;
        }
        if let Some(cap) = env_parse("NEWS_ARTICLES_PER_COIN")? {
            self.articles_per_coin = cap;
        }
        if let Some(model) = env_string("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(tokens) = env_parse("NEWS_LLM_MAX_TOKENS")? {
            self.llm_max_tokens = tokens;
        }
        if let Some(temperature) = env_parse("NEWS_LLM_TEMPERATURE")? {
            self.llm_temperature = temperature;
        }
        if let Some(template) = env_string("NEWS_FEED_URL_TEMPLATE") {
            self.feed_url_template = template;
        }
        if let Some(secs) = env_parse("NEWS_REQUEST_TIMEOUT_SECS")? {
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.articles_per_coin == 0 {
            return Err(NewsError::Config(
                "articles_per_coin must be greater than 0".to_string(),
            ));
        }

        if self.lookback.is_zero() {
            return Err(NewsError::Config("lookback must be greater than 0".to_string()));
        }

        // reports print the window in hours
        if self.lookback.as_secs() % SECS_PER_HOUR != 0 || self.lookback.subsec_nanos() != 0 {
            return Err(NewsError::Config(format!(
                "lookback must be a whole number of hours, got {}s",
                self.lookback.as_secs_f64()
            )));
        }

        if self.llm_max_tokens == 0 {
            return Err(NewsError::Config(
                "llm_max_tokens must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(NewsError::Config(format!(
                "llm_temperature must be within 0.0..=2.0, got {}",
                self.llm_temperature
            )));
        }

        if !self.feed_url_template.contains(QUERY_PLACEHOLDER) {
            return Err(NewsError::Config(format!(
                "feed_url_template must contain {QUERY_PLACEHOLDER}"
            )));
        }

        let env = minijinja::Environment::new();
        env.template_from_str(&self.relevance_prompt)?;

        Ok(())
    }

    /// Lookback window in whole hours, as shown to users
    pub fn lookback_hours(&self) -> u64 {
        self.lookback.as_secs() / SECS_PER_HOUR
    }

    /// Feed URL for a coin display name
    ///
    /// The name is form-encoded, so "Bitcoin Cash" becomes `Bitcoin+Cash`.
    pub fn feed_url(&self, coin_name: &str) -> String {
        let query: String = url::form_urlencoded::byte_serialize(coin_name.as_bytes()).collect();
        self.feed_url_template.replace(QUERY_PLACEHOLDER, &query)
    }
}

/// Builder for NewsConfig
#[derive(Debug, Default)]
pub struct NewsConfigBuilder {
    lookback: Option<Duration>,
    articles_per_coin: Option<usize>,
    model: Option<String>,
    llm_max_tokens: Option<usize>,
    llm_temperature: Option<f32>,
    feed_url_template: Option<String>,
    request_timeout: Option<Duration>,
    coins: Option<CoinTable>,
    relevance_prompt: Option<String>,
    from_env: bool,
}

impl NewsConfigBuilder {
    /// Set the recency window
    pub fn lookback(mut self, lookback: Duration) -> Self {
        self.lookback = Some(lookback);
        self
    }

    /// Set the per-coin article cap
    pub fn articles_per_coin(mut self, cap: usize) -> Self {
        self.articles_per_coin = Some(cap);
        self
    }

    /// Set the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the completion token limit
    pub fn llm_max_tokens(mut self, tokens: usize) -> Self {
        self.llm_max_tokens = Some(tokens);
        self
    }

    /// Set the sampling temperature
    pub fn llm_temperature(mut self, temperature: f32) -> Self {
        self.llm_temperature = Some(temperature);
        self
    }

    /// Set the feed URL template
    pub fn feed_url_template(mut self, template: impl Into<String>) -> Self {
        self.feed_url_template = Some(template.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Replace the coin table
    pub fn coins(mut self, coins: CoinTable) -> Self {
        self.coins = Some(coins);
        self
    }

    /// Replace the relevance prompt template
    pub fn relevance_prompt(mut self, template: impl Into<String>) -> Self {
        self.relevance_prompt = Some(template.into());
        self
    }

    /// Apply environment overrides before explicit builder values
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<NewsConfig> {
        let mut base = NewsConfig::default();
        if self.from_env {
            base = base.with_env()?;
        }

        let config = NewsConfig {
            lookback: self.lookback.unwrap_or(base.lookback),
            articles_per_coin: self.articles_per_coin.unwrap_or(base.articles_per_coin),
            model: self.model.unwrap_or(base.model),
            llm_max_tokens: self.llm_max_tokens.unwrap_or(base.llm_max_tokens),
            llm_temperature: self.llm_temperature.unwrap_or(base.llm_temperature),
            feed_url_template: self.feed_url_template.unwrap_or(base.feed_url_template),
            request_timeout: self.request_timeout.unwrap_or(base.request_timeout),
            coins: self.coins.unwrap_or(base.coins),
            relevance_prompt: self.relevance_prompt.unwrap_or(base.relevance_prompt),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NewsConfig::default();
        assert_eq!(config.lookback_hours(), 24);
        assert_eq!(config.articles_per_coin, 1);
        assert_eq!(config.llm_max_tokens, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = NewsConfig::builder()
            .articles_per_coin(3)
            .lookback(Duration::from_secs(6 * 3600))
            .model("local-model")
            .build()
            .unwrap();

        assert_eq!(config.articles_per_coin, 3);
        assert_eq!(config.lookback_hours(), 6);
        assert_eq!(config.model, "local-model");
    }

    #[test]
    fn test_validation_rejects_zero_cap() {
        let result = NewsConfig::builder().articles_per_coin(0).build();
        assert!(matches!(result, Err(NewsError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        let config = NewsConfig {
            llm_temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_template_without_placeholder() {
        let result = NewsConfig::builder()
            .feed_url_template("https://example.com/rss")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_broken_prompt() {
        let result = NewsConfig::builder()
            .relevance_prompt("{{ coin ")
            .build();
        assert!(matches!(result, Err(NewsError::Template(_))));
    }

    #[test]
    fn test_validation_rejects_partial_hours() {
        let result = NewsConfig::builder()
            .lookback(Duration::from_secs(90 * 60))
            .build();
        assert!(matches!(result, Err(NewsError::Config(_))));

        let result = NewsConfig::builder()
            .lookback(Duration::from_millis(3_600_500))
            .build();
        assert!(matches!(result, Err(NewsError::Config(_))));
    }

    #[test]
    fn test_lookback_from_hours() {
        assert_eq!(lookback_from_hours(6).unwrap(), Duration::from_secs(6 * 3600));
        assert!(matches!(
            lookback_from_hours(u64::MAX),
            Err(NewsError::Config(_))
        ));
    }

    #[test]
    fn test_feed_url_encodes_name() {
        let config = NewsConfig::default();
        assert_eq!(
            config.feed_url("Bitcoin Cash"),
            "https://news.google.com/rss/search?q=Bitcoin+Cash&hl=en-US&gl=US&ceid=US:en"
        );
    }

    #[test]
    fn test_env_overrides() {
        unsafe {
            std::env::set_var("NEWS_LOOKBACK_HOURS", "12");
            std::env::set_var("NEWS_ARTICLES_PER_COIN", "4");
            std::env::set_var("NEWS_LLM_TEMPERATURE", "0.1");
        }

        let config = NewsConfig::builder()
            .from_env()
            .articles_per_coin(2)
            .build()
            .unwrap();

        assert_eq!(config.lookback_hours(), 12);
        // explicit builder value wins over the environment
        assert_eq!(config.articles_per_coin, 2);
        assert!((config.llm_temperature - 0.1).abs() < f32::EPSILON);

        unsafe {
            std::env::set_var("NEWS_ARTICLES_PER_COIN", "many");
        }
        assert!(NewsConfig::default().with_env().is_err());

        unsafe {
            std::env::set_var("NEWS_ARTICLES_PER_COIN", "4");
            std::env::set_var("NEWS_LOOKBACK_HOURS", u64::MAX.to_string());
        }
        assert!(matches!(
            NewsConfig::default().with_env(),
            Err(NewsError::Config(_))
        ));

        unsafe {
            std::env::remove_var("NEWS_LOOKBACK_HOURS");
            std::env::remove_var("NEWS_ARTICLES_PER_COIN");
            std::env::remove_var("NEWS_LLM_TEMPERATURE");
        }
    }
}
