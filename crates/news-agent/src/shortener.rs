//! Link shortening for chat reports

use crate::error::{NewsError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// TinyURL's anonymous creation endpoint
pub const TINYURL_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

/// Turns a long URL into a short one
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Result<String>;
}

/// Shortens links through TinyURL
#[derive(Debug, Clone)]
pub struct TinyUrlShortener {
    client: reqwest::Client,
    endpoint: String,
}

impl TinyUrlShortener {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: TINYURL_ENDPOINT.to_string(),
        })
    }

    /// Point at a different TinyURL-compatible endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl LinkShortener for TinyUrlShortener {
    async fn shorten(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Shortener(format!("HTTP {status}")));
        }

        let short = response.text().await?.trim().to_string();
        if short.is_empty() {
            return Err(NewsError::Shortener("empty response".to_string()));
        }

        debug!(%url, %short, "Shortened link");
        Ok(short)
    }
}

/// Returns links unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShortener;

#[async_trait]
impl LinkShortener for PassthroughShortener {
    async fn shorten(&self, url: &str) -> Result<String> {
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough() {
        let link = "https://news.google.com/rss/articles/abc123?oc=5";
        assert_eq!(PassthroughShortener.shorten(link).await.unwrap(), link);
    }

    #[test]
    fn test_tinyurl_endpoint_override() {
        let shortener = TinyUrlShortener::new(Duration::from_secs(5))
            .unwrap()
            .with_endpoint("http://localhost:9/create");
        assert_eq!(shortener.endpoint, "http://localhost:9/create");
    }

    #[tokio::test]
    async fn test_tinyurl_unreachable_endpoint_errors() {
        let shortener = TinyUrlShortener::new(Duration::from_secs(2))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/create");
        assert!(shortener.shorten("https://example.com").await.is_err());
    }
}
