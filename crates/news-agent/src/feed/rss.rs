//! Feed document parsing, and the reqwest-backed fetcher

use super::{Feed, FeedEntry, FeedFetcher};
use crate::error::{NewsError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = concat!("news-bot/", env!("CARGO_PKG_VERSION"));

static NAMED_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").expect("valid entity pattern"));

/// Fetches feeds over HTTP
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Feed> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(%status, "Feed response");

        if !status.is_success() {
            return Err(NewsError::Feed {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Feed body received");
        parse_feed(&body)
    }
}

/// Parse an RSS (0.9x, 1.0, 2.0), Atom or JSON Feed document
///
/// Entries with neither a title nor a link are dropped. Timestamps are
/// normalised to RFC 3339.
pub fn parse_feed(document: &str) -> Result<Feed> {
    let document = resolve_html_entities(document);
    let parsed = feed_rs::parser::parse(document.as_bytes())
        .map_err(|e| NewsError::FeedParse(e.to_string()))?;

    let entries = parsed
        .entries
        .into_iter()
        .map(into_entry)
        .filter(|entry| {
            let keep = !(entry.title.is_empty() && entry.link.is_empty());
            if !keep {
                warn!("Skipping feed entry without title or link");
            }
            keep
        })
        .collect();

    Ok(Feed {
        title: non_blank(parsed.title.map(|t| t.content)),
        entries,
    })
}

fn into_entry(entry: model::Entry) -> FeedEntry {
    let summary = entry
        .summary
        .map(|t| t.content)
        .or_else(|| entry.content.and_then(|c| c.body));

    FeedEntry {
        title: trimmed(entry.title.map(|t| t.content)),
        summary: trimmed(summary),
        link: trimmed(alternate_link(entry.links)),
        published: entry.published.map(rfc3339),
        updated: entry.updated.map(rfc3339),
    }
}

/// `rel="alternate"` (or unlabelled) link, else the first one
fn alternate_link(links: Vec<model::Link>) -> Option<String> {
    let position = links
        .iter()
        .position(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .unwrap_or(0);
    links.into_iter().nth(position).map(|l| l.href)
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

/// Rewrite HTML named entities into text an XML parser accepts
///
/// Feeds routinely carry `&nbsp;` or `&eacute;` without a DTD. Known names
/// are decoded, unknown ones become literal text. The five XML entities are
/// left alone.
fn resolve_html_entities(document: &str) -> String {
    NAMED_ENTITY
        .replace_all(document, |caps: &Captures<'_>| {
            let raw = &caps[0];
            match &caps[1] {
                "amp" | "lt" | "gt" | "quot" | "apos" => raw.to_string(),
                _ => {
                    let decoded = html_escape::decode_html_entities(raw).replace('\u{a0}', " ");
                    html_escape::encode_text(&decoded).into_owned()
                }
            }
        })
        .into_owned()
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
