//! LLM relevance classification
//!
//! Each in-window article is shown to the model once. The model is asked for
//! `{"relevant": bool, "summary": "..."}`; replies that are not that JSON are
//! read with the older convention where a leading `NOT RELEVANT` rejects the
//! article and anything else is the summary.

use crate::config::NewsConfig;
use crate::error::Result;
use crate::prompts::render_relevance;
use news_llm::{CompletionRequest, LLMProvider, Message};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sentinel prefix of a plain-text rejection
pub const NOT_RELEVANT: &str = "NOT RELEVANT";

/// Outcome of a relevance check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The article may move the price; `summary` explains how
    Relevant { summary: String },
    /// The article is not price-relevant
    NotRelevant { reason: String },
}

impl Verdict {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Verdict::Relevant { .. })
    }
}

#[derive(Debug, Deserialize)]
struct StructuredVerdict {
    relevant: bool,
    #[serde(default)]
    summary: String,
}

/// Interpret a model reply
pub fn parse_verdict(reply: &str) -> Verdict {
    let reply = reply.trim();

    if let Ok(structured) = serde_json::from_str::<StructuredVerdict>(strip_code_fence(reply)) {
        let summary = structured.summary.trim().to_string();
        if !structured.relevant {
            return Verdict::NotRelevant { reason: summary };
        }
        if !summary.is_empty() {
            return Verdict::Relevant { summary };
        }
    }

    if reply.to_uppercase().starts_with(NOT_RELEVANT) {
        Verdict::NotRelevant {
            reason: reply.to_string(),
        }
    } else {
        Verdict::Relevant {
            summary: reply.to_string(),
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the info string ("json") on the opening fence line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Asks a language model whether an article is price-relevant for a coin
#[derive(Clone)]
pub struct RelevanceClassifier {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: usize,
    temperature: f32,
    template: String,
}

impl RelevanceClassifier {
    /// Create a classifier using the model settings from `config`
    pub fn new(provider: Arc<dyn LLMProvider>, config: &NewsConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
            template: config.relevance_prompt.clone(),
        }
    }

    /// Classify one article
    ///
    /// Provider errors propagate; there is no retry.
    #[instrument(skip(self, content), fields(provider = self.provider.name()))]
    pub async fn classify(&self, coin: &str, title: &str, content: &str) -> Result<Verdict> {
        let prompt = render_relevance(&self.template, coin, title, content)?;

        let request = CompletionRequest::builder(&self.model)
            .add_message(Message::user(prompt))
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        let response = self.provider.complete(request).await?;
        let verdict = parse_verdict(response.text());
        debug!(relevant = verdict.is_relevant(), "Relevance verdict");
        Ok(verdict)
    }
}
