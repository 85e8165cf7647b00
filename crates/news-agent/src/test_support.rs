//! Fakes shared by the unit tests

use crate::feed::{Feed, FeedEntry};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use news_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with canned texts in order and records every request
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
    fail: bool,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::<String>::new())
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> news_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if self.fail {
            return Err(LLMError::RateLimitExceeded("scripted failure".to_string()));
        }

        let text = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LLMError::UnexpectedResponse("script exhausted".to_string()))?;

        Ok(CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Entry published `hours_ago` hours before now
pub fn entry(title: &str, hours_ago: i64) -> FeedEntry {
    FeedEntry {
        title: title.to_string(),
        summary: format!("<p>{title} in detail</p>"),
        link: format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
        published: Some((Utc::now() - Duration::hours(hours_ago)).to_rfc2822()),
        updated: None,
    }
}

pub fn feed(entries: Vec<FeedEntry>) -> Feed {
    Feed {
        title: None,
        entries,
    }
}
