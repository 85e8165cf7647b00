//! Chat request and response types
//!
//! These mirror the JSON bodies exchanged with the calling orchestrator. A
//! request carries a free-text `prompt`, either as a bare string or nested
//! under a `content` field; a response is always an assistant turn.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role reported on every response
pub const ASSISTANT_ROLE: &str = "assistant";

/// The `prompt` field of a chat request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prompt {
    /// `"prompt": "..."`
    Text(String),

    /// `"prompt": {"content": "...", ...}`
    Message {
        /// Message text
        content: String,
    },

    /// Any other JSON shape, kept so the handler can report it
    Other(Value),
}

impl Prompt {
    /// Extract the prompt text, if the prompt has a recognised shape
    pub fn text(&self) -> Option<&str> {
        match self {
            Prompt::Text(text) | Prompt::Message { content: text } => Some(text),
            Prompt::Other(_) => None,
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Text(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Text(text)
    }
}

/// Incoming chat request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Prompt>,

    /// Conversation identifier assigned by the orchestrator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    /// Any other fields; carried through but not interpreted
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatRequest {
    /// Create a request with a plain-text prompt
    pub fn new(prompt: impl Into<Prompt>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Set the conversation ID
    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }

    /// Parse a request from a raw JSON body
    pub fn from_value(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::Error::InvalidRequest(e.to_string()))
    }
}

/// Outgoing chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Always `"assistant"`
    pub role: String,

    /// Report text or an explanatory/error message
    pub content: String,

    /// Hand-off target; this agent never hands off, so it is always `null`
    pub next_turn_agent: Option<String>,
}

impl ChatResponse {
    /// Create an assistant response with the given content
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ASSISTANT_ROLE.to_string(),
            content: content.into(),
            next_turn_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_prompt() {
        let request = ChatRequest::from_value(json!({"prompt": "BTC news"})).unwrap();
        assert_eq!(request.prompt.as_ref().and_then(Prompt::text), Some("BTC news"));
    }

    #[test]
    fn test_nested_content_prompt() {
        let request = ChatRequest::from_value(json!({
            "prompt": {"role": "user", "content": "ETH today?"},
            "conversation_id": "conv-1"
        }))
        .unwrap();

        assert_eq!(request.prompt.as_ref().and_then(Prompt::text), Some("ETH today?"));
        assert_eq!(request.conversation_id.as_deref(), Some("conv-1"));
    }

    #[test]
    fn test_missing_prompt() {
        let request = ChatRequest::from_value(json!({"content": "BTC", "other": 1})).unwrap();
        assert!(request.prompt.is_none());
        assert_eq!(request.extra.get("content"), Some(&json!("BTC")));
    }

    #[test]
    fn test_unrecognised_prompt_shape() {
        let request = ChatRequest::from_value(json!({"prompt": {"text": "BTC"}})).unwrap();
        let prompt = request.prompt.unwrap();
        assert!(matches!(prompt, Prompt::Other(_)));
        assert_eq!(prompt.text(), None);
    }

    #[test]
    fn test_response_serialization() {
        let response = ChatResponse::assistant("hello");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"role": "assistant", "content": "hello", "next_turn_agent": null})
        );
    }
}
