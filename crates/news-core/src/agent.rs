//! Chat agent trait definition

use crate::{ChatRequest, ChatResponse};
use async_trait::async_trait;

/// Trait implemented by agents that answer chat requests
///
/// `chat` is infallible by contract: whatever goes wrong while serving a
/// request must be folded into the returned [`ChatResponse`]. Agents that
/// want `?` internally should wrap a fallible helper.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// Answer one chat request
    async fn chat(&self, request: ChatRequest) -> ChatResponse;

    /// Get the agent's name
    fn name(&self) -> &str;
}
