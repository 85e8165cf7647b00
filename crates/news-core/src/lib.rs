//! Core chat abstractions for the crypto news agent
//!
//! This crate defines the request/response shapes exchanged with a chat
//! orchestrator and the trait every chat-facing agent implements.

pub mod agent;
pub mod error;
pub mod message;

pub use agent::ChatAgent;
pub use error::{Error, Result};
pub use message::{ChatRequest, ChatResponse, Prompt};
