//! Error types for news-core

use thiserror::Error;

/// Result type alias for news-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Request body could not be interpreted
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),
}
