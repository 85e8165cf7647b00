//! Shared utilities for the crypto news agent
//!
//! Logging setup and helpers for reading typed configuration overrides from
//! the environment.

pub mod env;
pub mod logging;

pub use env::{EnvError, env_parse, env_string};
pub use logging::{LogFormat, init_tracing_with};
