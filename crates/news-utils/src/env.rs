//! Typed environment variable lookups

use std::str::FromStr;
use thiserror::Error;

/// An environment variable was set but could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct EnvError {
    /// Variable name
    pub key: String,
    /// Raw value found
    pub value: String,
    /// Parser message
    pub reason: String,
}

/// Read a non-empty string variable
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse a variable
///
/// Unset or blank → `Ok(None)`; set but unparseable → `Err`.
pub fn env_parse<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| EnvError {
            key: key.to_string(),
            value: raw,
            reason: e.to_string(),
        }),
    }
}
