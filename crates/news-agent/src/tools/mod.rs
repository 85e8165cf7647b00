//! Tools the news agent advertises to an orchestrator

pub mod news;

pub use news::FetchCryptoNewsTool;
