//! Error types for slide ingestion and pipeline configuration.
//!
//! The fitting pipeline itself never fails: malformed text degrades to the
//! sanitizer sentinel and unclassifiable content to the default template.
//! Errors only surface at the boundaries where candidates and settings
//! enter the crate.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting slides or loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input decoded but does not describe usable slide candidates.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
