//! Error types for the golinks system

use thiserror::Error;

/// Core error type for golinks operations
#[derive(Error, Debug)]
pub enum GoLinksError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Redirect rule errors (e.g. malformed pattern)
    #[error("Rule error: {0}")]
    Rule(String),

    /// Save path rejection: empty base URL input
    #[error("Base URL must not be empty")]
    EmptyBaseUrl,

    /// Save path rejection: input is not a well-formed absolute URL
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Browser surface errors (tab navigation, options page)
    #[error("Surface error: {0}")]
    Surface(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for golinks operations
pub type Result<T> = std::result::Result<T, GoLinksError>;

impl From<serde_json::Error> for GoLinksError {
    fn from(err: serde_json::Error) -> Self {
        GoLinksError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for GoLinksError {
    fn from(err: toml::de::Error) -> Self {
        GoLinksError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for GoLinksError {
    fn from(err: toml::ser::Error) -> Self {
        GoLinksError::Serialization(err.to_string())
    }
}
