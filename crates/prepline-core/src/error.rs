use thiserror::Error;

/// Top-level error type for prepline.
///
/// Only the edges of the system produce errors (configuration files, JSON
/// documents handed in by callers). Timeline generation and voice queries
/// never fail; they fall back to a sensible default instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PrepError {
    fn from(err: toml::de::Error) -> Self {
        PrepError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PrepError {
    fn from(err: toml::ser::Error) -> Self {
        PrepError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        PrepError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for prepline operations.
pub type Result<T> = std::result::Result<T, PrepError>;
