//! Centralized error types for EcoPrompt.
//!
//! The rewrite pipeline and the cost model never fail; these variants cover
//! the boundary around them (prompt validation, configuration, I/O).

use thiserror::Error;

/// Main error type for EcoPrompt operations.
#[derive(Error, Debug)]
pub enum EcoError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Prompt is too long: {length} characters, maximum is {max}")]
    PromptTooLong { length: usize, max: usize },

    #[error("Unknown optimization strategy: '{0}' (expected conservative, balanced or aggressive)")]
    UnknownStrategy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for EcoPrompt operations.
pub type EcoResult<T> = Result<T, EcoError>;

impl EcoError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
