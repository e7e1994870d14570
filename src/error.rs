// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search request failed: {0}")]
    Search(String),

    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Chat completion error: {0}")]
    Chat(String),

    #[error("Cannot build a similarity index over zero chunks")]
    EmptyIndex,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn decode(context: &str, err: impl std::fmt::Display) -> Self {
        PipelineError::Decode {
            context: context.to_string(),
            message: err.to_string(),
        }
    }
}
