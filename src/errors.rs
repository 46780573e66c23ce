//! Error types for the workorder pipeline
//!
//! One taxonomy for the whole run: configuration problems abort before the
//! pipeline starts, stage failures terminate the run that raised them.

use thiserror::Error;

/// Main error type for the retrieve-then-compose pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing or invalid startup configuration (credentials, endpoint)
    #[error("Configuration error: {0}")]
    ConfigurationFailure(String),

    /// Retrieval stage failure: document unreachable, unindexed, or the
    /// generator failed while answering. "No relevant content found" is NOT
    /// an error - that is a valid retrieval result.
    #[error("Retrieval failed: {0}")]
    RetrievalFailure(String),

    /// Composition stage failure: generation endpoint unreachable or empty output
    #[error("Composition failed: {0}")]
    CompositionFailure(String),

    /// Raw generation endpoint failure, before a stage has claimed it.
    /// Stages map this into their own failure class.
    #[error("Generation endpoint error: {0}")]
    GenerationFailure(String),

    /// State machine transition errors
    #[error("Invalid state transition from {from:?} to {to:?}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Convert anyhow errors raised in glue code into pipeline errors
impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        PipelineError::ConfigurationFailure(err.to_string())
    }
}

impl PipelineError {
    /// Exit code surfaced by the CLI for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::ConfigurationFailure(_) => 2,
            PipelineError::RetrievalFailure(_) => 3,
            PipelineError::CompositionFailure(_) => 4,
            _ => 1,
        }
    }
}
