//! Error taxonomy for the summarization pipeline.

use thiserror::Error;

/// Errors raised by a pipeline stage.
///
/// None of these escape [`crate::pipeline::Summarizer::summarize`]: every
/// variant is either recovered locally or routed to the fallback excerpt.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The model or its tokenizer could not be loaded.
    #[error("model resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A collaborator call failed (transport, timeout, malformed output).
    #[error("generation failed: {0}")]
    GenerationFailure(String),

    /// A token range was built with `min > max`.
    #[error("invalid token range: min {min} exceeds max {max}")]
    InvalidTokenRange { min: usize, max: usize },
}

impl SummarizeError {
    /// Create a resource error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ResourceUnavailable(message.into())
    }

    /// Create a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailure(message.into())
    }

    /// Whether the error concerns the shared model resource rather than one call.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::ResourceUnavailable(_))
    }
}

/// Result alias used across pipeline stages.
pub type Result<T, E = SummarizeError> = std::result::Result<T, E>;
