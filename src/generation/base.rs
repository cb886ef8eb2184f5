//! Collaborator traits for the generative model.

use crate::error::Result;
use crate::types::TokenRange;

/// One generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Text to summarize
    pub input: String,
    /// Requested number of new tokens
    pub range: TokenRange,
    /// Input is truncated to this many tokens before generating
    pub max_source_length: usize,
}

impl GenerationRequest {
    pub fn new(input: impl Into<String>, range: TokenRange, max_source_length: usize) -> Self {
        Self {
            input: input.into(),
            range,
            max_source_length,
        }
    }
}

/// A loaded sequence-to-sequence model together with its tokenizer.
///
/// Implementations are not required to be reentrant; [`super::ModelHandle`]
/// serializes every call.
pub trait SequenceModel: Send {
    /// Number of tokens the model's tokenizer produces for `text`.
    fn count_tokens(&self, text: &str) -> usize;

    /// Generate a summary of `request.input` within `request.range` new tokens.
    ///
    /// Returns plain text without control tokens.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Loads a [`SequenceModel`]. Called lazily, at most once per successful load.
pub trait ModelLoader: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Load weights and tokenizer.
    fn load(&self) -> Result<Box<dyn SequenceModel>>;
}
