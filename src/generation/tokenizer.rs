//! BPE token counting used for input truncation.

use crate::error::{Result, SummarizeError};

/// Token counter trait for counting tokens in text.
pub trait TokenCounter: Send + Sync {
    /// Count the number of tokens in the given text.
    fn count_tokens(&self, text: &str) -> usize;

    /// Encode text into token IDs.
    fn encode(&self, text: &str) -> Vec<usize>;

    /// Decode token IDs back to text. `None` when the tokens end inside a
    /// multi-byte character.
    fn decode(&self, tokens: &[usize]) -> Option<String>;

    /// Keep at most `max_tokens` leading tokens of `text`.
    ///
    /// The cut moves back over tokens that split a UTF-8 sequence.
    fn truncate(&self, text: &str, max_tokens: usize) -> String {
        let tokens = self.encode(text);
        if tokens.len() <= max_tokens {
            return text.to_string();
        }
        (0..=max_tokens.min(4))
            .find_map(|back| self.decode(&tokens[..max_tokens - back]))
            .unwrap_or_default()
    }
}

/// Token counter backed by tiktoken's cl100k_base encoding.
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Load the cl100k_base encoding.
    pub fn new() -> Result<Self> {
        Self::with_encoding("cl100k_base")
    }

    /// Load a specific encoding.
    pub fn with_encoding(encoding_name: &str) -> Result<Self> {
        let bpe = match encoding_name {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "r50k_base" => tiktoken_rs::r50k_base(),
            other => {
                return Err(SummarizeError::unavailable(format!(
                    "unknown encoding: {}",
                    other
                )))
            }
        }
        .map_err(|e| SummarizeError::unavailable(format!("failed to load tokenizer: {}", e)))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn encode(&self, text: &str) -> Vec<usize> {
        self.bpe.encode_ordinary(text)
    }

    fn decode(&self, tokens: &[usize]) -> Option<String> {
        self.bpe.decode(tokens.to_vec()).ok()
    }
}
