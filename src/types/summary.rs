//! Summary result types.

use serde::{Deserialize, Serialize};

/// How a summary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    /// Body was blank or cleaned down to nothing; no generation happened
    Empty,
    /// Whole cleaned body summarized in one generation call
    SinglePass,
    /// Paragraphs summarized independently, then recombined
    Paragraph,
    /// Generation failed; text is a lightly cleaned excerpt of the body
    Fallback,
}

impl std::fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMode::Empty => write!(f, "empty"),
            SummaryMode::SinglePass => write!(f, "single_pass"),
            SummaryMode::Paragraph => write!(f, "paragraph"),
            SummaryMode::Fallback => write!(f, "fallback"),
        }
    }
}

/// Summary text tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOutcome {
    /// Final cleaned summary
    pub text: String,
    /// Path through the pipeline that produced `text`
    pub mode: SummaryMode,
}

impl SummaryOutcome {
    /// An empty summary.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            mode: SummaryMode::Empty,
        }
    }

    /// A summary produced by the given mode.
    pub fn new(text: String, mode: SummaryMode) -> Self {
        Self { text, mode }
    }

    /// A fallback excerpt.
    pub fn fallback(text: String) -> Self {
        Self {
            text,
            mode: SummaryMode::Fallback,
        }
    }

    /// Whether the text is a fallback excerpt rather than a generated summary.
    pub fn was_fallback(&self) -> bool {
        self.mode == SummaryMode::Fallback
    }
}
