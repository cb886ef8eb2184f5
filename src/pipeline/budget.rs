//! Output-length budgeting.

use crate::types::TokenRange;

/// One row of the length policy: inputs up to `max_words` words get
/// `(min_new, max_new)` new tokens.
#[derive(Debug, Clone, Copy)]
struct Tier {
    max_words: usize,
    min_new: usize,
    max_new: usize,
}

const TIERS: [Tier; 3] = [
    Tier { max_words: 500, min_new: 100, max_new: 250 },
    Tier { max_words: 1000, min_new: 180, max_new: 350 },
    Tier { max_words: usize::MAX, min_new: 250, max_new: 450 },
];

/// Paragraph count from which the budget grows.
const MANY_PARAGRAPHS: usize = 10;
const MANY_PARAGRAPHS_BONUS: usize = 50;
const MAX_NEW_TOKENS_CEILING: usize = 600;

/// Room kept between min and max for a document-level range.
const DOCUMENT_GAP: usize = 20;
/// Room kept between min and max for a paragraph-level range.
const PARAGRAPH_GAP: usize = 10;

/// Maps input size to a generation-length range.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetEstimator;

impl BudgetEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Range for summarizing `text`, optionally knowing its paragraph count.
    pub fn estimate(&self, text: &str, paragraph_count: Option<usize>) -> TokenRange {
        self.estimate_words(text.split_whitespace().count(), paragraph_count)
    }

    /// Range for an input of `words` words.
    pub fn estimate_words(&self, words: usize, paragraph_count: Option<usize>) -> TokenRange {
        let tier = TIERS
            .iter()
            .find(|t| words <= t.max_words)
            .unwrap_or(&TIERS[TIERS.len() - 1]);

        let mut max_new = tier.max_new;
        if paragraph_count.map_or(false, |n| n >= MANY_PARAGRAPHS) {
            max_new = (max_new + MANY_PARAGRAPHS_BONUS).min(MAX_NEW_TOKENS_CEILING);
        }

        TokenRange::with_gap(tier.min_new, max_new, DOCUMENT_GAP)
    }

    /// Range for a single paragraph's mini-summary, with `max` capped at `cap`.
    pub fn estimate_paragraph(&self, text: &str, cap: usize) -> TokenRange {
        let base = self.estimate(text, None);
        TokenRange::with_gap(base.min(), base.max().min(cap), PARAGRAPH_GAP)
    }
}
