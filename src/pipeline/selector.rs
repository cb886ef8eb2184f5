//! Paragraph selection for map-reduce summarization.

/// Head size once the budget allows 8 or more paragraphs.
const WIDE_HEAD: usize = 3;
const WIDE_BUDGET: usize = 8;

/// Picks a bounded, representative subset of paragraphs.
///
/// Leads and conclusions of news articles carry most of the information, so
/// the selection keeps a head and a tail and drops the middle entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkSelector;

impl ChunkSelector {
    pub fn new() -> Self {
        Self
    }

    /// Select at most `max_count` paragraphs: the head slice followed by the
    /// tail slice, each in document order. Inputs that already fit come back
    /// unchanged.
    pub fn select<T: Clone>(&self, paragraphs: &[T], max_count: usize) -> Vec<T> {
        if paragraphs.len() <= max_count {
            return paragraphs.to_vec();
        }

        let head_count = if max_count >= WIDE_BUDGET {
            WIDE_HEAD
        } else {
            max_count / 3
        };
        let tail_count = max_count - head_count;

        let mut selected = Vec::with_capacity(max_count);
        selected.extend_from_slice(&paragraphs[..head_count]);
        selected.extend_from_slice(&paragraphs[paragraphs.len() - tail_count..]);
        selected
    }
}
