//! Generation length ranges.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SummarizeError};

/// Requested output length for one generation call, in new tokens.
///
/// Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRange {
    min: usize,
    max: usize,
}

impl TokenRange {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(SummarizeError::InvalidTokenRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build a range from a tentative minimum, keeping `gap` tokens of room
    /// below `max`. Very small maxima collapse to `min == max`.
    pub fn with_gap(min: usize, max: usize, gap: usize) -> Self {
        if max <= 10 {
            return Self { min: max, max };
        }
        Self {
            min: min.min(max.saturating_sub(gap)),
            max,
        }
    }

    /// Minimum number of new tokens.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Maximum number of new tokens.
    pub fn max(&self) -> usize {
        self.max
    }
}
