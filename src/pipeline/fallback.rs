//! Degraded excerpt used when generation cannot succeed.

use crate::processing::{truncate_chars, TextCleaner};
use crate::DEFAULT_FALLBACK_MAX_CHARS;

/// Produces a lightly cleaned, bounded excerpt of the raw article body.
///
/// Works on the raw body rather than any partially processed state and only
/// does string operations, so it cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct FallbackPolicy {
    max_chars: usize,
}

impl FallbackPolicy {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Excerpt of `raw_body` with captions, bylines and credits removed.
    pub fn excerpt(&self, cleaner: &TextCleaner, raw_body: &str) -> String {
        let safe = cleaner.filter_media_sentences(raw_body.trim());
        let safe = cleaner.strip_trailing_authors(&safe);
        let safe = cleaner.strip_trailing_credits(&safe);
        truncate_chars(&safe, self.max_chars)
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MAX_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_excerpt_is_cleaned() {
        let cleaner = TextCleaner::with_defaults();
        let body = "Cháy lớn tại kho hàng. Hiện trường vụ cháy. Ảnh: CTV. Không có thương vong. Theo VnExpress.";
        assert_eq!(
            FallbackPolicy::default().excerpt(&cleaner, body),
            "Cháy lớn tại kho hàng. Không có thương vong."
        );
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let cleaner = TextCleaner::with_defaults();
        let body = "Một câu dài về kinh tế vĩ mô. ".repeat(100);
        let excerpt = FallbackPolicy::default().excerpt(&cleaner, &body);

        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), 803);
    }

    #[test]
    fn test_short_body_kept() {
        let cleaner = TextCleaner::with_defaults();
        assert_eq!(FallbackPolicy::new(10).excerpt(&cleaner, "  Ngắn.  "), "Ngắn.");
    }
}
