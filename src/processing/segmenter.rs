//! Sentence and paragraph segmentation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n+").unwrap();
}

/// Sentence-ending characters.
pub const SENTENCE_DELIMITERS: [char; 4] = ['.', '!', '?', '…'];

/// Sentences grouped into one paragraph when the source has no blank lines.
pub const SENTENCES_PER_PARAGRAPH: usize = 5;

/// Splits article text into sentences and paragraphs.
#[derive(Debug, Clone)]
pub struct Segmenter {
    sentences_per_paragraph: usize,
}

impl Segmenter {
    /// Create a segmenter with the default paragraph grouping.
    pub fn new() -> Self {
        Self {
            sentences_per_paragraph: SENTENCES_PER_PARAGRAPH,
        }
    }

    /// Create a segmenter with a custom fallback group size.
    pub fn with_group_size(sentences_per_paragraph: usize) -> Self {
        Self {
            sentences_per_paragraph: sentences_per_paragraph.max(1),
        }
    }

    /// Split text at sentence boundaries.
    ///
    /// A boundary is a delimiter followed by whitespace. Fragments are trimmed
    /// and empty ones dropped.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut chars = text.trim().chars().peekable();

        while let Some(c) = chars.next() {
            current.push(c);

            if SENTENCE_DELIMITERS.contains(&c)
                && chars.peek().map_or(false, |next| next.is_whitespace())
            {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
                while chars.peek().map_or(false, |next| next.is_whitespace()) {
                    chars.next();
                }
            }
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }

        sentences
    }

    /// Split text into paragraphs on blank-line runs.
    ///
    /// Sources without blank-line structure come back as a single block; those
    /// are regrouped into runs of sentences so downstream chunking still has
    /// paragraph-like units to work with.
    pub fn split_paragraphs(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }

        let paragraphs: Vec<String> = BLANK_LINES
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        if paragraphs.len() > 1 {
            return paragraphs;
        }

        let sentences = self.split_sentences(text);
        if sentences.len() <= self.sentences_per_paragraph {
            return vec![sentences.join(" ")];
        }

        sentences
            .chunks(self.sentences_per_paragraph)
            .map(|group| group.join(" "))
            .filter(|p| !p.trim().is_empty())
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}
