//! Article input types.

use serde::{Deserialize, Serialize};

/// A raw article handed to the summarizer.
///
/// Only `body` is summarized; `title` is used to recognise and strip a
/// repeated headline at the top of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Article headline, if the crawler captured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Article text as scraped
    pub body: String,
}

impl Document {
    /// Create a document without a title.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title as a trimmed, non-empty string slice.
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Whether the body has no content worth summarizing.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// MD5 hex digest of title and body, used as the content version.
    pub fn content_digest(&self) -> String {
        let mut payload = String::with_capacity(self.body.len() + 64);
        payload.push_str(self.title.as_deref().unwrap_or_default());
        payload.push('\n');
        payload.push_str(&self.body);
        format!("{:x}", md5::compute(payload.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_is_ignored() {
        let doc = Document::new("Body.").with_title("   ");
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = Document::new("Same body.").with_title("Headline");
        let b = Document::new("Same body.").with_title("Headline");
        let c = Document::new("Edited body.").with_title("Headline");

        assert_eq!(a.content_digest(), b.content_digest());
        assert_ne!(a.content_digest(), c.content_digest());
        assert_eq!(a.content_digest().len(), 32);
    }

    #[test]
    fn test_blank_body() {
        assert!(Document::new(" \n\t ").is_blank());
        assert!(!Document::new("x").is_blank());
    }
}
