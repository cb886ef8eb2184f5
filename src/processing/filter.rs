//! Noise denylists and line/sentence classifiers.
//!
//! Holds the fixed pattern sets used to recognise media captions, image file
//! names, solicitation boxes and byline-style lines in scraped articles.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARENTHETICAL: Regex = Regex::new(r"\(.*?\)").unwrap();
}

/// Configuration for noise filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Lowercase sentence prefixes that mark a media caption.
    pub media_prefixes: Vec<String>,
    /// Lowercase markers that, together with an image extension, flag a file name.
    pub image_markers: Vec<String>,
    /// Image file extensions (with dot).
    pub image_extensions: Vec<String>,
    /// Lowercase substrings that mark a whole paragraph as noise.
    pub noise_paragraph_patterns: Vec<String>,
    /// Lowercase substrings of author-page links in the header block.
    pub header_markers: Vec<String>,
    /// Lowercase prefixes of credit lines ("Theo AP").
    pub credit_prefixes: Vec<String>,
    /// Sentences at or below this many words are dropped with a following caption.
    pub caption_intro_max_words: usize,
    /// Credit sentences longer than this many words are kept.
    pub credit_max_words: usize,
    /// Lowercase source names whose summaries open with the reporter's name.
    pub reporter_prefix_sources: Vec<String>,
    /// Longest word, in characters, still taken for part of a reporter name.
    pub reporter_name_max_chars: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            media_prefixes: default_media_prefixes(),
            image_markers: to_strings(&["image", "img"]),
            image_extensions: to_strings(&[".png", ".jpg", ".jpeg", ".gif", ".webp"]),
            noise_paragraph_patterns: default_noise_patterns(),
            header_markers: to_strings(&[
                "xem các bài viết của tác giả",
                "xem tất cả bài viết của tác giả",
                "view all posts by",
                "more articles by",
            ]),
            credit_prefixes: to_strings(&["theo ", "according to "]),
            caption_intro_max_words: 20,
            credit_max_words: 15,
            reporter_prefix_sources: to_strings(&["vietnamnet"]),
            reporter_name_max_chars: 15,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_media_prefixes() -> Vec<String> {
    to_strings(&[
        // Vietnamese
        "ảnh:",
        "xem ảnh:",
        "video:",
        "xem video:",
        "clip:",
        "xem clip:",
        "hình:",
        "hình ảnh:",
        "xem hình ảnh:",
        "ảnh minh họa:",
        "xem hình:",
        "xem ảnh minh họa:",
        // English
        "photo:",
        "image:",
        "watch:",
    ])
}

fn default_noise_patterns() -> Vec<String> {
    to_strings(&[
        "mời độc giả chia sẻ",
        "tâm sự gửi về email:",
        "tâm sự gửi về e-mail:",
        "bandosong@vietnamnet.vn",
        "@vietnamnet.vn",
    ])
}

/// Classifier over the configured denylists.
pub struct NoiseFilter {
    config: FilterConfig,
}

impl NoiseFilter {
    /// Create a new filter with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Create a filter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FilterConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Sentence starts with a caption prefix such as "Ảnh:" or "Video:".
    pub fn is_media_caption(&self, sentence: &str) -> bool {
        let lower = sentence.trim().to_lowercase();
        self.config
            .media_prefixes
            .iter()
            .any(|prefix| lower.starts_with(prefix.as_str()))
    }

    /// Sentence looks like an image file name ("img_2031.jpg").
    pub fn is_image_filename(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        self.config
            .image_markers
            .iter()
            .any(|m| lower.contains(m.as_str()))
            && self
                .config
                .image_extensions
                .iter()
                .any(|ext| lower.contains(ext.as_str()))
    }

    /// Paragraph contains a solicitation box or contact address.
    pub fn is_noise_paragraph(&self, paragraph: &str) -> bool {
        let lower = paragraph.trim().to_lowercase();
        if lower.is_empty() {
            return false;
        }
        self.config
            .noise_paragraph_patterns
            .iter()
            .any(|pat| lower.contains(pat.as_str()))
    }

    /// Line links to the author's page.
    pub fn is_header_marker(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.config
            .header_markers
            .iter()
            .any(|m| lower.contains(m.as_str()))
    }

    /// Header widget leftovers: a bare "icon" or a 1-2 digit rating.
    pub fn is_header_widget(&self, line: &str) -> bool {
        let s = line.trim();
        if s.eq_ignore_ascii_case("icon") {
            return true;
        }
        !s.is_empty() && s.len() <= 2 && s.chars().all(|c| c.is_ascii_digit())
    }

    /// Byline or short credit line: "Nguyễn Văn A", "Minh Anh (VnExpress)", "Theo AP".
    pub fn is_author_line(&self, line: &str) -> bool {
        let s = line.trim();
        if s.is_empty() {
            return false;
        }

        let lower = s.to_lowercase();
        let mentions_credit = self.config.credit_prefixes.iter().any(|prefix| {
            lower.starts_with(prefix.as_str()) || lower.contains(&format!(" {}", prefix))
        });
        if mentions_credit && !s.contains(['.', '?', '!']) {
            return true;
        }

        let without_paren = PARENTHETICAL.replace_all(s, "");
        let without_paren = without_paren.trim();
        if without_paren.is_empty() || without_paren.chars().count() > 50 {
            return false;
        }

        let words: Vec<&str> = without_paren.split_whitespace().collect();
        if !(1..=4).contains(&words.len()) {
            return false;
        }

        if words.iter().any(|w| w.chars().any(|c| c.is_numeric())) {
            return false;
        }

        let capitalized = words
            .iter()
            .filter(|w| w.chars().next().map_or(false, char::is_uppercase))
            .count();
        capitalized >= 1.max(words.len() - 1)
    }

    /// Trailing credit sentence: "Theo Báo Tuổi Trẻ." without a comma.
    pub fn is_credit_sentence(&self, sentence: &str) -> bool {
        let s = sentence.trim();
        let lower = s.to_lowercase();
        self.config
            .credit_prefixes
            .iter()
            .any(|prefix| lower.starts_with(prefix.as_str()))
            && !s.contains(',')
            && s.split_whitespace().count() <= self.config.credit_max_words
    }

    /// Whether summaries from `source` may open with the reporter's name.
    pub fn has_reporter_prefix(&self, source: &str) -> bool {
        let source = source.trim().to_lowercase();
        self.config
            .reporter_prefix_sources
            .iter()
            .any(|s| *s == source)
    }

    /// Word shaped like part of a personal name: capitalized, not all caps,
    /// short. Surrounding punctuation is ignored.
    pub fn is_name_word(&self, word: &str) -> bool {
        let w = word.trim_matches(NAME_PUNCTUATION);
        let first = match w.chars().next() {
            Some(c) => c,
            None => return false,
        };
        let has_lower = w.chars().any(char::is_lowercase);
        first.is_uppercase() && has_lower && w.chars().count() <= self.config.reporter_name_max_chars
    }
}

/// Punctuation around a reporter name ("Minh Anh:", "– Hoàng Hà,").
pub const NAME_PUNCTUATION: &[char] = &[',', '.', ':', '-', '–', '—'];

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
