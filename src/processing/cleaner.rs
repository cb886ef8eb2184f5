//! Article and summary cleaning.
//!
//! Scraped news bodies carry bylines, author-page widgets, photo captions and
//! reader-solicitation boxes; generated summaries occasionally echo the same
//! artifacts. [`TextCleaner`] strips both.

use tracing::debug;

use super::filter::{FilterConfig, NoiseFilter, NAME_PUNCTUATION};
use super::segmenter::Segmenter;
use super::truncate::truncate_to_last_sentence;

/// Upper bound on repeated cleaning passes in [`TextCleaner::clean`].
const MAX_CLEAN_PASSES: usize = 4;

/// A cleaned article body ready for mode selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedBody {
    /// Surviving paragraphs joined by blank lines
    pub text: String,
    /// Surviving paragraphs in document order
    pub paragraphs: Vec<String>,
}

impl CleanedBody {
    /// Number of paragraphs, at least 1 for a non-empty body.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len().max(1)
    }

    /// Whether cleaning removed everything.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Removes boilerplate from article text and generated summaries.
pub struct TextCleaner {
    filter: NoiseFilter,
    segmenter: Segmenter,
}

impl TextCleaner {
    /// Create a cleaner with the given filter configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self {
            filter: NoiseFilter::new(config),
            segmenter: Segmenter::new(),
        }
    }

    /// Create a cleaner with default denylists.
    pub fn with_defaults() -> Self {
        Self::new(FilterConfig::default())
    }

    /// The sentence/paragraph segmenter used by this cleaner.
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Full cleaning pass for a piece of text.
    ///
    /// Strips the header block, media captions, trailing bylines and credit
    /// sentences, then cuts back to the last full sentence. Passes repeat until
    /// the text is stable, so `clean(clean(x)) == clean(x)`.
    pub fn clean(&self, text: &str, title: Option<&str>) -> String {
        settle(text, |s| {
            let s = self.strip_header_noise(s, title);
            self.clean_tail(&s)
        })
    }

    /// Post-process generated text: captions, trailing bylines and credits,
    /// then the last-sentence cut. Leading lines are left alone.
    pub fn clean_summary(&self, text: &str) -> String {
        settle(text, |s| self.clean_tail(s))
    }

    fn clean_tail(&self, text: &str) -> String {
        let s = self.filter_media_sentences(text);
        let s = self.strip_trailing_authors(&s);
        let s = self.strip_trailing_credits(&s);
        truncate_to_last_sentence(&s)
    }

    /// Drop a two-word reporter name opening a summary ("Minh Anh: Giá ...").
    ///
    /// Texts of fewer than three words are returned unchanged, and the
    /// remainder is re-capitalized.
    pub fn strip_leading_reporter(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let named = words.len() >= 3
            && self.filter.is_name_word(words[0])
            && self.filter.is_name_word(words[1]);
        if !named {
            return text.to_string();
        }

        let rest = words[2..].join(" ");
        let rest = rest
            .trim_start_matches(|c: char| NAME_PUNCTUATION.contains(&c) || c.is_whitespace())
            .trim();
        let mut chars = rest.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => text.to_string(),
        }
    }

    /// Apply source-specific summary fixes.
    pub fn finish_for_source(&self, summary: &str, source: Option<&str>) -> String {
        match source {
            Some(source) if self.filter.has_reporter_prefix(source) => {
                self.strip_leading_reporter(summary)
            }
            _ => summary.to_string(),
        }
    }

    /// Prepare an article body for summarization.
    ///
    /// Trailing bylines and (optionally) the source header block are removed,
    /// noise paragraphs dropped and every paragraph filtered of captions.
    pub fn clean_body(&self, body: &str, title: Option<&str>, strip_header: bool) -> CleanedBody {
        let mut body = self.strip_trailing_authors(body);
        if strip_header {
            body = self.strip_header_noise(&body, title);
        }

        let raw_paragraphs = self.segmenter.split_paragraphs(&body);
        let total = raw_paragraphs.len();
        let paragraphs: Vec<String> = raw_paragraphs
            .into_iter()
            .filter(|p| !self.filter.is_noise_paragraph(p))
            .map(|p| self.filter_media_sentences(&p))
            .filter(|p| !p.is_empty())
            .collect();

        debug!(
            raw_paragraphs = total,
            kept_paragraphs = paragraphs.len(),
            "Cleaned article body"
        );

        if paragraphs.is_empty() {
            let text = self.filter_media_sentences(&body);
            let paragraphs = if text.is_empty() { vec![] } else { vec![text.clone()] };
            return CleanedBody { text, paragraphs };
        }

        CleanedBody {
            text: paragraphs.join("\n\n"),
            paragraphs,
        }
    }

    /// Drop photo/video captions and image file names.
    ///
    /// A short sentence directly before a caption usually introduces it and is
    /// dropped as well.
    pub fn filter_media_sentences(&self, text: &str) -> String {
        let max_intro_words = self.filter.config().caption_intro_max_words;
        let mut kept: Vec<String> = Vec::new();

        for sentence in self.segmenter.split_sentences(text) {
            if self.filter.is_media_caption(&sentence) || self.filter.is_image_filename(&sentence) {
                let drop_intro = kept
                    .last()
                    .map_or(false, |prev| prev.split_whitespace().count() <= max_intro_words);
                if drop_intro {
                    kept.pop();
                }
                continue;
            }
            kept.push(sentence);
        }

        kept.join(" ")
    }

    /// Remove byline lines at the end of the text.
    ///
    /// The first content line is never removed.
    pub fn strip_trailing_authors(&self, text: &str) -> String {
        let lines: Vec<&str> = text.trim_end().lines().collect();
        let first_content = match lines.iter().position(|l| !l.trim().is_empty()) {
            Some(idx) => idx,
            None => return String::new(),
        };

        let mut end = lines.len();
        while end > 0 {
            let line = lines[end - 1].trim();
            if line.is_empty() {
                end -= 1;
                continue;
            }
            if end - 1 > first_content && self.filter.is_author_line(line) {
                end -= 1;
                continue;
            }
            break;
        }

        lines[..end].join("\n").trim().to_string()
    }

    /// Remove the header block some sources prepend to the body: a repeated
    /// headline, the author's name, author-page links and rating widgets.
    ///
    /// The last content line is never removed.
    pub fn strip_header_noise(&self, text: &str, title: Option<&str>) -> String {
        let lines: Vec<&str> = text.trim_start().lines().collect();
        let last_content = match lines.iter().rposition(|l| !l.trim().is_empty()) {
            Some(idx) => idx,
            None => return String::new(),
        };

        let mut i = 0;
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            let first = lines[0].trim();
            if last_content > 0 && (first == title || first.starts_with(title)) {
                i = 1;
            }
        }

        while i < last_content {
            let s = lines[i].trim();
            if s.is_empty()
                || self.filter.is_author_line(s)
                || self.filter.is_header_marker(s)
                || self.filter.is_header_widget(s)
            {
                i += 1;
                continue;
            }
            break;
        }

        lines[i..].join("\n").trim().to_string()
    }

    /// Remove trailing "Theo X." credit sentences.
    pub fn strip_trailing_credits(&self, text: &str) -> String {
        let mut sentences = self.segmenter.split_sentences(text);
        while sentences
            .last()
            .map_or(false, |s| self.filter.is_credit_sentence(s))
        {
            sentences.pop();
        }
        sentences.join(" ")
    }

    /// Whether a paragraph is a solicitation box or contact block.
    pub fn is_noise_paragraph(&self, paragraph: &str) -> bool {
        self.filter.is_noise_paragraph(paragraph)
    }
}

/// Repeat `pass` until the text stops changing, at most [`MAX_CLEAN_PASSES`] times.
fn settle(text: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = text.trim().to_string();
    for _ in 0..MAX_CLEAN_PASSES {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ARTICLE: &str = "Giá vàng lập đỉnh mới\n\
        Minh Anh\n\
        Xem các bài viết của tác giả\n\
        icon\n\
        12\n\
        \n\
        Sáng nay giá vàng miếng tăng thêm 1.5 triệu đồng mỗi lượng. Nhiều người xếp hàng từ sớm.\n\
        \n\
        Người dân xếp hàng trước cửa hàng. Ảnh: Hoàng Hà\n\
        \n\
        Mời độc giả chia sẻ câu chuyện, tâm sự gửi về email: bandosong@vietnamnet.vn\n\
        \n\
        Giới phân tích cho rằng giá còn biến động trong tuần tới.\n\
        Hoàng Hà\n\
        Theo AP";

    #[test]
    fn test_header_block_removed() {
        let cleaner = TextCleaner::with_defaults();
        let out = cleaner.strip_header_noise(ARTICLE, Some("Giá vàng lập đỉnh mới"));
        assert!(out.starts_with("Sáng nay giá vàng"));
    }

    #[test]
    fn test_trailing_authors_removed() {
        let cleaner = TextCleaner::with_defaults();
        let out = cleaner.strip_trailing_authors(ARTICLE);
        assert!(out.ends_with("biến động trong tuần tới."));
    }

    #[test]
    fn test_single_line_survives() {
        let cleaner = TextCleaner::with_defaults();
        assert_eq!(cleaner.strip_trailing_authors("STUB"), "STUB");
        assert_eq!(cleaner.strip_header_noise("STUB", None), "STUB");
        assert_eq!(cleaner.clean("STUB", None), "STUB");
    }

    #[test]
    fn test_caption_pairs_removed() {
        let cleaner = TextCleaner::with_defaults();
        let out = cleaner.filter_media_sentences(
            "Lũ dâng cao trong đêm. Người dân sơ tán. Ảnh: TTXVN. Chính quyền đã vào cuộc.",
        );
        assert_eq!(out, "Lũ dâng cao trong đêm. Chính quyền đã vào cuộc.");
    }

    #[test]
    fn test_image_filename_removed() {
        let cleaner = TextCleaner::with_defaults();
        let intro = format!("{}.", "từ ".repeat(21).trim());
        let out = cleaner.filter_media_sentences(&format!("{} IMG_01.png. Hết trận.", intro));
        assert_eq!(out, format!("{} Hết trận.", intro));

        let out = cleaner.filter_media_sentences("Trận đấu kết thúc. img_2031.jpg. Khán giả ra về.");
        assert_eq!(out, "Khán giả ra về.");
    }

    #[test]
    fn test_trailing_credit_sentences() {
        let cleaner = TextCleaner::with_defaults();
        assert_eq!(
            cleaner.strip_trailing_credits("Cơn bão đổ bộ. Theo Reuters."),
            "Cơn bão đổ bộ."
        );
        assert_eq!(
            cleaner.strip_trailing_credits("Cơn bão đổ bộ. Theo chuyên gia, bão sẽ suy yếu."),
            "Cơn bão đổ bộ. Theo chuyên gia, bão sẽ suy yếu."
        );
    }

    #[test]
    fn test_summary_keeps_leading_place_name() {
        let cleaner = TextCleaner::with_defaults();
        let summary = "Hà Nội\nMưa lớn gây ngập nhiều tuyến phố trong chiều nay.";

        assert_eq!(cleaner.clean_summary(summary), summary);
        assert_eq!(
            cleaner.clean(summary, None),
            "Mưa lớn gây ngập nhiều tuyến phố trong chiều nay."
        );
    }

    #[test]
    fn test_summary_cleaning() {
        let cleaner = TextCleaner::with_defaults();
        assert_eq!(
            cleaner.clean_summary("Lũ dâng cao trong đêm qua. Người dân sơ tán. Ảnh: TTXVN. Theo AP."),
            "Lũ dâng cao trong đêm qua."
        );
        assert_eq!(cleaner.clean_summary("STUB"), "STUB");
    }

    #[test]
    fn test_leading_reporter_stripped() {
        let cleaner = TextCleaner::with_defaults();

        assert_eq!(
            cleaner.strip_leading_reporter("Minh Anh: giá vàng tăng mạnh trong phiên sáng."),
            "Giá vàng tăng mạnh trong phiên sáng."
        );
        assert_eq!(
            cleaner.strip_leading_reporter("Giá vàng tăng mạnh."),
            "Giá vàng tăng mạnh."
        );
        assert_eq!(cleaner.strip_leading_reporter("Minh Anh"), "Minh Anh");
        assert_eq!(cleaner.strip_leading_reporter("Minh Anh –"), "Minh Anh –");
    }

    #[test]
    fn test_reporter_strip_only_for_flagged_sources() {
        let cleaner = TextCleaner::with_defaults();
        let summary = "Hoàng Hà, UBND thành phố vừa ban hành quyết định mới.";

        assert_eq!(
            cleaner.finish_for_source(summary, Some("vietnamnet")),
            "UBND thành phố vừa ban hành quyết định mới."
        );
        assert_eq!(cleaner.finish_for_source(summary, Some("vnexpress")), summary);
        assert_eq!(cleaner.finish_for_source(summary, None), summary);
    }

    #[test]
    fn test_clean_body() {
        let cleaner = TextCleaner::with_defaults();
        let cleaned = cleaner.clean_body(ARTICLE, Some("Giá vàng lập đỉnh mới"), true);

        assert_eq!(
            cleaned.paragraphs,
            vec![
                "Sáng nay giá vàng miếng tăng thêm 1.5 triệu đồng mỗi lượng. Nhiều người xếp hàng từ sớm.",
                "Giới phân tích cho rằng giá còn biến động trong tuần tới.",
            ]
        );
        assert_eq!(cleaned.paragraph_count(), 2);
        assert!(!cleaned.text.contains("Theo AP"));
    }

    #[test]
    fn test_clean_body_degenerate() {
        let cleaner = TextCleaner::with_defaults();
        let cleaned = cleaner.clean_body("Ảnh: Reuters.", None, true);
        assert!(cleaned.is_empty());
        assert!(cleaned.paragraphs.is_empty());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = TextCleaner::with_defaults();
        let long_unpunctuated = "tin nóng ".repeat(40);
        let samples = [
            ARTICLE,
            "STUB",
            "Kết quả bầu cử được công bố. Theo AP.",
            "Một đoạn văn bị cắt giữa chừng. Và phần còn lại",
            long_unpunctuated.as_str(),
            "Người dân sơ tán. Ảnh: TTXVN\nHoàng Hà\nTheo VnExpress",
            "",
        ];

        for sample in samples {
            let once = cleaner.clean(sample, Some("Giá vàng lập đỉnh mới"));
            let twice = cleaner.clean(&once, Some("Giá vàng lập đỉnh mới"));
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }
}
