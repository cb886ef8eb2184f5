//! Cutting text back to a clean sentence ending.

use unicode_segmentation::UnicodeSegmentation;

use super::segmenter::SENTENCE_DELIMITERS;

/// Marker appended to text cut mid-sentence.
pub const ELLIPSIS: &str = "...";

/// Unpunctuated text at or below this many characters is returned untouched.
const SOFT_CUT_MIN_CHARS: usize = 120;

/// A soft cut must keep more than this many characters.
const SOFT_CUT_MIN_PREFIX: usize = 20;

/// Trailing characters never considered for the soft cut.
const SOFT_CUT_TAIL_GUARD: usize = 5;

/// A dangling fragment longer than this is always cut.
const LONG_TAIL_CHARS: usize = 40;

/// A cut leaving fewer characters than this keeps the whole text instead.
const MIN_KEPT_CHARS: usize = 20;

/// Cut text after its last sentence-ending mark.
///
/// A '.' between two digits ("1.250", "3.5") is a separator, not an ending.
/// A fragment of more than 40 characters after the last mark is always cut;
/// otherwise a cut keeping fewer than 20 characters returns the text whole.
/// Text with no ending mark that is longer than 120 characters is cut at the
/// last space past character 20 and gets an ellipsis. The result is never
/// longer than the input.
pub fn truncate_to_last_sentence(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    if let Some(end) = last_terminal_index(&chars) {
        let truncated: String = chars[..=end].iter().collect::<String>().trim().to_string();
        let tail: String = chars[end + 1..].iter().collect::<String>().trim().to_string();

        let long_tail = tail.chars().count() > LONG_TAIL_CHARS
            && !tail.contains(&SENTENCE_DELIMITERS[..]);
        if !long_tail && truncated.chars().count() < MIN_KEPT_CHARS {
            return text.to_string();
        }
        return truncated;
    }

    if chars.len() > SOFT_CUT_MIN_CHARS {
        let search_end = chars.len() - SOFT_CUT_TAIL_GUARD;
        if let Some(space) = chars[..search_end].iter().rposition(|c| *c == ' ') {
            if space > SOFT_CUT_MIN_PREFIX {
                let head: String = chars[..space].iter().collect();
                return format!("{}{}", head.trim_end(), ELLIPSIS);
            }
        }
    }

    text.to_string()
}

/// Index of the last terminal mark, skipping decimal points.
fn last_terminal_index(chars: &[char]) -> Option<usize> {
    (0..chars.len()).rev().find(|&i| {
        let c = chars[i];
        if !SENTENCE_DELIMITERS.contains(&c) {
            return false;
        }
        if c == '.' && i > 0 && i + 1 < chars.len() {
            return !(chars[i - 1].is_ascii_digit() && chars[i + 1].is_ascii_digit());
        }
        true
    })
}

/// Hard cut to `max_chars` grapheme clusters, appending an ellipsis when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max_chars).collect();
    if graphemes.next().is_some() {
        format!("{}{}", head, ELLIPSIS)
    } else {
        head
    }
}

/// Whether text ends with a sentence-ending mark.
pub fn ends_with_terminal(text: &str) -> bool {
    text.trim_end()
        .chars()
        .last()
        .map_or(false, |c| SENTENCE_DELIMITERS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cuts_trailing_fragment() {
        assert_eq!(
            truncate_to_last_sentence("Giá xăng tăng mạnh từ chiều nay. Người dân lo lắng vì"),
            "Giá xăng tăng mạnh từ chiều nay."
        );
    }

    #[test]
    fn test_short_cut_keeps_whole_text() {
        let text = "Ok. phần còn lại bị cắt";
        assert_eq!(truncate_to_last_sentence(text), text);
        assert_eq!(truncate_to_last_sentence("What? Really! Yes"), "What? Really! Yes");
    }

    #[test]
    fn test_long_tail_is_cut_even_when_short() {
        assert_eq!(
            truncate_to_last_sentence("Ok. the rest of the generated summary trails off"),
            "Ok."
        );
    }

    #[test]
    fn test_decimal_point_is_not_terminal() {
        assert_eq!(
            truncate_to_last_sentence("Lãi suất là 6.5 phần trăm! Dự kiến 1.250"),
            "Lãi suất là 6.5 phần trăm!"
        );
    }

    #[test]
    fn test_complete_text_unchanged() {
        let text = "Mọi thứ đã xong. Không còn gì nữa…";
        assert_eq!(truncate_to_last_sentence(text), text);
    }

    #[test]
    fn test_short_unpunctuated_text_unchanged() {
        assert_eq!(truncate_to_last_sentence("STUB"), "STUB");
        assert_eq!(truncate_to_last_sentence("Giá 1.250 đồng"), "Giá 1.250 đồng");
    }

    #[test]
    fn test_soft_cut_with_ellipsis() {
        let text = "từ ".repeat(60);
        let cut = truncate_to_last_sentence(&text);

        assert!(cut.ends_with(ELLIPSIS));
        assert!(cut.chars().count() < text.trim().chars().count());
    }

    #[test]
    fn test_never_longer_and_ends_with_terminal() {
        let long = "chữ ".repeat(80);
        let samples: [&str; 6] = [
            "Hi. there friend",
            "A sentence. Another one that trails off without end",
            "Số liệu 3.14 và 2.71. Rồi",
            "What? Really! Yes",
            "Một câu hoàn chỉnh.",
            long.as_str(),
        ];

        for sample in samples {
            let out = truncate_to_last_sentence(sample);
            assert!(out.len() <= sample.len(), "grew: {:?}", sample);
            let chars: Vec<char> = sample.trim().chars().collect();
            let kept_prefix = last_terminal_index(&chars).map(|end| end + 1);
            if kept_prefix.map_or(false, |len| len >= MIN_KEPT_CHARS) {
                assert!(ends_with_terminal(&out), "no ending: {:?}", out);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let once = truncate_to_last_sentence(&"lời ".repeat(70));
        assert_eq!(truncate_to_last_sentence(&once), once);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("Tiếng Việt", 5), "Tiếng...");
    }
}
