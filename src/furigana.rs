use std::sync::OnceLock;

use regex::Regex;
use wana_kana::ConvertJapanese;

pub const RT_TAG_PATTERN: &str = r"<rt>.*?</rt>";
pub const RUBY_TAG_PATTERN: &str = r"</?ruby>";

/// One stretch of caption text with its reading, when the tokenizer knows
/// one. Gap spans and unknown words carry no reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingSpan {
    pub text: String,
    pub hiragana: Option<String>,
    pub katakana: Option<String>,
}

impl ReadingSpan {
    pub fn plain(text: String) -> Self {
        ReadingSpan { text, hiragana: None, katakana: None }
    }

    pub fn with_reading(text: String, katakana_reading: &str) -> Self {
        ReadingSpan {
            text,
            hiragana: Some(katakana_reading.to_hiragana()),
            katakana: Some(katakana_reading.to_string()),
        }
    }
}

/// Rebuilds caption text with `<ruby>` annotations. A span already written in
/// kana, or without a reading at all, passes through untouched.
pub fn render_ruby(spans: &[ReadingSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match (span.hiragana.as_deref(), span.katakana.as_deref()) {
            (Some(hiragana), Some(katakana))
                if span.text != hiragana && span.text != katakana =>
            {
                out.push_str(&format!("<ruby>{}<rt>{}</rt></ruby>", span.text, hiragana));
            }
            _ => out.push_str(&span.text),
        }
    }
    out
}

/// Removes ruby annotations, returning a caption to its unannotated text.
pub fn strip_ruby(text: &str) -> String {
    let stripped = rt_tags().replace_all(text, "");
    ruby_tags().replace_all(&stripped, "").into_owned()
}

fn rt_tags() -> &'static Regex {
    static RT_TAGS: OnceLock<Regex> = OnceLock::new();
    RT_TAGS.get_or_init(|| Regex::new(RT_TAG_PATTERN).unwrap())
}

fn ruby_tags() -> &'static Regex {
    static RUBY_TAGS: OnceLock<Regex> = OnceLock::new();
    RUBY_TAGS.get_or_init(|| Regex::new(RUBY_TAG_PATTERN).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kanji_spans_get_ruby() {
        let spans = vec![ReadingSpan::with_reading("学校".to_string(), "ガッコウ")];
        assert_eq!(render_ruby(&spans), "<ruby>学校<rt>がっこう</rt></ruby>");
    }

    #[test]
    fn test_kana_spans_stay_plain() {
        let spans = vec![
            ReadingSpan::with_reading("です".to_string(), "デス"),
            ReadingSpan::with_reading("テレビ".to_string(), "テレビ"),
        ];
        assert_eq!(render_ruby(&spans), "ですテレビ");
    }

    #[test]
    fn test_unreadable_spans_stay_plain() {
        let spans = vec![
            ReadingSpan::plain("ABC".to_string()),
            ReadingSpan::plain("\n".to_string()),
            ReadingSpan::plain("😊".to_string()),
        ];
        assert_eq!(render_ruby(&spans), "ABC\n😊");
    }

    #[test]
    fn test_mixed_sentence() {
        let spans = vec![
            ReadingSpan::with_reading("私".to_string(), "ワタシ"),
            ReadingSpan::with_reading("は".to_string(), "ハ"),
            ReadingSpan::with_reading("行く".to_string(), "イク"),
        ];
        assert_eq!(render_ruby(&spans), "<ruby>私<rt>わたし</rt></ruby>は<ruby>行く<rt>いく</rt></ruby>");
    }

    #[test]
    fn test_strip_ruby_inverts_render() {
        let spans = vec![
            ReadingSpan::with_reading("私".to_string(), "ワタシ"),
            ReadingSpan::with_reading("は".to_string(), "ハ"),
            ReadingSpan::with_reading("学校".to_string(), "ガッコウ"),
            ReadingSpan::plain("!".to_string()),
        ];
        let original: String = spans.iter().map(|span| span.text.as_str()).collect();

        assert_eq!(strip_ruby(&render_ruby(&spans)), original);
    }

    #[test]
    fn test_strip_ruby_leaves_plain_text_alone() {
        assert_eq!(strip_ruby("こんにちは"), "こんにちは");
        assert_eq!(strip_ruby(""), "");
    }
}
