/// IPADIC POS paths excluded from vocabulary extraction. A morpheme is
/// dropped when its POS path starts with any of these prefixes.
pub const EXCLUDED_POS: &[&str] = &[
    "助詞",               // particle
    "副詞,助詞類接続",    // adverb, particle conjunction
    "助動詞",             // auxiliary verb
    "名詞,非自立,助動詞語幹", // noun, non-independent, auxiliary verb stem
    "記号",               // symbol
    "接頭詞",             // prefix
    "名詞,接尾",          // noun, suffix
    "動詞,接尾",          // verb, suffix
    "形容詞,接尾",        // adjective, suffix
    "接尾",               // suffix
    "名詞,数",            // noun, number
    "数",                 // number
    "フィラー",           // filler
];

pub fn is_excluded(pos_path: &str) -> bool {
    EXCLUDED_POS.iter().any(|prefix| pos_path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::segmentation::token::COMPOUND_NOUN_POS;

    #[test]
    fn test_function_words_are_excluded() {
        assert!(is_excluded("助詞,係助詞,*,*"));
        assert!(is_excluded("助動詞,*,*,*"));
        assert!(is_excluded("記号,句点,*,*"));
        assert!(is_excluded("名詞,数,*,*"));
        assert!(is_excluded("フィラー,*,*,*"));
    }

    #[test]
    fn test_content_words_are_kept() {
        assert!(!is_excluded("名詞,一般,*,*"));
        assert!(!is_excluded("動詞,自立,*,*"));
        assert!(!is_excluded("形容詞,自立,*,*"));
        assert!(!is_excluded("副詞,一般,*,*"));
    }

    #[test]
    fn test_compound_nouns_are_kept() {
        assert!(!is_excluded(COMPOUND_NOUN_POS));
    }
}
