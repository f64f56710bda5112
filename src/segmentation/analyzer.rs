use std::{ops::Range, path::Path};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use vibrato::{tokenizer::worker::Worker, Dictionary, Tokenizer};

use super::{
    dict::load_dictionary,
    pos_filter,
    token::{IpadicToken, Morpheme, COMPOUND_NOUN_POS},
};
use crate::{
    core::YomimakuError,
    furigana::{ReadingSpan, RT_TAG_PATTERN, RUBY_TAG_PATTERN},
};

/// Character-level cleanup applied before tokenization: NFKC normalization,
/// ruby markup removal, and collapsing runs of western punctuation into
/// single fullwidth marks the dictionary knows.
pub struct TextNormalizer {
    rt_tags: Regex,
    ruby_tags: Regex,
    exclamations: Regex,
    apostrophes: Regex,
    question_marks: Regex,
    periods: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, YomimakuError> {
        Ok(TextNormalizer {
            rt_tags: Regex::new(RT_TAG_PATTERN)?,
            ruby_tags: Regex::new(RUBY_TAG_PATTERN)?,
            exclamations: Regex::new(r"!+")?,
            apostrophes: Regex::new(r"'+")?,
            question_marks: Regex::new(r"\?+")?,
            periods: Regex::new(r"\.+")?,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        let text: String = text.nfkc().collect();
        let text = self.rt_tags.replace_all(&text, "");
        let text = self.ruby_tags.replace_all(&text, "");
        let text = self.exclamations.replace_all(&text, "！");
        let text = self.apostrophes.replace_all(&text, "’");
        let text = self.question_marks.replace_all(&text, "？");
        let text = self.periods.replace_all(&text, "。");
        text.into_owned()
    }
}

pub struct Analyzer {
    tokenizer: Tokenizer,
    normalizer: TextNormalizer,
}

impl Analyzer {
    pub fn new(dictionary: Dictionary) -> Result<Self, YomimakuError> {
        Ok(Analyzer { tokenizer: Tokenizer::new(dictionary), normalizer: TextNormalizer::new()? })
    }

    pub fn from_dictionary_file(path: &Path) -> Result<Self, YomimakuError> {
        let dictionary = load_dictionary(path)?;
        Self::new(dictionary)
    }

    /// A session wraps one tokenizer worker and is meant to be reused across
    /// captions and files.
    pub fn session(&self) -> AnalysisSession<'_> {
        AnalysisSession { worker: self.tokenizer.new_worker(), normalizer: &self.normalizer }
    }
}

pub struct AnalysisSession<'a> {
    worker: Worker<'a>,
    normalizer: &'a TextNormalizer,
}

impl AnalysisSession<'_> {
    /// Normalizes, tokenizes, fuses consecutive nouns, and drops function
    /// words. What remains is what the vocabulary counts.
    pub fn analyze(&mut self, text: &str) -> Vec<Morpheme> {
        let normalized = self.normalizer.normalize(text);

        self.worker.reset_sentence(&normalized);
        self.worker.tokenize();
        let tokens: Vec<IpadicToken> = self
            .worker
            .token_iter()
            .map(|token| IpadicToken::from_parts(token.surface(), token.feature()))
            .collect();

        let mut morphemes = merge_compound_nouns(tokens);
        morphemes.retain(|morpheme| !pos_filter::is_excluded(&morpheme.part_of_speech));
        morphemes
    }

    /// Tokenizes without any cleanup and returns the text as a sequence of
    /// spans with readings, including gap spans for anything the lattice
    /// skipped. Concatenating the spans' text reconstructs `text` exactly.
    pub fn reading_spans(&mut self, text: &str) -> Vec<ReadingSpan> {
        self.worker.reset_sentence(text);
        self.worker.tokenize();

        let tokens: Vec<(Range<usize>, IpadicToken)> = self
            .worker
            .token_iter()
            .map(|token| {
                (token.range_byte(), IpadicToken::from_parts(token.surface(), token.feature()))
            })
            .collect();
        spans_from_tokens(text, tokens)
    }
}

/// Lays parsed tokens over the input, padding bytes the lattice skipped
/// (whitespace, stray symbols) with plain spans so nothing is dropped.
fn spans_from_tokens(text: &str, tokens: Vec<(Range<usize>, IpadicToken)>) -> Vec<ReadingSpan> {
    let mut spans = Vec::new();
    let mut consumed = 0;

    for (range, token) in tokens {
        if range.start > consumed {
            spans.push(ReadingSpan::plain(text[consumed..range.start].to_string()));
        }
        if token.reading == "*" || token.reading.is_empty() {
            spans.push(ReadingSpan::plain(token.surface));
        } else {
            spans.push(ReadingSpan::with_reading(token.surface, &token.reading));
        }
        consumed = range.end;
    }
    if consumed < text.len() {
        spans.push(ReadingSpan::plain(text[consumed..].to_string()));
    }

    spans
}

/// Fuses runs of consecutive nouns into single compound morphemes, so terms
/// like 言語処理 or ３年生 are counted whole. The fused POS path becomes
/// `名詞,複合,*,*` and the concatenated parts become the citable form.
fn merge_compound_nouns(tokens: Vec<IpadicToken>) -> Vec<Morpheme> {
    let mut morphemes: Vec<Morpheme> = Vec::with_capacity(tokens.len());
    let mut pending: Option<Morpheme> = None;

    for token in tokens {
        let current: Morpheme = token.into();
        let mut held = match pending.take() {
            Some(held) => held,
            None => {
                pending = Some(current);
                continue;
            }
        };

        if held.part_of_speech.starts_with("名詞") && current.part_of_speech.starts_with("名詞") {
            let mut combined = held
                .compound_form
                .take()
                .or_else(|| held.base_form.take())
                .unwrap_or_else(|| held.surface.clone());
            combined.push_str(current.base_form.as_deref().unwrap_or(&current.surface));

            held.surface.push_str(&current.surface);
            held.part_of_speech = COMPOUND_NOUN_POS.to_string();
            held.reading = match (held.reading.take(), current.reading) {
                (Some(previous), Some(next)) => Some(previous + &next),
                _ => None,
            };
            held.base_form = Some(combined.clone());
            held.compound_form = Some(combined);
            pending = Some(held);
        } else {
            morphemes.push(held);
            pending = Some(current);
        }
    }

    if let Some(held) = pending {
        morphemes.push(held);
    }

    morphemes
}
