use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{Entry, Occurrences, Vocabulary};
use crate::{
    core::{Caption, Timestamp},
    segmentation::{pos_filter, Morpheme},
};

/// Counts for one subtitle file while it is being scanned. Occurrences live
/// in a set, so repeated hits inside one caption land on a single timestamp.
#[derive(Debug, Clone, Default)]
pub struct FileVocabulary {
    entries: HashMap<String, FileEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct FileEntry {
    pub frequency: u32,
    pub occurrences: BTreeSet<Timestamp>,
}

impl FileVocabulary {
    pub fn record(&mut self, dict_form: &str, at: Timestamp) {
        let entry = self.entries.entry(dict_form.to_string()).or_default();
        entry.frequency += 1;
        entry.occurrences.insert(at);
    }

    pub fn get(&self, dict_form: &str) -> Option<&FileEntry> {
        self.entries.get(dict_form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<FileVocabulary> for Vocabulary {
    /// Flattens the sets into lists, fixing the serialized shape.
    fn from(vocabulary: FileVocabulary) -> Self {
        let entries = vocabulary
            .entries
            .into_iter()
            .map(|(dict_form, entry)| {
                let occurrences = Occurrences::Flat(entry.occurrences.into_iter().collect());
                (dict_form, Entry { frequency: entry.frequency, occurrences })
            })
            .collect();
        Vocabulary { entries }
    }
}

/// Merge of several per-file vocabularies: frequencies summed, timestamp
/// sets filed under each source file's stem.
#[derive(Debug, Clone, Default)]
pub struct CombinedVocabulary {
    entries: HashMap<String, CombinedEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct CombinedEntry {
    pub frequency: u32,
    pub occurrences: BTreeMap<String, BTreeSet<Timestamp>>,
}

impl CombinedVocabulary {
    /// Folds one file's counts in under `source`, normally the file stem that
    /// the query side later resolves back to `<stem>.vtt`.
    pub fn absorb(&mut self, source: &str, vocabulary: FileVocabulary) {
        for (dict_form, entry) in vocabulary.entries {
            let combined = self.entries.entry(dict_form).or_default();
            combined.frequency += entry.frequency;
            combined.occurrences.insert(source.to_string(), entry.occurrences);
        }
    }

    pub fn get(&self, dict_form: &str) -> Option<&CombinedEntry> {
        self.entries.get(dict_form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<CombinedVocabulary> for Vocabulary {
    fn from(vocabulary: CombinedVocabulary) -> Self {
        let entries = vocabulary
            .entries
            .into_iter()
            .map(|(dict_form, entry)| {
                let groups = entry
                    .occurrences
                    .into_iter()
                    .map(|(source, timestamps)| (source, timestamps.into_iter().collect()))
                    .collect();
                (dict_form, Entry {
                    frequency: entry.frequency,
                    occurrences: Occurrences::Grouped(groups),
                })
            })
            .collect();
        Vocabulary { entries }
    }
}

/// Scans captions with the given analysis function and counts citable forms.
/// Compound forms are trusted as-is, base forms pass the POS filter first,
/// and morphemes with neither are reported and skipped.
pub fn aggregate(
    captions: &[Caption],
    mut analyze: impl FnMut(&str) -> Vec<Morpheme>,
) -> FileVocabulary {
    let mut vocabulary = FileVocabulary::default();

    for caption in captions {
        for morpheme in analyze(&caption.text) {
            let citable = if let Some(compound) = &morpheme.compound_form {
                compound
            } else if let Some(base) = &morpheme.base_form {
                if pos_filter::is_excluded(&morpheme.part_of_speech) {
                    continue;
                }
                base
            } else {
                eprintln!("No base form for \"{}\"", morpheme.surface);
                continue;
            };

            vocabulary.record(citable, caption.start);
        }
    }

    vocabulary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption(start: f64, text: &str) -> Caption {
        Caption {
            identifier: None,
            start: Timestamp(start),
            end: Timestamp(start + 2.0),
            settings: None,
            text: text.to_string(),
        }
    }

    fn word(base: &str) -> Morpheme {
        Morpheme {
            surface: base.to_string(),
            part_of_speech: "名詞,一般,*,*".to_string(),
            base_form: Some(base.to_string()),
            reading: None,
            compound_form: None,
        }
    }

    #[test]
    fn test_aggregate_counts_and_dedupes_within_captions() {
        let captions = vec![caption(1.0, "猫猫"), caption(5.0, "猫")];
        let vocabulary = aggregate(&captions, |text| match text {
            "猫猫" => vec![word("猫"), word("猫")],
            _ => vec![word("猫")],
        });

        let entry = vocabulary.get("猫").unwrap();
        assert_eq!(entry.frequency, 3);
        let occurrences: Vec<Timestamp> = entry.occurrences.iter().copied().collect();
        assert_eq!(occurrences, vec![Timestamp(1.0), Timestamp(5.0)]);
    }

    #[test]
    fn test_aggregate_skips_filtered_base_forms() {
        let particle = Morpheme {
            surface: "は".to_string(),
            part_of_speech: "助詞,係助詞,*,*".to_string(),
            base_form: Some("は".to_string()),
            reading: None,
            compound_form: None,
        };
        let vocabulary = aggregate(&[caption(0.0, "x")], |_| vec![particle.clone(), word("犬")]);

        assert_eq!(vocabulary.len(), 1);
        assert!(vocabulary.get("犬").is_some());
    }

    #[test]
    fn test_aggregate_trusts_compound_forms() {
        // A fused compound is counted even when its POS path would otherwise
        // be filtered.
        let compound = Morpheme {
            surface: "３年".to_string(),
            part_of_speech: "名詞,数,*,*".to_string(),
            base_form: None,
            reading: None,
            compound_form: Some("３年".to_string()),
        };
        let vocabulary = aggregate(&[caption(0.0, "x")], |_| vec![compound.clone()]);

        assert_eq!(vocabulary.get("３年").unwrap().frequency, 1);
    }

    #[test]
    fn test_aggregate_skips_morphemes_without_any_form() {
        let unknown = Morpheme {
            surface: "𠮷".to_string(),
            part_of_speech: "名詞,一般,*,*".to_string(),
            base_form: None,
            reading: None,
            compound_form: None,
        };
        let vocabulary = aggregate(&[caption(0.0, "x")], |_| vec![unknown.clone()]);

        assert!(vocabulary.is_empty());
    }

    #[test]
    fn test_file_vocabulary_flattens_sorted() {
        let mut vocabulary = FileVocabulary::default();
        vocabulary.record("猫", Timestamp(47.5));
        vocabulary.record("猫", Timestamp(12.0));
        vocabulary.record("猫", Timestamp(12.0));

        let flat: Vocabulary = vocabulary.into();
        let entry = flat.get("猫").unwrap();
        assert_eq!(entry.frequency, 3);
        assert_eq!(
            entry.occurrences,
            Occurrences::Flat(vec![Timestamp(12.0), Timestamp(47.5)])
        );
    }

    #[test]
    fn test_absorb_sums_frequencies_and_groups_sources() {
        let mut first = FileVocabulary::default();
        first.record("猫", Timestamp(1.0));
        first.record("犬", Timestamp(2.0));

        let mut second = FileVocabulary::default();
        second.record("猫", Timestamp(3.0));
        second.record("猫", Timestamp(4.0));

        let mut combined = CombinedVocabulary::default();
        combined.absorb("ep1", first);
        combined.absorb("ep2", second);

        assert!(!combined.is_empty());
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.get("猫").unwrap().frequency, 3);

        let vocabulary: Vocabulary = combined.into();
        let entry = vocabulary.get("猫").unwrap();
        assert_eq!(entry.frequency, 3);
        match &entry.occurrences {
            Occurrences::Grouped(groups) => {
                assert_eq!(groups["ep1"], vec![Timestamp(1.0)]);
                assert_eq!(groups["ep2"], vec![Timestamp(3.0), Timestamp(4.0)]);
            }
            Occurrences::Flat(_) => panic!("expected grouped occurrences"),
        }

        let dog = vocabulary.get("犬").unwrap();
        assert_eq!(dog.frequency, 1);
        assert_eq!(dog.occurrences.total(), 1);
    }
}
