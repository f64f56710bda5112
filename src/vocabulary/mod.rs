pub mod aggregator;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// Where a word was seen. The shape is fixed when the vocabulary is built:
/// a flat timestamp list when one file was scanned, per-source grouping when
/// a whole directory was merged. Serialization is untagged so the stored form
/// stays a bare array or object, and the shape is rebuilt from that on load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Occurrences {
    Flat(Vec<Timestamp>),
    Grouped(BTreeMap<String, Vec<Timestamp>>),
}

impl Occurrences {
    pub fn is_grouped(&self) -> bool {
        matches!(self, Occurrences::Grouped(_))
    }

    pub fn total(&self) -> usize {
        match self {
            Occurrences::Flat(timestamps) => timestamps.len(),
            Occurrences::Grouped(groups) => groups.values().map(|timestamps| timestamps.len()).sum(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub frequency: u32,
    #[serde(rename = "occurences")] // spelling kept for compatibility with existing vocabulary files
    pub occurrences: Occurrences,
}

/// A whole vocabulary file: dictionary form to entry. Transparent so the
/// JSON form is one flat object keyed by word.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Vocabulary {
    pub entries: BTreeMap<String, Entry>,
}

impl Vocabulary {
    pub fn get(&self, dict_form: &str) -> Option<&Entry> {
        self.entries.get(dict_form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk encodings for vocabulary files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Csv,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}
