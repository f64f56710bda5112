/// POS path assigned to morphemes fused from consecutive nouns.
pub const COMPOUND_NOUN_POS: &str = "名詞,複合,*,*";

/// One lattice token with its IPADIC feature columns split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpadicToken {
    pub surface: String,
    pub pos1: String,             // Column 1: Part of speech
    pub pos2: String,             // Column 2: POS subcategory 1
    pub pos3: String,             // Column 3: POS subcategory 2
    pub pos4: String,             // Column 4: POS subcategory 3
    pub conjugation_type: String, // Column 5: Conjugation type
    pub conjugation_form: String, // Column 6: Conjugation form
    pub base_form: String,        // Column 7: Dictionary form, '*' for unknown words
    pub reading: String,          // Column 8: Katakana reading, '*' for unknown words
    pub pronunciation: String,    // Column 9: Pronunciation
}

impl IpadicToken {
    pub fn from_parts(surface: &str, features: &str) -> Self {
        let fields: Vec<&str> = features.split(',').collect();

        // Helper to get field with default value if missing
        let get_field = |idx: usize| fields.get(idx).unwrap_or(&"*").to_string();

        IpadicToken {
            surface: surface.to_string(),
            pos1: get_field(0),
            pos2: get_field(1),
            pos3: get_field(2),
            pos4: get_field(3),
            conjugation_type: get_field(4),
            conjugation_form: get_field(5),
            base_form: get_field(6),
            reading: get_field(7),
            pronunciation: get_field(8),
        }
    }

    /// The four POS columns joined back into a comma path, e.g. `名詞,一般,*,*`.
    pub fn pos_path(&self) -> String {
        format!("{},{},{},{}", self.pos1, self.pos2, self.pos3, self.pos4)
    }
}

/// Analyzer output for one lexical unit. `compound_form` is only set when the
/// unit was fused from a noun run and then overrides `base_form` as the
/// citable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    pub part_of_speech: String, // Comma path of the four IPADIC POS columns
    pub base_form: Option<String>,
    pub reading: Option<String>, // Katakana
    pub compound_form: Option<String>,
}

impl From<IpadicToken> for Morpheme {
    fn from(token: IpadicToken) -> Self {
        let part_of_speech = token.pos_path();
        Morpheme {
            surface: token.surface,
            part_of_speech,
            base_form: present(token.base_form),
            reading: present(token.reading),
            compound_form: None,
        }
    }
}

fn present(field: String) -> Option<String> {
    if field == "*" || field.is_empty() {
        None
    } else {
        Some(field)
    }
}
