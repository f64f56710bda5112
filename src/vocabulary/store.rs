use std::{collections::BTreeMap, fs, path::Path};

use super::{Entry, Format, Vocabulary};
use crate::core::YomimakuError;

pub fn save(vocabulary: &Vocabulary, path: &Path, format: Format) -> Result<(), YomimakuError> {
    match format {
        Format::Json => save_json(vocabulary, path),
        Format::Csv => save_csv(vocabulary, path),
    }
}

/// Dispatches on the file name: `.csv` loads as CSV, anything else as JSON.
pub fn load(path: &Path) -> Result<Vocabulary, YomimakuError> {
    if path.extension().map_or(false, |ext| ext == "csv") {
        load_csv(path)
    } else {
        load_json(path)
    }
}

pub fn save_json(vocabulary: &Vocabulary, path: &Path) -> Result<(), YomimakuError> {
    let json = serde_json::to_string(vocabulary)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_json(path: &Path) -> Result<Vocabulary, YomimakuError> {
    let json = fs::read_to_string(path)?;
    let vocabulary = serde_json::from_str(&json)?;
    Ok(vocabulary)
}

/// Rows are `word,frequency,occurrences-as-JSON` with no header, most
/// frequent words first.
pub fn save_csv(vocabulary: &Vocabulary, path: &Path) -> Result<(), YomimakuError> {
    let mut rows: Vec<(&String, &Entry)> = vocabulary.entries.iter().collect();
    rows.sort_by(|a, b| b.1.frequency.cmp(&a.1.frequency));

    let mut writer = csv::Writer::from_path(path)?;
    for (dict_form, entry) in rows {
        let frequency = entry.frequency.to_string();
        let occurrences = serde_json::to_string(&entry.occurrences)?;
        writer.write_record([dict_form.as_str(), frequency.as_str(), occurrences.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_csv(path: &Path) -> Result<Vocabulary, YomimakuError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(path)?;
    let mut entries = BTreeMap::new();

    for record in reader.records() {
        let record = record?;
        let dict_form = field(&record, 0, path)?;
        let frequency: u32 = field(&record, 1, path)?.trim().parse().map_err(|_| {
            YomimakuError::FailedToLoadFile(format!(
                "bad frequency for {:?} in {}",
                dict_form,
                path.display()
            ))
        })?;
        let occurrences = serde_json::from_str(field(&record, 2, path)?)?;

        entries.insert(dict_form.to_string(), Entry { frequency, occurrences });
    }

    Ok(Vocabulary { entries })
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    path: &Path,
) -> Result<&'a str, YomimakuError> {
    record.get(index).ok_or_else(|| {
        YomimakuError::FailedToLoadFile(format!("short vocabulary row in {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        core::Timestamp,
        vocabulary::Occurrences,
    };

    fn sample() -> Vocabulary {
        let mut entries = BTreeMap::new();
        entries.insert(
            "学校".to_string(),
            Entry { frequency: 1, occurrences: Occurrences::Flat(vec![Timestamp(7.5)]) },
        );
        entries.insert(
            "猫".to_string(),
            Entry {
                frequency: 3,
                occurrences: Occurrences::Flat(vec![Timestamp(12.0), Timestamp(47.5)]),
            },
        );
        entries.insert(
            "犬".to_string(),
            Entry { frequency: 2, occurrences: Occurrences::Flat(vec![Timestamp(2.0)]) },
        );
        Vocabulary { entries }
    }

    fn grouped_sample() -> Vocabulary {
        let mut groups = BTreeMap::new();
        groups.insert("ep1".to_string(), vec![Timestamp(1.0), Timestamp(9.0)]);
        groups.insert("ep2".to_string(), vec![Timestamp(3.5)]);

        let mut entries = BTreeMap::new();
        entries.insert(
            "猫".to_string(),
            Entry { frequency: 3, occurrences: Occurrences::Grouped(groups) },
        );
        Vocabulary { entries }
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");

        save_json(&sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn test_json_round_trip_grouped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");

        save_json(&grouped_sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), grouped_sample());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.csv");

        save_csv(&sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn test_csv_round_trip_grouped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.csv");

        save_csv(&grouped_sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), grouped_sample());
    }

    #[test]
    fn test_csv_is_sorted_by_frequency_descending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.csv");
        save_csv(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let words: Vec<&str> =
            content.lines().map(|line| line.split(',').next().unwrap()).collect();
        assert_eq!(words, vec!["猫", "犬", "学校"]);
    }

    #[test]
    fn test_both_encodings_load_equal() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("vocab.json");
        let csv_path = dir.path().join("vocab.csv");

        save(&sample(), &json_path, Format::Json).unwrap();
        save(&sample(), &csv_path, Format::Csv).unwrap();

        assert_eq!(load(&json_path).unwrap(), load(&csv_path).unwrap());
    }

    #[test]
    fn test_load_keeps_duplicate_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        fs::write(&path, r#"{"猫":{"frequency":2,"occurences":[12.0,12.0]}}"#).unwrap();

        let vocabulary = load(&path).unwrap();
        assert_eq!(vocabulary.get("猫").unwrap().occurrences.total(), 2);
    }

    #[test]
    fn test_load_csv_rejects_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.csv");
        fs::write(&path, "猫,3\n").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_csv_rejects_bad_frequency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.csv");
        fs::write(&path, "猫,many,[1.0]\n").unwrap();

        assert!(matches!(load(&path), Err(YomimakuError::FailedToLoadFile(_))));
    }
}
