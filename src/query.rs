use std::path::Path;

use crate::{
    core::{Caption, Timestamp, Track, YomimakuError},
    furigana, subtitle,
    vocabulary::{store, Occurrences},
};

/// Looks a word up in a saved vocabulary and prints every caption it was
/// recorded in. Flat vocabularies need the subtitle file they came from,
/// grouped ones need the directory holding the source files.
pub fn find_examples(
    query: &str,
    vocabulary_file: &Path,
    subtitles_directory: Option<&Path>,
    subtitles_file: Option<&Path>,
) -> Result<(), YomimakuError> {
    if subtitles_directory.is_none() && subtitles_file.is_none() {
        return Err(YomimakuError::Config(
            "Either the subtitles directory or subtitles file should be specified".to_string(),
        ));
    }

    let vocabulary = store::load(vocabulary_file)?;
    let entry = match vocabulary.get(query) {
        Some(entry) => entry,
        None => {
            println!("{} was not found in vocabulary file", query);
            return Ok(());
        }
    };

    match &entry.occurrences {
        Occurrences::Flat(timestamps) => {
            let file = subtitles_file.ok_or_else(|| {
                YomimakuError::Config(
                    "vocabulary was generated for a single file which was not specified"
                        .to_string(),
                )
            })?;
            print_occurrences(file, timestamps)?;
        }
        Occurrences::Grouped(groups) => {
            let directory = subtitles_directory.ok_or_else(|| {
                YomimakuError::Config(
                    "vocabulary was generated for a directory which was not specified".to_string(),
                )
            })?;
            for (stem, timestamps) in groups {
                print_occurrences(&directory.join(format!("{}.vtt", stem)), timestamps)?;
            }
        }
    }

    Ok(())
}

fn print_occurrences(path: &Path, timestamps: &[Timestamp]) -> Result<(), YomimakuError> {
    let mut timestamps = timestamps.to_vec();
    timestamps.sort();

    let track = subtitle::read(path)?;
    println!("{}", path.display());
    for (timestamp, caption) in matching_captions(&track, &timestamps) {
        println!("{}: {}", timestamp, furigana::strip_ruby(&caption.text));
    }
    Ok(())
}

/// Pairs each timestamp with the first caption still on screen past it.
/// Both sides are sorted, so a single pass over the captions suffices.
fn matching_captions<'a>(
    track: &'a Track,
    timestamps: &[Timestamp],
) -> Vec<(Timestamp, &'a Caption)> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    for caption in &track.captions {
        if cursor == timestamps.len() {
            break;
        }
        if caption.end <= timestamps[cursor] {
            continue;
        }
        matches.push((timestamps[cursor], caption));
        cursor += 1;
    }

    matches
}
