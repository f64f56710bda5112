use std::{
    fs,
    path::{Path, PathBuf},
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    core::YomimakuError,
    furigana,
    segmentation::{dict, Analyzer},
    subtitle,
    vocabulary::{
        aggregator::{self, CombinedVocabulary},
        store, Format, Vocabulary,
    },
};

/// Settings for one conversion run over a directory of subtitle files.
pub struct ConvertOptions {
    pub input_directory: PathBuf,
    pub output_directory: Option<PathBuf>, // Where annotated files and per-file vocabularies land
    pub add_furigana: bool,
    pub extract_vocabulary: bool,
    pub single_vocabulary_file: Option<PathBuf>, // Merge every file into one vocabulary at this path
    pub vocabulary_format: Format,
    pub dictionary: Option<PathBuf>, // Overrides the system dictionary location
}

/// Walks the input directory and, per `.vtt` file, extracts vocabulary
/// and/or writes a furigana-annotated copy.
pub fn run(options: &ConvertOptions) -> Result<(), YomimakuError> {
    let writes_per_file = options.add_furigana
        || (options.extract_vocabulary && options.single_vocabulary_file.is_none());
    if writes_per_file && options.output_directory.is_none() {
        return Err(YomimakuError::Config(
            "Output directory required when extracting vocabulary or adding furigana".to_string(),
        ));
    }

    let analyzer = if options.extract_vocabulary || options.add_furigana {
        let dictionary_path = dict::resolve_dictionary(options.dictionary.as_deref())?;
        Some(Analyzer::from_dictionary_file(&dictionary_path)?)
    } else {
        None
    };
    let mut session = analyzer.as_ref().map(|analyzer| analyzer.session());

    if let Some(output_directory) = &options.output_directory {
        fs::create_dir_all(output_directory)?;
    }

    let files = subtitle_files(&options.input_directory)?;
    let mut combined = (options.extract_vocabulary && options.single_vocabulary_file.is_some())
        .then(CombinedVocabulary::default);

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );

    for file in &files {
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| YomimakuError::Custom(format!("No file name in {}", file.display())))?;
        bar.set_message(file_name.clone());

        let mut track = subtitle::read(file)?;
        track.push_style(subtitle::RUBY_BACKGROUND_STYLE);

        if options.extract_vocabulary {
            let session = session
                .as_mut()
                .ok_or_else(|| YomimakuError::Custom("Tokenizer not initialized".to_string()))?;
            let vocabulary = aggregator::aggregate(&track.captions, |text| session.analyze(text));

            let stem = file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    YomimakuError::Custom(format!("No file stem in {}", file.display()))
                })?;
            match &mut combined {
                Some(combined) => combined.absorb(&stem, vocabulary),
                None => {
                    let output_directory = required_output_directory(options)?;
                    let target = output_directory
                        .join(format!("{}.{}", stem, options.vocabulary_format.extension()));
                    store::save(&Vocabulary::from(vocabulary), &target, options.vocabulary_format)?;
                }
            }
        }

        if options.add_furigana {
            let session = session
                .as_mut()
                .ok_or_else(|| YomimakuError::Custom("Tokenizer not initialized".to_string()))?;
            for caption in &mut track.captions {
                caption.text = furigana::render_ruby(&session.reading_spans(&caption.text));
            }

            let output_directory = required_output_directory(options)?;
            subtitle::save(&track, &output_directory.join(&file_name))?;
        }

        bar.inc(1);
    }
    bar.finish_and_clear();

    if let (Some(combined), Some(path)) = (combined, &options.single_vocabulary_file) {
        store::save(&Vocabulary::from(combined), path, options.vocabulary_format)?;
    }

    Ok(())
}

/// Every `.vtt` file directly inside the directory, in name order. The
/// extension check ignores case, nested directories are not searched.
fn subtitle_files(directory: &Path) -> Result<Vec<PathBuf>, YomimakuError> {
    let mut files: Vec<PathBuf> = fs::read_dir(directory)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("vtt"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn required_output_directory(options: &ConvertOptions) -> Result<&Path, YomimakuError> {
    options
        .output_directory
        .as_deref()
        .ok_or_else(|| YomimakuError::Custom("Output directory not set".to_string()))
}
