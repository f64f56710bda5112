use std::path::PathBuf;

use clap::{Parser, Subcommand};
use yomimaku::{
    pipeline::{self, ConvertOptions},
    query::find_examples,
    vocabulary::Format,
};

/// Furigana annotation and vocabulary extraction for Japanese WebVTT subtitles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process every subtitle file in a directory
    Convert {
        /// Directory holding the source .vtt files
        input_directory: PathBuf,

        /// Where annotated subtitles and vocabulary files are written
        #[arg(short, long)]
        output_directory: Option<PathBuf>,

        /// Adds furigana to subtitles
        #[arg(short, long)]
        add_furigana: bool,

        /// Extracts vocabulary from subtitle files
        #[arg(short, long)]
        extract_vocabulary: bool,

        /// Stores extracted vocabulary from all subtitles in single file
        #[arg(short, long)]
        single_vocabulary_file: Option<PathBuf>,

        /// File type for vocabulary
        #[arg(short = 't', long = "vocabulary-type", value_enum, default_value_t)]
        vocabulary_type: Format,

        /// Tokenizer dictionary to use instead of the system one
        #[arg(short = 'D', long)]
        dictionary: Option<PathBuf>,
    },

    /// Outputs examples of specified word
    FindExamples {
        /// Word to be searched in dictionary form
        query: String,

        /// Vocabulary file written by convert
        #[arg(short, long)]
        vocabulary_file: PathBuf,

        /// Directory the vocabulary was extracted from
        #[arg(short = 'd', long)]
        subtitles_directory: Option<PathBuf>,

        /// Subtitle file the vocabulary was extracted from
        #[arg(short = 'f', long)]
        subtitles_file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input_directory,
            output_directory,
            add_furigana,
            extract_vocabulary,
            single_vocabulary_file,
            vocabulary_type,
            dictionary,
        } => pipeline::run(&ConvertOptions {
            input_directory,
            output_directory,
            add_furigana,
            extract_vocabulary,
            single_vocabulary_file,
            vocabulary_format: vocabulary_type,
            dictionary,
        }),
        Commands::FindExamples { query, vocabulary_file, subtitles_directory, subtitles_file } => {
            find_examples(
                &query,
                &vocabulary_file,
                subtitles_directory.as_deref(),
                subtitles_file.as_deref(),
            )
        }
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
