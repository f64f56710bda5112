use thiserror::Error;

#[derive(Error, Debug)]
pub enum YomimakuError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Vibrato error: {0}")]
    Vibrato(Box<vibrato::errors::VibratoError>),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("Tokenizer dictionary not found at {0} (pass --dictionary or place a system dictionary there)")]
    MissingDictionary(String),

    #[error("{0}")]
    Config(String),

    #[error("YomimakuError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for YomimakuError {
    fn from(error: std::io::Error) -> Self {
        YomimakuError::Io(Box::new(error))
    }
}

impl From<csv::Error> for YomimakuError {
    fn from(error: csv::Error) -> Self {
        YomimakuError::Csv(Box::new(error))
    }
}

impl From<vibrato::errors::VibratoError> for YomimakuError {
    fn from(error: vibrato::errors::VibratoError) -> Self {
        YomimakuError::Vibrato(Box::new(error))
    }
}
