pub mod analyzer;
pub mod dict;
pub mod pos_filter;
pub mod token;

pub use analyzer::{AnalysisSession, Analyzer, TextNormalizer};
pub use token::Morpheme;
