pub mod core;
pub mod furigana;
pub mod pipeline;
pub mod query;
pub mod segmentation;
pub mod subtitle;
pub mod vocabulary;
