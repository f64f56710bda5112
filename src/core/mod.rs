pub mod errors;
pub mod models;

pub use errors::YomimakuError;
pub use models::{Caption, Timestamp, Track};
