//! Rendering an [`ExtractionResult`](crate::ExtractionResult) for output.

pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, to_json};
pub use text::{TextConfig, TextFormatter, to_text};
