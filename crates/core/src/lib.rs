pub mod error;
pub mod exclusion;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formatters;
pub mod layout;
pub mod locate;
pub mod metadata;
pub mod normalize;
pub mod parse;
pub mod scoring;

pub use error::{Result, SlantError};
pub use exclusion::{ExclusionLevel, is_excluded};
pub use extract::{
    ExtractConfig, ExtractConfigBuilder, ExtractionResult, Extractor, MIN_SUCCESS_CHARS, extract_article_text,
    extract_article_text_with_url,
};
#[cfg(feature = "fetch")]
pub use extract::fetch_and_extract;
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, fetch_url};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, to_json, to_text};
pub use layout::{BoundingBox, Layout, NoLayout, StaticLayout, Viewport};
pub use locate::{CandidateNode, DEFAULT_CONTENT_SELECTORS, ExtractionCandidate, ExtractionMethod, locate};
pub use normalize::{NormalizedText, normalize};
pub use parse::{Document, Element};
#[doc(hidden)]
pub use scoring::{ScoreConfig, ScoreResult, calculate_score};
