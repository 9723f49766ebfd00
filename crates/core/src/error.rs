//! Error types for Slant operations.
//!
//! This module defines the main error type [`SlantError`]. The first three
//! variants describe why an extraction run did not produce usable text; the
//! remaining ones cover acquiring HTML for the command-line and server
//! surfaces.
//!
//! The extraction boundary ([`crate::extract_article_text`]) never returns
//! these errors directly. It folds them into
//! [`ExtractionResult::error`](crate::ExtractionResult) instead.
//!
//! # Example
//!
//! ```rust
//! use slant_core::{Result, SlantError};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.is_empty() {
//!         return Err(SlantError::NoContentFound);
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction and acquisition operations.
#[derive(Error, Debug)]
pub enum SlantError {
    /// Every strategy of the cascade was exhausted without a valid candidate.
    #[error("Could not find the main article content on this page")]
    NoContentFound,

    /// A candidate was found and normalized, but its text is too short to analyze.
    #[error("Extracted content is too short ({length} characters, need at least {minimum})")]
    ContentTooShort { length: usize, minimum: usize },

    /// An unexpected fault while traversing, copying, or filtering the document.
    #[error("Content extraction failed: {0}")]
    ExtractionFault(String),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector or unparseable markup.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),
}

impl SlantError {
    /// Whether this error describes an extraction outcome rather than an
    /// acquisition problem.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            SlantError::NoContentFound | SlantError::ContentTooShort { .. } | SlantError::ExtractionFault(_)
        )
    }
}

/// Result type alias for SlantError.
pub type Result<T> = std::result::Result<T, SlantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SlantError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_content_too_short_message() {
        let err = SlantError::ContentTooShort { length: 42, minimum: 100 };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_timeout_error() {
        let err = SlantError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_extraction_failure_kinds() {
        assert!(SlantError::NoContentFound.is_extraction_failure());
        assert!(SlantError::ExtractionFault("boom".into()).is_extraction_failure());
        assert!(!SlantError::Timeout { timeout: 1 }.is_extraction_failure());
    }
}
