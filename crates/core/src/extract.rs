//! The extraction boundary.
//!
//! [`Extractor`] ties the pieces together: it runs the locator cascade,
//! normalizes the chosen candidate and folds every outcome, including
//! failures, into an [`ExtractionResult`]. Nothing below this boundary is
//! surfaced to callers as an `Err`.
//!
//! # Example
//!
//! ```rust
//! use slant_core::extract_article_text;
//!
//! let html = "<html><body><nav>Home | World | Sports</nav></body></html>";
//! let result = extract_article_text(html);
//! assert!(!result.success);
//! assert!(result.error.is_some());
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::{Layout, NoLayout};
use crate::locate::{DEFAULT_CONTENT_SELECTORS, ExtractionCandidate, ExtractionMethod, locate};
use crate::normalize::{NormalizedText, normalize};
use crate::parse::Document;
use crate::scoring::ScoreConfig;
use crate::SlantError;

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// Shortest text ever reported as a success, whatever the configuration says
pub const MIN_SUCCESS_CHARS: usize = 100;

/// Thresholds for every stage of extraction.
///
/// # Example
///
/// ```rust
/// use slant_core::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .min_text_chars(250)
///     .heuristic_threshold(15.0)
///     .build();
/// assert_eq!(config.min_text_chars, 250);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Trimmed text a semantic or class-based candidate must exceed (default: 200).
    pub min_candidate_chars: usize,

    /// `<p>` descendants a semantic or class-based candidate needs (default: 2).
    pub min_candidate_paragraphs: usize,

    /// Class selectors tried in order by the class-based strategy.
    pub content_selectors: Vec<String>,

    /// Score the best heuristic container must exceed (default: 10.0).
    pub heuristic_threshold: f64,

    /// `<p>` elements the page needs before the paragraph strategy runs (default: 3).
    pub min_paragraph_count: usize,

    /// Trimmed text a paragraph must exceed to be kept (default: 50).
    pub min_paragraph_chars: usize,

    /// Combined text the kept paragraphs must exceed (default: 200).
    pub min_paragraphs_total_chars: usize,

    /// Shortest text reported as a success (default and floor: 100).
    pub min_text_chars: usize,

    /// Cap on text taken by the whole-page fallback (default: 5000, always above `min_text_chars`).
    pub max_fallback_chars: usize,

    /// Weights for the heuristic scorer.
    pub score: ScoreConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_candidate_chars: 200,
            min_candidate_paragraphs: 2,
            content_selectors: DEFAULT_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            heuristic_threshold: 10.0,
            min_paragraph_count: 3,
            min_paragraph_chars: 50,
            min_paragraphs_total_chars: 200,
            min_text_chars: 100,
            max_fallback_chars: 5000,
            score: ScoreConfig::default(),
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder for ExtractConfig.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for ExtractConfig.
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    /// Sets the minimum candidate text length.
    pub fn min_candidate_chars(mut self, value: usize) -> Self {
        self.config.min_candidate_chars = value;
        self
    }

    /// Sets the minimum candidate paragraph count.
    pub fn min_candidate_paragraphs(mut self, value: usize) -> Self {
        self.config.min_candidate_paragraphs = value;
        self
    }

    /// Replaces the class-based selector list.
    pub fn content_selectors(mut self, value: Vec<String>) -> Self {
        self.config.content_selectors = value;
        self
    }

    /// Sets the heuristic score threshold.
    pub fn heuristic_threshold(mut self, value: f64) -> Self {
        self.config.heuristic_threshold = value;
        self
    }

    /// Sets how many paragraphs the paragraph strategy requires.
    pub fn min_paragraph_count(mut self, value: usize) -> Self {
        self.config.min_paragraph_count = value;
        self
    }

    /// Sets the minimum length of a kept paragraph.
    pub fn min_paragraph_chars(mut self, value: usize) -> Self {
        self.config.min_paragraph_chars = value;
        self
    }

    /// Sets the minimum combined length of kept paragraphs.
    pub fn min_paragraphs_total_chars(mut self, value: usize) -> Self {
        self.config.min_paragraphs_total_chars = value;
        self
    }

    /// Sets the shortest text reported as a success.
    pub fn min_text_chars(mut self, value: usize) -> Self {
        self.config.min_text_chars = value;
        self
    }

    /// Sets the whole-page fallback cap.
    pub fn max_fallback_chars(mut self, value: usize) -> Self {
        self.config.max_fallback_chars = value;
        self
    }

    /// Sets the scorer weights.
    pub fn score(mut self, value: ScoreConfig) -> Self {
        self.config.score = value;
        self
    }

    /// Builds the config.
    ///
    /// `min_text_chars` is raised to [`MIN_SUCCESS_CHARS`], and
    /// `max_fallback_chars` is raised past `min_text_chars` so that a capped
    /// fallback can still succeed.
    pub fn build(self) -> ExtractConfig {
        let mut config = self.config;
        config.min_text_chars = config.min_text_chars.max(MIN_SUCCESS_CHARS);
        config.max_fallback_chars = config.max_fallback_chars.max(config.min_text_chars + 1);
        config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one extraction run.
///
/// Serializes with camelCase keys; `extractionMethod` and `error` are
/// omitted when absent.
///
/// When `success` is true the text has at least `min_text_chars` characters
/// (never fewer than [`MIN_SUCCESS_CHARS`]) and at least one word. When it
/// is false `error` is set, and `text` keeps whatever was gathered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub success: bool,
    pub text: String,
    pub word_count: usize,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<ExtractionMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    fn new(url: String, title: String) -> Self {
        Self { success: false, text: String::new(), word_count: 0, url, title, extraction_method: None, error: None }
    }

    /// A failed result carrying only an error, for callers that never got a document.
    pub fn failure(url: impl Into<String>, error: &SlantError) -> Self {
        let mut result = Self::new(url.into(), String::new());
        result.error = Some(error.to_string());
        result
    }

    fn fail(mut self, error: &SlantError) -> Self {
        self.success = false;
        self.error = Some(error.to_string());
        self
    }

    fn with_text(mut self, method: ExtractionMethod, normalized: NormalizedText) -> Self {
        self.extraction_method = Some(method);
        self.word_count = normalized.word_count;
        self.text = normalized.text;
        self
    }
}

/// Configurable extraction entry point.
///
/// # Example
///
/// ```rust
/// use slant_core::{Extractor, ExtractConfig, StaticLayout};
///
/// let extractor = Extractor::with_config(ExtractConfig::builder().min_text_chars(250).build())
///     .with_layout(StaticLayout::new(1280.0));
/// let result = extractor.extract("<html><body><p>Too little.</p></body></html>");
/// assert!(!result.success);
/// ```
#[derive(Clone)]
pub struct Extractor {
    config: ExtractConfig,
    layout: Arc<dyn Layout + Send + Sync>,
}

impl Extractor {
    /// Creates an extractor with default settings and no layout.
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config, layout: Arc::new(NoLayout) }
    }

    /// Supplies viewport geometry for the heuristic scorer.
    pub fn with_layout(mut self, layout: impl Layout + Send + Sync + 'static) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Parses HTML and extracts its article text.
    pub fn extract(&self, html: &str) -> ExtractionResult {
        match Document::parse(html) {
            Ok(doc) => self.extract_document(&doc),
            Err(err) => ExtractionResult::failure("", &SlantError::ExtractionFault(err.to_string())),
        }
    }

    /// Parses HTML loaded from `url` and extracts its article text.
    ///
    /// An unparseable URL yields a failed result rather than an error.
    pub fn extract_with_url(&self, html: &str, url: &str) -> ExtractionResult {
        match Document::parse_with_url(html, url) {
            Ok(doc) => self.extract_document(&doc),
            Err(err) => ExtractionResult::failure(url, &err),
        }
    }

    /// Runs the full extraction against an already parsed document.
    pub fn extract_document(&self, doc: &Document) -> ExtractionResult {
        let url = doc.base_url().map(|u| u.to_string()).unwrap_or_default();
        let title = doc.extract_title().unwrap_or_default();
        let result = ExtractionResult::new(url, title);

        match locate(doc, &self.config, self.layout.as_ref()) {
            Ok(Some(candidate)) => self.finish(result, &candidate),
            Ok(None) => {
                debug!("no strategy produced a candidate");
                result.fail(&SlantError::NoContentFound)
            }
            Err(err) => {
                warn!(error = %err, "locator failed, using whole-page text");
                self.whole_page(doc, result, &err)
            }
        }
    }

    /// Whether the cascade finds a candidate, without normalizing it.
    pub fn is_probably_readable(&self, html: &str) -> bool {
        let Ok(doc) = Document::parse(html) else {
            return false;
        };
        matches!(locate(&doc, &self.config, self.layout.as_ref()), Ok(Some(_)))
    }

    /// Fetches a page and extracts its article text.
    ///
    /// Fetch failures are returned as errors; extraction failures are
    /// reported inside the result.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_extract(&self, url: &str, fetch_config: &FetchConfig) -> crate::Result<ExtractionResult> {
        let html = fetch_url(url, fetch_config).await?;
        Ok(self.extract_with_url(&html, url))
    }

    /// `min_text_chars`, floored for configs built without the builder.
    fn min_text_chars(&self) -> usize {
        self.config.min_text_chars.max(MIN_SUCCESS_CHARS)
    }

    fn finish(&self, result: ExtractionResult, candidate: &ExtractionCandidate<'_>) -> ExtractionResult {
        let normalized = match normalize(&candidate.node) {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!(error = %err, method = %candidate.method, "normalization failed");
                return result.fail(&as_fault(&err));
            }
        };

        let length = normalized.char_len();
        let minimum = self.min_text_chars();
        let result = result.with_text(candidate.method, normalized);

        if length < minimum || result.word_count == 0 {
            debug!(length, words = result.word_count, method = %candidate.method, "candidate text too short");
            return result.fail(&SlantError::ContentTooShort { length, minimum });
        }

        debug!(length, words = result.word_count, method = %candidate.method, "extraction succeeded");
        ExtractionResult { success: true, ..result }
    }

    /// Last resort when the cascade could not run: the page's whole text.
    fn whole_page(&self, doc: &Document, result: ExtractionResult, fault: &SlantError) -> ExtractionResult {
        let collapsed = doc.text_content().split_whitespace().collect::<Vec<_>>().join(" ");
        let capped = NormalizedText::new(collapsed.chars().take(self.config.max_fallback_chars).collect());
        let length = capped.char_len();

        let result = result.with_text(ExtractionMethod::Fallback, capped);

        if length > self.min_text_chars() && result.word_count > 0 {
            ExtractionResult { success: true, ..result }
        } else {
            result.fail(&as_fault(fault))
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Downgrade any internal error to an extraction fault.
fn as_fault(err: &SlantError) -> SlantError {
    match err {
        SlantError::ExtractionFault(message) => SlantError::ExtractionFault(message.clone()),
        other => SlantError::ExtractionFault(other.to_string()),
    }
}

/// Extract article text from HTML with default settings.
///
/// # Example
///
/// ```rust
/// use slant_core::extract_article_text;
///
/// let sentence = "Officials confirmed the new budget on Tuesday after weeks of debate.";
/// let html = format!("<article><h1>Budget</h1><p>{0} {0}</p><p>{0} {0}</p></article>", sentence);
/// let result = extract_article_text(&html);
/// assert!(result.success);
/// ```
pub fn extract_article_text(html: &str) -> ExtractionResult {
    Extractor::new().extract(html)
}

/// Extract article text from HTML loaded from `url`, with default settings.
pub fn extract_article_text_with_url(html: &str, url: &str) -> ExtractionResult {
    Extractor::new().extract_with_url(html, url)
}

/// Fetch a page and extract its article text with default settings.
///
/// # Example
///
/// ```no_run
/// use slant_core::fetch_and_extract;
///
/// async fn words(url: &str) -> slant_core::Result<usize> {
///     let result = fetch_and_extract(url).await?;
///     Ok(result.word_count)
/// }
/// ```
#[cfg(feature = "fetch")]
pub async fn fetch_and_extract(url: &str) -> crate::Result<ExtractionResult> {
    Extractor::new().fetch_and_extract(url, &FetchConfig::default()).await
}
