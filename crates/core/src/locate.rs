//! Locating the article subtree.
//!
//! [`locate`] runs a fixed cascade of strategies, most reliable first, and
//! returns the first candidate any of them accepts:
//!
//! 1. `semantic-article`: the first `<article>`
//! 2. `semantic-main`: the first `<main>`
//! 3. `class-based`: well-known content class names
//! 4. `heuristic`: best-scoring generic container
//! 5. `paragraphs`: a synthetic container of substantial paragraphs
//!
//! The whole-page `fallback` method is not part of the cascade; the
//! extraction boundary uses it when the cascade itself faults.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::exclusion::is_excluded;
use crate::extract::ExtractConfig;
use crate::layout::Layout;
use crate::parse::{Document, Element};
use crate::scoring::score;

/// Selector for `<article>`-equivalent nodes
const ARTICLE_SELECTOR: &str = r#"article, [role="article"]"#;

/// Selector for `<main>`-equivalent nodes
const MAIN_SELECTOR: &str = r#"main, [role="main"]"#;

/// Containers considered by the heuristic strategy
const CONTAINER_SELECTOR: &str = "div, section, article, main";

/// Class selectors tried, in order, by the class-based strategy
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    ".content",
    ".article-content",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".post-body",
    ".story-body",
    ".article-text",
    ".content-body",
    ".main-content",
];

/// Which strategy produced the extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    SemanticArticle,
    SemanticMain,
    ClassBased,
    Heuristic,
    Paragraphs,
    Fallback,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::SemanticArticle => "semantic-article",
            ExtractionMethod::SemanticMain => "semantic-main",
            ExtractionMethod::ClassBased => "class-based",
            ExtractionMethod::Heuristic => "heuristic",
            ExtractionMethod::Paragraphs => "paragraphs",
            ExtractionMethod::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subtree a strategy settled on
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateNode<'a> {
    /// An element of the document
    Element(Element<'a>),
    /// A virtual container holding copies of these paragraphs, in document order
    Paragraphs(Vec<Element<'a>>),
}

impl CandidateNode<'_> {
    /// Owned HTML copy of the candidate's contents.
    ///
    /// For a real element this is its inner HTML, so the candidate root can
    /// never be stripped by later filtering.
    pub fn to_html(&self) -> String {
        match self {
            CandidateNode::Element(element) => element.inner_html(),
            CandidateNode::Paragraphs(paragraphs) => paragraphs.iter().map(Element::outer_html).collect(),
        }
    }

    /// Raw text of the candidate.
    pub fn text(&self) -> String {
        match self {
            CandidateNode::Element(element) => element.text(),
            CandidateNode::Paragraphs(paragraphs) => paragraphs.iter().map(Element::text).collect(),
        }
    }
}

/// A candidate subtree plus the method that found it
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionCandidate<'a> {
    pub method: ExtractionMethod,
    pub node: CandidateNode<'a>,
}

/// A container and its heuristic score
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub element: Element<'a>,
    pub score: f64,
}

type Strategy = for<'a> fn(&'a Document, &ExtractConfig, &dyn Layout) -> Result<Option<CandidateNode<'a>>>;

/// The cascade, in priority order
const CASCADE: &[(ExtractionMethod, Strategy)] = &[
    (ExtractionMethod::SemanticArticle, semantic_article),
    (ExtractionMethod::SemanticMain, semantic_main),
    (ExtractionMethod::ClassBased, class_based),
    (ExtractionMethod::Heuristic, heuristic),
    (ExtractionMethod::Paragraphs, paragraphs),
];

/// Whether an element looks like a complete article body
///
/// Requires more than `min_candidate_chars` characters of trimmed text and at
/// least `min_candidate_paragraphs` `<p>` descendants.
pub fn is_valid_content(element: &Element<'_>, config: &ExtractConfig) -> Result<bool> {
    if element.trimmed_text_len() <= config.min_candidate_chars {
        return Ok(false);
    }
    Ok(element.count("p")? >= config.min_candidate_paragraphs)
}

fn semantic_article<'a>(doc: &'a Document, config: &ExtractConfig, _: &dyn Layout) -> Result<Option<CandidateNode<'a>>> {
    first_valid(doc, ARTICLE_SELECTOR, config)
}

fn semantic_main<'a>(doc: &'a Document, config: &ExtractConfig, _: &dyn Layout) -> Result<Option<CandidateNode<'a>>> {
    first_valid(doc, MAIN_SELECTOR, config)
}

fn first_valid<'a>(doc: &'a Document, selector: &str, config: &ExtractConfig) -> Result<Option<CandidateNode<'a>>> {
    let Some(element) = doc.select_first(selector)? else {
        return Ok(None);
    };
    if is_valid_content(&element, config)? { Ok(Some(CandidateNode::Element(element))) } else { Ok(None) }
}

/// Tries each configured selector in order and looks only at its first match.
///
/// Returns as soon as one of those first matches is valid; matches of
/// different selectors are never compared with each other.
fn class_based<'a>(doc: &'a Document, config: &ExtractConfig, _: &dyn Layout) -> Result<Option<CandidateNode<'a>>> {
    for selector in &config.content_selectors {
        let Some(element) = doc.select_first(selector)? else {
            continue;
        };
        if is_valid_content(&element, config)? {
            debug!(selector = %selector, "class selector matched");
            return Ok(Some(CandidateNode::Element(element)));
        }
    }
    Ok(None)
}

/// Scores every non-excluded container, highest first.
///
/// Ties keep document order.
pub fn rank_containers<'a>(doc: &'a Document, config: &ExtractConfig, layout: &dyn Layout) -> Result<Vec<ScoredCandidate<'a>>> {
    let mut ranked: Vec<ScoredCandidate<'a>> = doc
        .select(CONTAINER_SELECTOR)?
        .into_iter()
        .filter(|element| !is_excluded(element))
        .map(|element| {
            let score = score(&element, &config.score, layout);
            ScoredCandidate { element, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    Ok(ranked)
}

fn heuristic<'a>(doc: &'a Document, config: &ExtractConfig, layout: &dyn Layout) -> Result<Option<CandidateNode<'a>>> {
    let ranked = rank_containers(doc, config, layout)?;
    let Some(top) = ranked.into_iter().next() else {
        return Ok(None);
    };

    debug!(tag = %top.element.tag_name(), score = top.score, "top heuristic container");

    if top.score > config.heuristic_threshold { Ok(Some(CandidateNode::Element(top.element))) } else { Ok(None) }
}

fn paragraphs<'a>(doc: &'a Document, config: &ExtractConfig, _: &dyn Layout) -> Result<Option<CandidateNode<'a>>> {
    if doc.count("p")? < config.min_paragraph_count {
        return Ok(None);
    }

    let kept: Vec<Element<'a>> = doc
        .select("p")?
        .into_iter()
        .filter(|p| p.trimmed_text_len() > config.min_paragraph_chars)
        .filter(|p| p.parent().is_none_or(|parent| !is_excluded(&parent)))
        .collect();

    let total: usize = kept.iter().map(|p| p.text().chars().count()).sum();
    debug!(kept = kept.len(), total_chars = total, "paragraph fallback");

    if total > config.min_paragraphs_total_chars { Ok(Some(CandidateNode::Paragraphs(kept))) } else { Ok(None) }
}

/// Run the cascade and return the first accepted candidate.
///
/// `Ok(None)` means every strategy declined. An `Err` means a strategy
/// faulted (for instance on an invalid configured selector) and the cascade
/// could not complete.
pub fn locate<'a>(doc: &'a Document, config: &ExtractConfig, layout: &dyn Layout) -> Result<Option<ExtractionCandidate<'a>>> {
    for (method, strategy) in CASCADE {
        if let Some(node) = strategy(doc, config, layout)? {
            debug!(method = %method, "candidate located");
            return Ok(Some(ExtractionCandidate { method: *method, node }));
        }
        debug!(method = %method, "strategy declined");
    }
    Ok(None)
}
