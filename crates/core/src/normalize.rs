//! Turning a candidate subtree into clean, analyzable text.
//!
//! The candidate is copied to an owned HTML string first, boilerplate
//! descendants are stripped from the copy with a streaming rewrite, and the
//! remaining paragraph and heading text is joined and cleaned. The source
//! [`Document`](crate::Document) is never touched.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::exclusion::{ExclusionLevel, is_excluded_parts};
use crate::locate::CandidateNode;
use crate::parse::Element;
use crate::{Result, SlantError};

/// Blocks whose text is collected, in document order
const TEXT_BLOCK_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6";

static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static SPACE_AROUND_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n ?").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean text and its word count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub word_count: usize,
}

impl NormalizedText {
    /// Builds from already-clean text.
    pub fn new(text: String) -> Self {
        let word_count = count_words(&text);
        Self { text, word_count }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Normalize a located candidate into plain text.
///
/// 1. Copy the candidate's HTML.
/// 2. Strip excluded descendants (extended rules) from the copy.
/// 3. Join the trimmed text of every `p` and `h1`–`h6` with a blank line,
///    or use the copy's whole text when there are none.
/// 4. Clean whitespace and count words.
pub fn normalize(candidate: &CandidateNode<'_>) -> Result<NormalizedText> {
    let copy = candidate.to_html();
    let filtered = strip_excluded(&copy)?;
    let fragment = Html::parse_fragment(&filtered);

    let selector = Selector::parse(TEXT_BLOCK_SELECTOR)
        .map_err(|e| SlantError::ExtractionFault(format!("text block selector: {}", e)))?;

    let blocks: Vec<String> = fragment
        .select(&selector)
        .map(|block| block.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    let raw = if blocks.is_empty() {
        Element::from(fragment.root_element()).visible_text()
    } else {
        blocks.join("\n\n")
    };

    Ok(NormalizedText::new(clean_text(&raw)))
}

/// Remove every element matching the extended exclusion rules, with its content.
///
/// The input was already parsed once by html5ever, so the rewriter runs
/// non-strict and keeps going through markup whose text type it cannot
/// decide on its own (such as a `<textarea>` inside `<template>`).
pub fn strip_excluded(html: &str) -> Result<String> {
    let mut output = String::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("*", |el| {
                let class = el.get_attribute("class").unwrap_or_default();
                let id = el.get_attribute("id").unwrap_or_default();
                if is_excluded_parts(&el.tag_name(), &class, &id, ExclusionLevel::Extended) {
                    el.remove();
                }
                Ok(())
            })],
            strict: false,
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| SlantError::ExtractionFault(format!("filtering candidate: {}", e)))?;
    rewriter
        .end()
        .map_err(|e| SlantError::ExtractionFault(format!("filtering candidate: {}", e)))?;

    Ok(output)
}

/// Collapse whitespace while keeping paragraph breaks.
///
/// Runs of spaces and tabs become one space, spaces next to line breaks are
/// dropped, and three or more line breaks become exactly two. Each block
/// join therefore counts as two characters toward the minimum text length.
pub fn clean_text(text: &str) -> String {
    let text = HORIZONTAL_SPACE.replace_all(text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Number of whitespace-delimited tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use pretty_assertions::assert_eq;

    fn normalize_first(html: &str, selector: &str) -> NormalizedText {
        let doc = Document::parse(html).unwrap();
        let element = doc.select_first(selector).unwrap().unwrap();
        normalize(&CandidateNode::Element(element)).unwrap()
    }

    #[test]
    fn test_joins_paragraphs_and_headings() {
        let html = r#"<article><h1> Title </h1><p>First   paragraph.</p><p>   </p><h3>Sub</h3><p>Second</p></article>"#;
        let result = normalize_first(html, "article");
        assert_eq!(result.text, "Title\n\nFirst paragraph.\n\nSub\n\nSecond");
        assert_eq!(result.word_count, 5);
    }

    #[test]
    fn test_strips_boilerplate_descendants() {
        let html = r#"<article>
            <p>Keep this.</p>
            <div class="share-tools"><p>Share on social</p></div>
            <aside><p>Aside text</p></aside>
            <section class="related"><p>Related story</p></section>
            <noscript><p>Enable JS</p></noscript>
            <p>And this.</p>
        </article>"#;
        let result = normalize_first(html, "article");
        assert_eq!(result.text, "Keep this.\n\nAnd this.");
    }

    #[test]
    fn test_candidate_root_is_never_stripped() {
        let html = r#"<main class="has-modal"><p>Body text stays.</p></main>"#;
        let result = normalize_first(html, "main");
        assert_eq!(result.text, "Body text stays.");
    }

    #[test]
    fn test_falls_back_to_full_text() {
        let html = "<div id=\"x\">Line one\n\n\n\n   Line two\t\tend<script>ignored()</script></div>";
        let result = normalize_first(html, "div");
        assert_eq!(result.text, "Line one\n\nLine two end");
        assert_eq!(result.word_count, 5);
    }

    #[test]
    fn test_ambiguous_text_tag_does_not_abort() {
        let paragraphs = "<p>The ferry schedule changes next week for every crossing on the northern route.</p>".repeat(5);
        let html = format!(
            "<article>{0}<form><select><template><textarea>z</textarea></template></select></form>{0}</article>",
            paragraphs
        );
        let result = normalize_first(&html, "article");
        assert_eq!(result.text.matches("The ferry schedule").count(), 10);
        assert!(result.text.starts_with("The ferry schedule changes"));
    }

    #[test]
    fn test_strip_excluded_tolerates_ambiguous_markup() {
        let html = "<div><nav>Menu</nav><select><template><textarea>z</textarea></template></select><p>Kept</p></div>";
        let filtered = strip_excluded(html).unwrap();
        assert!(filtered.contains("<p>Kept</p>"));
        assert!(!filtered.contains("Menu"));
    }

    #[test]
    fn test_does_not_mutate_document() {
        let html = r#"<article><p>Text</p><nav>Menu</nav></article>"#;
        let doc = Document::parse(html).unwrap();
        let before = doc.as_string();
        let element = doc.select_first("article").unwrap().unwrap();
        normalize(&CandidateNode::Element(element)).unwrap();
        assert_eq!(doc.as_string(), before);
        assert_eq!(doc.count("nav").unwrap(), 1);
    }

    #[test]
    fn test_deterministic() {
        let html = r#"<article><h2>Head</h2><p>Some words here.</p><div class="ads">Buy</div></article>"#;
        let doc = Document::parse(html).unwrap();
        let candidate = CandidateNode::Element(doc.select_first("article").unwrap().unwrap());
        assert_eq!(normalize(&candidate).unwrap(), normalize(&candidate).unwrap());
    }

    #[test]
    fn test_synthesized_paragraphs() {
        let html = "<body><p>One.</p><div><p>Two.</p></div></body>";
        let doc = Document::parse(html).unwrap();
        let paragraphs = doc.select("p").unwrap();
        let result = normalize(&CandidateNode::Paragraphs(paragraphs)).unwrap();
        assert_eq!(result.text, "One.\n\nTwo.");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a \t b  \n\n\n\n c  "), "a b\n\nc");
        assert_eq!(clean_text("\n\n"), "");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one  two\n\nthree "), 3);
    }
}
