//! Boilerplate detection shared by the locator and the normalizer.
//!
//! The predicate only looks at a node's tag, `class` and `id`, so it works on
//! both DOM elements ([`Element`]) and streaming rewriter elements (see
//! [`crate::normalize`]).

use crate::parse::Element;

/// Tags that never hold article text.
pub const EXCLUDED_TAGS: &[&str] = &["nav", "header", "footer", "aside", "script", "style"];

/// Class/id fragments that mark page furniture.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "nav",
    "menu",
    "sidebar",
    "ads",
    "advertisement",
    "comments",
    "social",
    "share",
    "popup",
    "modal",
];

/// Extra tags stripped from a chosen candidate before its text is read.
pub const STRIP_TAGS: &[&str] = &["noscript", "iframe", "svg", "canvas", "button"];

/// Extra class/id fragments stripped from a chosen candidate.
pub const STRIP_KEYWORDS: &[&str] = &["related", "recommended"];

/// Which rule set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionLevel {
    /// Used to reject candidate containers and paragraph parents.
    Standard,
    /// Standard rules plus [`STRIP_TAGS`] and [`STRIP_KEYWORDS`].
    Extended,
}

/// Returns true if `haystack` contains any of `keywords`, ignoring case.
fn contains_keyword(haystack: &str, keywords: &[&str]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let lowered = haystack.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Core rule over raw node parts.
///
/// `class` is the full attribute value; matching is by substring, so
/// `main-nav` and `navbar` both hit the `nav` keyword.
pub fn is_excluded_parts(tag: &str, class: &str, id: &str, level: ExclusionLevel) -> bool {
    let tag = tag.to_ascii_lowercase();

    if EXCLUDED_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if contains_keyword(class, EXCLUDED_KEYWORDS) || contains_keyword(id, EXCLUDED_KEYWORDS) {
        return true;
    }

    match level {
        ExclusionLevel::Standard => false,
        ExclusionLevel::Extended => {
            STRIP_TAGS.contains(&tag.as_str())
                || contains_keyword(class, STRIP_KEYWORDS)
                || contains_keyword(id, STRIP_KEYWORDS)
        }
    }
}

/// Whether an element is navigation, advertising, comments or similar furniture.
pub fn is_excluded(element: &Element<'_>) -> bool {
    is_excluded_parts(&element.tag_name(), element.class_name(), element.id(), ExclusionLevel::Standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn first<'a>(doc: &'a Document, selector: &str) -> Element<'a> {
        doc.select_first(selector).unwrap().unwrap()
    }

    #[rstest]
    #[case("nav")]
    #[case("header")]
    #[case("footer")]
    #[case("aside")]
    #[case("script")]
    #[case("style")]
    fn test_excluded_tags(#[case] tag: &str) {
        assert!(is_excluded_parts(tag, "", "", ExclusionLevel::Standard));
        assert!(is_excluded_parts(&tag.to_uppercase(), "", "", ExclusionLevel::Standard));
    }

    #[rstest]
    #[case("main-nav")]
    #[case("dropdown-menu")]
    #[case("left-sidebar")]
    #[case("google-ads")]
    #[case("advertisement")]
    #[case("comments-section")]
    #[case("social-links")]
    #[case("share-buttons")]
    #[case("newsletter-popup")]
    #[case("Modal")]
    fn test_excluded_class_keywords(#[case] class: &str) {
        assert!(is_excluded_parts("div", class, "", ExclusionLevel::Standard));
        assert!(is_excluded_parts("div", "", class, ExclusionLevel::Standard));
    }

    #[test]
    fn test_content_not_excluded() {
        assert!(!is_excluded_parts("div", "article-content", "story", ExclusionLevel::Standard));
        assert!(!is_excluded_parts("p", "", "", ExclusionLevel::Standard));
        assert!(!is_excluded_parts("section", "related-stories", "", ExclusionLevel::Standard));
    }

    #[test]
    fn test_extended_level() {
        assert!(is_excluded_parts("section", "related-stories", "", ExclusionLevel::Extended));
        assert!(is_excluded_parts("div", "", "recommended", ExclusionLevel::Extended));
        assert!(is_excluded_parts("noscript", "", "", ExclusionLevel::Extended));
        assert!(is_excluded_parts("iframe", "", "", ExclusionLevel::Extended));
        assert!(!is_excluded_parts("p", "lead", "", ExclusionLevel::Extended));
    }

    #[test]
    fn test_tag_exclusion_ignores_class() {
        let doc = Document::parse(r#"<nav class="article-content">x</nav><footer id="story">y</footer>"#).unwrap();
        assert!(is_excluded(&first(&doc, "nav")));
        assert!(is_excluded(&first(&doc, "footer")));
    }

    #[test]
    fn test_class_exclusion_ignores_tag() {
        let doc = Document::parse(r#"<article class="social-bar">x</article><main id="sidebar">y</main>"#).unwrap();
        assert!(is_excluded(&first(&doc, "article")));
        assert!(is_excluded(&first(&doc, "main")));
    }

    #[test]
    fn test_idempotent() {
        let doc = Document::parse(r#"<div class="menu">x</div><div class="body">y</div>"#).unwrap();
        for element in doc.select("div").unwrap() {
            assert_eq!(is_excluded(&element), is_excluded(&element));
        }
    }
}
