//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types. A `Document`
//! is the read-only tree the extraction cascade works against; an `Element`
//! is a cheap, copyable handle to one node of it.
//!
//! # Example
//!
//! ```rust
//! use slant_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::{Result, SlantError};

/// Tags whose text never counts as readable page text.
const NON_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use slant_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed input, so this only fails if a
    /// future parser backend rejects the input.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: None })
    }

    /// Parses HTML and records the URL the page was loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`SlantError::InvalidUrl`] if `url` is not an absolute URL.
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let base_url = Url::parse(url).map_err(|e| SlantError::InvalidUrl(e.to_string()))?;
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: Some(base_url) })
    }

    /// Gets the URL the document was loaded from, if known.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Gets the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SlantError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slant_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::from).collect())
    }

    /// Selects the first element in document order matching a CSS selector.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(Element::from))
    }

    /// Counts the elements matching a CSS selector.
    pub fn count(&self, selector: &str) -> Result<usize> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).count())
    }

    /// Gets the `<body>` element, if the document has one.
    pub fn body(&'_ self) -> Option<Element<'_>> {
        self.select_first("body").ok().flatten()
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets the readable text of the page body.
    ///
    /// Text inside `script`, `style`, `noscript` and `template` elements is
    /// skipped. Falls back to the whole document when there is no body.
    pub fn text_content(&self) -> String {
        match self.body() {
            Some(body) => body.visible_text(),
            None => Element::from(self.html.root_element()).visible_text(),
        }
    }
}

/// A copyable handle to an element of a [`Document`].
///
/// # Example
///
/// ```rust
/// use slant_core::parse::Document;
///
/// let html = r#"<a href="https://example.com" class="Nav Link">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// assert_eq!(link.class_name(), "Nav Link");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Element<'a> {
    /// Gets the inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the outer HTML of this element, including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Number of characters in this element's text once trimmed.
    pub fn trimmed_text_len(&self) -> usize {
        self.text().trim().chars().count()
    }

    /// Text of this element, skipping script/style content.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        for node in self.element.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| NON_TEXT_TAGS.contains(&parent.value().name()));
            if !hidden {
                out.push_str(text);
            }
        }
        out
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the raw `class` attribute, or an empty string.
    pub fn class_name(&self) -> &'a str {
        self.attr("class").unwrap_or_default()
    }

    /// Gets the `id` attribute, or an empty string.
    pub fn id(&self) -> &'a str {
        self.attr("id").unwrap_or_default()
    }

    /// Gets the immediate parent element, if any.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::from)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SlantError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::from).collect())
    }

    /// Counts descendant elements matching a CSS selector.
    pub fn count(&self, selector: &str) -> Result<usize> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).count())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SlantError::HtmlParseError(format!("Invalid selector: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
            <style>body { color: red; }</style>
        </head>
        <body>
            <h1>Heading</h1>
            <div id="wrap"><p class="content">Paragraph 1</p></div>
            <p class="content">Paragraph 2</p>
            <script>var hidden = "script text";</script>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
        assert!(doc.base_url().is_none());
    }

    #[test]
    fn test_parse_with_url() {
        let doc = Document::parse_with_url(SAMPLE_HTML, "https://news.example.com/story").unwrap();
        assert_eq!(doc.base_url().map(|u| u.as_str()), Some("https://news.example.com/story"));
    }

    #[test]
    fn test_parse_with_invalid_url() {
        let result = Document::parse_with_url(SAMPLE_HTML, "not a url");
        assert!(matches!(result, Err(SlantError::InvalidUrl(_))));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
        assert_eq!(doc.count("p").unwrap(), 2);
    }

    #[test]
    fn test_select_first() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let first = doc.select_first("p").unwrap().unwrap();
        assert_eq!(first.text(), "Paragraph 1");
        assert!(doc.select_first("article").unwrap().is_none());
    }

    #[test]
    fn test_parent() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let first = doc.select_first("p").unwrap().unwrap();
        let parent = first.parent().unwrap();
        assert_eq!(parent.tag_name(), "div");
        assert_eq!(parent.id(), "wrap");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(SlantError::HtmlParseError(_))));
    }

    #[test]
    fn test_text_content_skips_scripts() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let text = doc.text_content();

        assert!(text.contains("Heading"));
        assert!(text.contains("Paragraph 2"));
        assert!(!text.contains("script text"));
        assert!(!text.contains("color: red"));
    }
}
