use crate::Document;

impl Document {
    /// Extract the page title with priority fallback:
    /// 1. `<title>` element
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. JSON-LD `headline`
    /// 5. First `<h1>` element
    ///
    /// Whitespace is collapsed and empty values are skipped.
    pub fn extract_title(&self) -> Option<String> {
        self.title()
            .and_then(non_empty)
            .or_else(|| self.get_meta_content("og:title").and_then(non_empty))
            .or_else(|| self.get_meta_content("twitter:title").and_then(non_empty))
            .or_else(|| self.json_ld_headline().and_then(non_empty))
            .or_else(|| self.first_heading().and_then(non_empty))
    }

    fn get_meta_content(&self, attr: &str) -> Option<String> {
        let selector = format!("meta[name=\"{}\"]", attr);
        if let Ok(Some(el)) = self.select_first(&selector)
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        let selector = format!("meta[property=\"{}\"]", attr);
        if let Ok(Some(el)) = self.select_first(&selector)
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        None
    }

    /// `headline` of the first parseable JSON-LD block
    fn json_ld_headline(&self) -> Option<String> {
        let elements = self.select("script[type=\"application/ld+json\"]").ok()?;
        elements.iter().find_map(|el| {
            let value = serde_json::from_str::<serde_json::Value>(el.text().trim()).ok()?;
            value.get("headline")?.as_str().map(str::to_string)
        })
    }

    fn first_heading(&self) -> Option<String> {
        self.select_first("h1").ok().flatten().map(|h1| h1.text())
    }
}

fn non_empty(value: String) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() { None } else { Some(collapsed) }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn test_title_element_first() {
        let html = r#"<html><head><title> Page
            Title </title><meta property="og:title" content="OG"></head><body><h1>H</h1></body></html>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.extract_title(), Some("Page Title".to_string()));
    }

    #[test]
    fn test_og_title_fallback() {
        let html = r#"<html><head><title>  </title><meta property="og:title" content="Open Graph"></head></html>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.extract_title(), Some("Open Graph".to_string()));
    }

    #[test]
    fn test_twitter_title_fallback() {
        let html = r#"<html><head><meta name="twitter:title" content="Tweeted"></head></html>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.extract_title(), Some("Tweeted".to_string()));
    }

    #[test]
    fn test_json_ld_headline() {
        let html = r#"<html><head><script type="application/ld+json">{"@type":"NewsArticle","headline":"From LD"}</script></head></html>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.extract_title(), Some("From LD".to_string()));
    }

    #[test]
    fn test_h1_fallback() {
        let html = "<html><body><h1>Heading <em>only</em></h1></body></html>";
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.extract_title(), Some("Heading only".to_string()));
    }

    #[test]
    fn test_no_title() {
        let doc = Document::parse("<html><body><p>x</p></body></html>").unwrap();
        assert_eq!(doc.extract_title(), None);
    }
}
