use crate::{ExtractionResult, Result};

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Include a header with the title, url, method and word count
    pub include_header: bool,

    /// Wrap lines at specified width (0 = no wrapping)
    pub line_width: usize,
}

/// Plain text formatter for extraction results
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, result: &ExtractionResult) -> Result<String> {
        to_text(result, &self.config)
    }
}

/// Render a result as plain text.
///
/// Failed results render their error message in place of the text.
pub fn to_text(result: &ExtractionResult, config: &TextConfig) -> Result<String> {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(result));
        output.push_str("\n\n");
    }

    if let Some(error) = result.error.as_deref().filter(|_| !result.success) {
        output.push_str("Error: ");
        output.push_str(error);
    } else if config.line_width > 0 {
        output.push_str(&wrap_text(&result.text, config.line_width));
    } else {
        output.push_str(&result.text);
    }

    Ok(output.trim().to_string())
}

fn generate_header(result: &ExtractionResult) -> String {
    let mut header = String::new();

    if !result.title.is_empty() {
        header.push_str(&result.title);
        header.push('\n');
        header.push_str(&"=".repeat(result.title.chars().count()));
        header.push('\n');
    }

    let mut meta_parts = Vec::new();

    if !result.url.is_empty() {
        meta_parts.push(format!("Source: {}", result.url));
    }

    if let Some(method) = result.extraction_method {
        meta_parts.push(format!("Method: {}", method));
    }

    meta_parts.push(format!("Words: {}", result.word_count));

    header.push_str(&meta_parts.join(" | "));
    header.push('\n');

    header
}

/// Wrap each paragraph to `width` columns, keeping blank lines between them
fn wrap_text(text: &str, width: usize) -> String {
    text.split("\n\n")
        .map(|paragraph| {
            let words: Vec<&str> = paragraph.split_whitespace().collect();
            wrap_words(&words, width)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_length = 0;

    for word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push_str(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_length += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractionMethod, SlantError};

    fn sample() -> ExtractionResult {
        ExtractionResult {
            success: true,
            text: "First paragraph here.\n\nSecond one.".to_string(),
            word_count: 5,
            url: "https://example.com/story".to_string(),
            title: "Story".to_string(),
            extraction_method: Some(ExtractionMethod::SemanticMain),
            error: None,
        }
    }

    #[test]
    fn test_plain_text_only() {
        let text = to_text(&sample(), &TextConfig::default()).unwrap();
        assert_eq!(text, "First paragraph here.\n\nSecond one.");
    }

    #[test]
    fn test_header() {
        let config = TextConfig { include_header: true, ..Default::default() };
        let text = to_text(&sample(), &config).unwrap();

        assert!(text.starts_with("Story\n=====\n"));
        assert!(text.contains("Source: https://example.com/story | Method: semantic-main | Words: 5"));
        assert!(text.ends_with("Second one."));
    }

    #[test]
    fn test_failure_shows_error() {
        let result = ExtractionResult::failure("", &SlantError::NoContentFound);
        let text = to_text(&result, &TextConfig::default()).unwrap();
        assert_eq!(text, "Error: Could not find the main article content on this page");
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let wrapped = wrap_text("one two three four\n\nfive six", 9);
        assert_eq!(wrapped, "one two\nthree\nfour\n\nfive six");
    }
}
