use crate::{ExtractionResult, Result, SlantError};

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serialize a result to JSON, with the camelCase field names of the wire shape.
pub fn to_json(result: &ExtractionResult, config: &JsonConfig) -> Result<String> {
    let output = if config.pretty { serde_json::to_string_pretty(result) } else { serde_json::to_string(result) };
    output.map_err(|e| SlantError::ExtractionFault(format!("serializing result: {}", e)))
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, result: &ExtractionResult) -> Result<String> {
        to_json(result, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_article_text;

    fn article() -> ExtractionResult {
        let sentence = "The committee released its findings on regional water use today.";
        let html = format!(
            "<html><head><title>Water</title></head><body><article><p>{0} {0}</p><p>{0} {0}</p></article></body></html>",
            sentence
        );
        extract_article_text(&html)
    }

    #[test]
    fn test_camel_case_fields() {
        let json = to_json(&article(), &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["extractionMethod"], "semantic-article");
        assert_eq!(value["title"], "Water");
        assert!(value["wordCount"].as_u64().unwrap() > 0);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_carries_error() {
        let result = extract_article_text("<nav>Home</nav>");
        let json = to_json(&result, &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["text"], "");
        assert_eq!(value["wordCount"], 0);
        assert!(value["error"].as_str().is_some());
        assert!(value.get("extractionMethod").is_none());
    }

    #[test]
    fn test_pretty_output() {
        let formatter = JsonFormatter::new(JsonConfig { pretty: true });
        let json = formatter.format(&article()).unwrap();
        assert!(json.contains("\n  \"success\": true"));
    }
}
