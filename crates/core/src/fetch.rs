//! Acquiring HTML from URLs, files, and stdin.
//!
//! Extraction itself only ever sees a string; these helpers are how the
//! command-line surface gets one.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{Result, SlantError};

/// HTTP client configuration for fetching article pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Slant/1.0)".to_string() }
    }
}

/// Fetches HTML content from an `http` or `https` URL.
///
/// Redirects are followed and the configured timeout applies to the whole
/// request. A non-success status is reported as an HTTP error.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| SlantError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(SlantError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(SlantError::HttpError)?;

    debug!(url = %parsed_url, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| timeout_or_http(e, config.timeout))?
        .error_for_status()?;

    let content = response.text().await.map_err(|e| timeout_or_http(e, config.timeout))?;
    debug!(bytes = content.len(), "page fetched");

    Ok(content)
}

fn timeout_or_http(err: reqwest::Error, timeout: u64) -> SlantError {
    if err.is_timeout() { SlantError::Timeout { timeout } } else { SlantError::HttpError(err) }
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        return Err(SlantError::FileNotFound(path_buf));
    }
    Ok(fs::read_to_string(&path_buf)?)
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Slant"));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = block_on(fetch_url("not-a-url", &config));
        assert!(matches!(result, Err(SlantError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_url_rejects_other_schemes() {
        let config = FetchConfig::default();
        let result = block_on(fetch_url("ftp://example.com/page.html", &config));
        match result {
            Err(SlantError::InvalidUrl(message)) => assert!(message.contains("ftp")),
            other => panic!("expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(SlantError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<p>hello</p>").unwrap();
        let content = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(content, "<p>hello</p>");
    }
}
