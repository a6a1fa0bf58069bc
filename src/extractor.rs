use log::{debug, error};
use reqwest::{Client, StatusCode};
use scraper::{Html, Node};
use std::time::Duration;

use crate::app_config::FetchConfig;
use crate::errors::{ConfigError, ExtractionError};

// @module: Article download and plain-text extraction

/// Elements whose text is never prose
///
/// `noscript` is parsed with scripting enabled, so its content arrives as a
/// single raw-markup text node.
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Separator inserted between text nodes
const NODE_SEPARATOR: &str = " ";

/// Separator that splits a line into fragments
const FRAGMENT_SEPARATOR: &str = "  ";

/// Fetches article pages and reduces them to clean, line-oriented text
pub struct TextExtractor {
    /// HTTP client for page requests
    client: Client,
}

impl TextExtractor {
    /// Create a new extractor from fetch settings
    ///
    /// No request timeout is set unless `timeout_secs` is configured.
    pub fn new(config: &FetchConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    /// Download the raw markup of a page
    ///
    /// Anything other than `200 OK` is a [`ExtractionError::FetchFailure`].
    /// The request is sent once; redirects follow the client defaults.
    pub async fn fetch(&self, url: &str) -> Result<String, ExtractionError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to access {}: {}", url, e);
                ExtractionError::RequestFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Failed to access {}. Status: {}", url, status.as_u16());
            return Err(ExtractionError::FetchFailure {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await
            .map_err(|e| ExtractionError::RequestFailed {
                url: url.to_string(),
                message: format!("Failed to read response body: {}", e),
            })
    }

    /// Fetch a page and return its cleaned text
    pub async fn extract_text_from_url(&self, url: &str) -> Result<String, ExtractionError> {
        let html = self.fetch(url).await?;
        let text = extract_text(&html);

        if text.is_empty() {
            error!("No text found at {}", url);
            return Err(ExtractionError::EmptyDocument(url.to_string()));
        }

        debug!("Extracted {} characters from {}", text.len(), url);
        Ok(text)
    }
}

/// Convert an HTML document into normalized plain text
///
/// Text inside `script` and `style` elements is dropped. The remaining text
/// nodes are joined with a single space in document order and then passed
/// through [`normalize_text`].
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => SKIPPED_ELEMENTS.contains(&element.name()),
            _ => false,
        });

        if !hidden {
            pieces.push(&**text);
        }
    }

    normalize_text(&pieces.join(NODE_SEPARATOR))
}

/// Normalize raw text into one fragment per line
///
/// Each line is trimmed and split on double spaces; every fragment is trimmed
/// and empty ones are discarded. Order is preserved.
pub fn normalize_text(raw: &str) -> String {
    raw.split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split(FRAGMENT_SEPARATOR))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line boundaries, including the vertical tab, form feed and Unicode separators
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
