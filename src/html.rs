//! Chat HTML export splitting.
//!
//! Turns an HTML chat export (Telegram Desktop's "Export chat history" in
//! HTML mode) into the ordered list of plain-text messages the pipeline
//! consumes. Each element matching [`HtmlConfig::message_selector`] becomes
//! one message. Text is read the way a browser lays it out: inline markup
//! such as `<b>` or `<a>` flows into the surrounding line, while `<br>` and
//! block elements start a new one. Lines are whitespace-collapsed, blank
//! lines are dropped and the rest are joined with
//! [`HtmlConfig::text_separator`]. Elements with no text are dropped.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "html")]
//! # fn main() -> jobpack::Result<()> {
//! use jobpack::html::HtmlExportParser;
//!
//! let html = r#"
//!     <div class="message default">Company: Acme<br>Location: Remote</div>
//!     <div class="message service"></div>
//! "#;
//!
//! let messages = HtmlExportParser::new().parse_str(html)?;
//! assert_eq!(messages, vec!["Company: Acme\nLocation: Remote"]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "html"))]
//! # fn main() {}
//! ```

use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::HtmlConfig;
use crate::error::{JobpackError, Result};

/// Splits chat HTML into message texts.
#[derive(Debug, Clone, Default)]
pub struct HtmlExportParser {
    config: HtmlConfig,
}

impl HtmlExportParser {
    /// Creates a parser with the default `div.message` selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: HtmlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }

    /// Parses HTML from a string.
    pub fn parse_str(&self, html: &str) -> Result<Vec<String>> {
        let selector = Selector::parse(&self.config.message_selector)
            .map_err(|err| JobpackError::html(&self.config.message_selector, err.to_string()))?;

        let document = Html::parse_document(html);
        let messages: Vec<String> = document
            .select(&selector)
            .map(|element| {
                let mut lines = vec![String::new()];
                collect_lines(element, &mut lines);
                lines
                    .iter()
                    .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(&self.config.text_separator)
            })
            .filter(|text| !text.is_empty())
            .collect();

        debug!(messages = messages.len(), "split html export");
        Ok(messages)
    }

    /// Reads and parses an HTML file.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let html = fs::read_to_string(path)?;
        self.parse_str(&html)
    }
}

/// Elements that sit on their own line when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Appends the text under `element` to `lines`, opening a new line at
/// `<br>` and around block elements.
fn collect_lines(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            if let Some(line) = lines.last_mut() {
                line.push_str(text);
            }
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if name == "br" {
                lines.push(String::new());
            } else if BLOCK_ELEMENTS.contains(&name) {
                lines.push(String::new());
                collect_lines(child, lines);
                lines.push(String::new());
            } else {
                collect_lines(child, lines);
            }
        }
    }
}
