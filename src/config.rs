//! Configuration types for the pipeline, HTML splitting and reports.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`PipelineConfig`] - optional per-message size limit
//! - [`HtmlConfig`] - how chat HTML is split into messages
//! - [`ReportConfig`] - spreadsheet presentation and timestamp format
//!
//! # Example
//!
//! ```rust
//! use jobpack::config::{PipelineConfig, ReportConfig};
//!
//! let pipeline = PipelineConfig::new().with_max_message_size(64 * 1024);
//!
//! let report = ReportConfig::new().with_max_column_width(80);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the extract-and-clean pipeline.
///
/// By default every message yields a record. A size limit is opt-in; a
/// message over the limit is logged and skipped, the batch continues.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum message size in bytes (default: unlimited)
    pub max_message_size: Option<usize>,
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum message size.
    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = Some(size);
        self
    }
}

/// Configuration for splitting a chat HTML export into messages.
///
/// Telegram Desktop exports wrap each message in `<div class="message ...">`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// CSS selector matching one message element (default: `div.message`)
    pub message_selector: String,

    /// Separator placed between text nodes of one message (default: newline)
    pub text_separator: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            message_selector: "div.message".to_string(),
            text_separator: "\n".to_string(),
        }
    }
}

impl HtmlConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message selector.
    #[must_use]
    pub fn with_message_selector(mut self, selector: impl Into<String>) -> Self {
        self.message_selector = selector.into();
        self
    }

    /// Sets the text node separator.
    #[must_use]
    pub fn with_text_separator(mut self, separator: impl Into<String>) -> Self {
        self.text_separator = separator.into();
        self
    }
}

/// Configuration for report tables and spreadsheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Upper bound for an auto-sized column, in characters (default: 50)
    pub max_column_width: usize,

    /// Characters added to the longest cell when sizing a column (default: 2)
    pub column_padding: usize,

    /// chrono format for export and extraction timestamps
    pub timestamp_format: String,

    /// Number of contacts included in an analysis sample (default: 5)
    pub sample_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_column_width: 50,
            column_padding: 2,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            sample_size: 5,
        }
    }
}

impl ReportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum column width.
    #[must_use]
    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    /// Sets the column padding.
    #[must_use]
    pub fn with_column_padding(mut self, padding: usize) -> Self {
        self.column_padding = padding;
        self
    }

    /// Sets the timestamp format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Sets the analysis sample size.
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default_is_unlimited() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_message_size, None);
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = PipelineConfig::new().with_max_message_size(10);
        assert_eq!(config.max_message_size, Some(10));
    }

    #[test]
    fn test_html_config_default() {
        let config = HtmlConfig::default();
        assert_eq!(config.message_selector, "div.message");
        assert_eq!(config.text_separator, "\n");
    }

    #[test]
    fn test_report_config_default() {
        let config = ReportConfig::default();
        assert_eq!(config.max_column_width, 50);
        assert_eq!(config.column_padding, 2);
        assert_eq!(config.sample_size, 5);
    }

    #[test]
    fn test_report_config_serde() {
        let config = ReportConfig::new().with_max_column_width(30);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ReportConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.max_column_width, 30);
    }
}
