//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Export format options
//!
//! # Example
//!
//! ```rust
//! use jobpack::cli::OutputFormat;
//!
//! let format = OutputFormat::Contacts;
//! println!("Format: {}", format); // "XLSX contacts"
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::format::ExportFormat;

/// Default output path; its extension follows `--format` when left unchanged.
pub const DEFAULT_OUTPUT: &str = "job_posts.csv";

/// Extract job postings and recruiter contacts from a Telegram HTML
/// chat export into CSV, spreadsheet reports, or a JSON analysis.
#[derive(Parser, Debug, Clone)]
#[command(name = "jobpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    jobpack messages.html
    jobpack messages.html -o jobs.csv
    jobpack messages.html --format report
    jobpack messages.html -f contacts -o recruiters.xlsx
    jobpack messages.html -f analysis -v")]
pub struct Args {
    /// Path to the HTML chat export
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Log pipeline progress (info level)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Export format options.
///
/// - [`Csv`](OutputFormat::Csv) - one row per job posting
/// - [`Report`](OutputFormat::Report) - workbook with job data, contacts and summary
/// - [`Contacts`](OutputFormat::Contacts) - workbook with contacts only
/// - [`Analysis`](OutputFormat::Analysis) - contact statistics as JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Job records as CSV (default)
    #[default]
    Csv,

    /// Full XLSX report
    #[value(alias = "excel")]
    Report,

    /// Contacts-only XLSX report
    Contacts,

    /// JSON contact analysis
    Analysis,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        ExportFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&ExportFormat::from(*self), f)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ExportFormat>().map(|format| match format {
            ExportFormat::Report => OutputFormat::Report,
            ExportFormat::Contacts => OutputFormat::Contacts,
            ExportFormat::Analysis => OutputFormat::Analysis,
            _ => OutputFormat::Csv,
        })
    }
}

// Conversion to library format type
impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> ExportFormat {
        match format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Report => ExportFormat::Report,
            OutputFormat::Contacts => ExportFormat::Contacts,
            OutputFormat::Analysis => ExportFormat::Analysis,
        }
    }
}

/// Adjusts the output file extension to the format when using the default output.
pub fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != DEFAULT_OUTPUT {
        return output.to_string();
    }
    format!("job_posts.{}", format.extension())
}
