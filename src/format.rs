//! Export format types for the jobpack library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn example() -> jobpack::Result<()> {
//! use std::sync::Arc;
//! use jobpack::format::{ExportFormat, export_to_format};
//! use jobpack::service::JobService;
//! use jobpack::store::BatchStore;
//!
//! let service = JobService::new(Arc::new(BatchStore::new()));
//! service.ingest(["Company: Acme\nEmail: jane@acme.com"]);
//!
//! export_to_format(&service, "job_posts.csv", ExportFormat::Csv)?;
//! export_to_format(&service, "analysis.json", ExportFormat::Analysis)?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{JobpackError, Result};
use crate::service::JobService;

/// Export artifact produced from the current batch.
///
/// - [`Csv`](ExportFormat::Csv) - flat job records
/// - [`Report`](ExportFormat::Report) - `Job_Data` / `Contact_Info` / `Summary` workbook
/// - [`Contacts`](ExportFormat::Contacts) - `Contacts` / `Summary` workbook
/// - [`Analysis`](ExportFormat::Analysis) - contact statistics as JSON
///
/// # Example
///
/// ```rust
/// use jobpack::format::ExportFormat;
/// use std::str::FromStr;
///
/// let format = ExportFormat::from_str("contacts").unwrap();
/// assert_eq!(format, ExportFormat::Contacts);
/// assert_eq!(format.extension(), "xlsx");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// One row per job record (default)
    #[default]
    Csv,

    /// Full spreadsheet report with contact info and summary sheets
    Report,

    /// Contacts-only spreadsheet
    Contacts,

    /// Contact analysis summary
    Analysis,
}

impl ExportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report | ExportFormat::Contacts => "xlsx",
            ExportFormat::Analysis => "json",
        }
    }

    /// Returns the file name offered for download.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "job_posts.csv",
            ExportFormat::Report => "job_report.xlsx",
            ExportFormat::Contacts => "contacts.xlsx",
            ExportFormat::Analysis => "analysis.json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "report", "contacts", "analysis"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Csv,
            ExportFormat::Report,
            ExportFormat::Contacts,
            ExportFormat::Analysis,
        ]
    }

    /// Returns the MIME type for this format.
    ///
    /// ```rust
    /// use jobpack::format::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    /// ```
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Report | ExportFormat::Contacts => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Analysis => "application/json",
        }
    }

    /// Returns `true` if this format needs the `xlsx-output` feature.
    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, ExportFormat::Report | ExportFormat::Contacts)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Report => write!(f, "XLSX report"),
            ExportFormat::Contacts => write!(f, "XLSX contacts"),
            ExportFormat::Analysis => write!(f, "JSON analysis"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "report" | "excel" | "xlsx" => Ok(ExportFormat::Report),
            "contacts" => Ok(ExportFormat::Contacts),
            "analysis" | "json" => Ok(ExportFormat::Analysis),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Exports the service's current batch in the given format.
///
/// # Errors
///
/// Returns an error if:
/// - No batch has been uploaded yet ([`JobpackError::NoData`])
/// - A spreadsheet format is requested without the `xlsx-output` feature
/// - The artifact cannot be written
pub fn export_to_format(
    service: &JobService,
    path: impl AsRef<Path>,
    format: ExportFormat,
) -> Result<()> {
    let path = path.as_ref();
    match format {
        ExportFormat::Csv => service.export_csv(path),
        ExportFormat::Analysis => service.export_analysis(path).map(|_| ()),
        #[cfg(feature = "xlsx-output")]
        ExportFormat::Report => service.export_report(path),
        #[cfg(feature = "xlsx-output")]
        ExportFormat::Contacts => service.export_contacts(path),
        #[allow(unreachable_patterns)]
        _ => Err(JobpackError::InvalidFormat {
            format: "export",
            message: format!(
                "Export format {} requires the 'xlsx-output' feature to be enabled",
                format
            ),
        }),
    }
}
