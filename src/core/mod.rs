//! Core processing logic for jobpack.
//!
//! This module contains:
//! - [`extractor`] - Pattern rules that pull candidate fields out of one message
//! - [`cleaner`] - Email/phone validation and whitespace normalization
//! - [`processor`] - The batch pipeline and its statistics
//! - [`contacts`] - Contact discovery and aggregation across records
//! - [`report`] - Job and contact reports, analysis summary
//! - [`output`] - Format writers (CSV, JSON, XLSX)
//!
//! # Quick Start
//!
//! ```rust
//! use jobpack::core::{Pipeline, ReportBuilder, aggregate};
//!
//! let records =
//!     Pipeline::default().run(["Company: Acme Corp\nContact: Jane Doe - HR, jane@acme.com"]);
//!
//! let contacts = aggregate(&records);
//! let analysis = ReportBuilder::default().analyze(&records);
//! assert_eq!(analysis.total_jobs, 1);
//! assert_eq!(contacts[0].name, "Jane Doe");
//! ```

pub mod cleaner;
pub mod contacts;
pub mod extractor;
pub mod output;
pub mod processor;
pub mod report;

// Re-export main types for convenience
pub use cleaner::{PhoneOutcome, clean};
pub use contacts::{ContactEntry, aggregate, extract_emails, extract_names};
pub use extractor::extract;
pub use processor::{Pipeline, ProcessingStats, process_message};
pub use report::{Analysis, Cell, Report, ReportBuilder, Table};

pub use output::{to_csv, to_json, write_csv, write_json};
#[cfg(feature = "xlsx-output")]
pub use output::{to_xlsx, write_xlsx};
