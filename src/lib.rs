//! # Jobpack
//!
//! A Rust library for pulling job postings and recruiter contacts out of
//! chat exports and turning them into CSV files and spreadsheet reports.
//!
//! ## Overview
//!
//! Job channels post openings as free-form messages. Jobpack takes a
//! Telegram HTML export of such a channel and:
//!
//! 1. **splits** it into plain-text messages ([`html`])
//! 2. **extracts** candidate fields from each message with ordered pattern
//!    rules ([`core::extractor`])
//! 3. **cleans** them: emails and phone numbers are validated and
//!    normalized, everything is trimmed ([`core::cleaner`])
//! 4. **aggregates** contacts with looser email and name patterns
//!    ([`core::contacts`])
//! 5. **reports** the batch as CSV, XLSX workbooks or a JSON analysis
//!    ([`core::report`], [`core::output`])
//!
//! ## Quick Start
//!
//! ```rust
//! use jobpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = [
//!         "Job Title: Backend Engineer\nCompany: Acme Corp\nEmail: jane.doe@acme.com",
//!         "Company: Globex\nLocation: Berlin\nRecruiter: Tom Baker.",
//!     ];
//!
//!     let records = Pipeline::default().run(messages);
//!     assert_eq!(records[0].company(), Some("Acme Corp"));
//!
//!     let csv = to_csv(&records)?;
//!     assert!(csv.contains("jane.doe@acme.com"));
//!
//!     let analysis = ReportBuilder::default().analyze(&records);
//!     assert_eq!(analysis.total_contacts, 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Service API
//!
//! [`JobService`](service::JobService) bundles the pipeline with a
//! [`BatchStore`](store::BatchStore) holding the latest upload, mirroring an
//! upload/download request surface:
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "html", feature = "xlsx-output"))]
//! # fn main() -> jobpack::Result<()> {
//! use std::sync::Arc;
//! use jobpack::prelude::*;
//!
//! let service = JobService::new(Arc::new(BatchStore::new()));
//! service.upload("messages.html", &std::fs::read_to_string("messages.html")?)?;
//! service.export_contacts("contacts.xlsx")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "html", feature = "xlsx-output")))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`record`] — [`JobRecord`], [`RawCandidate`], [`Field`]
//! - [`core`] — Pipeline stages and writers
//!   - [`core::extractor`] — [`extract`](core::extract)
//!   - [`core::cleaner`] — [`clean`](core::clean), [`PhoneOutcome`](core::PhoneOutcome)
//!   - [`core::processor`] — [`Pipeline`](core::Pipeline), [`ProcessingStats`](core::ProcessingStats)
//!   - [`core::contacts`] — [`aggregate`](core::aggregate), [`ContactEntry`](core::ContactEntry)
//!   - [`core::report`] — [`ReportBuilder`](core::ReportBuilder), [`Analysis`](core::Analysis)
//!   - [`core::output`] — CSV, JSON and XLSX writers
//! - [`config`] — [`PipelineConfig`](config::PipelineConfig), [`HtmlConfig`](config::HtmlConfig), [`ReportConfig`](config::ReportConfig)
//! - `html` — Chat HTML splitting (feature `html`)
//! - [`store`] — [`BatchStore`](store::BatchStore)
//! - [`service`] — [`JobService`](service::JobService)
//! - [`format`] — [`ExportFormat`](format::ExportFormat)
//! - `cli` — CLI types (feature `cli`)
//! - [`error`] — Unified error types ([`JobpackError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "html")]
pub mod html;
pub mod record;
pub mod service;
pub mod store;

// Re-export the main types at the crate root for convenience
pub use error::{JobpackError, Result};
pub use record::{Field, JobRecord, RawCandidate};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use jobpack::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::record::{Field, JobRecord, RawCandidate};

    // Error types
    pub use crate::error::{JobpackError, Result};

    // Configuration
    pub use crate::config::{HtmlConfig, PipelineConfig, ReportConfig};

    // Pipeline
    pub use crate::core::{Pipeline, ProcessingStats, clean, extract};

    // Contacts and reports
    pub use crate::core::{Analysis, ContactEntry, Report, ReportBuilder, aggregate};

    // Output (file writers and string converters)
    pub use crate::core::output::{to_csv, to_json, write_csv, write_json};
    #[cfg(feature = "xlsx-output")]
    pub use crate::core::output::{to_xlsx, write_xlsx};

    // Service
    pub use crate::format::{ExportFormat, export_to_format};
    pub use crate::service::JobService;
    pub use crate::store::BatchStore;

    #[cfg(feature = "html")]
    pub use crate::html::HtmlExportParser;
}
