//! Upload and export operations over the latest batch.
//!
//! [`JobService`] is the request surface of jobpack: it validates an
//! upload, runs the pipeline, swaps the result into the injected
//! [`BatchStore`], and derives every export from whatever batch is current.
//!
//! | Operation | Precondition | Failure |
//! |-----------|--------------|---------|
//! | [`upload`](JobService::upload) | file name ends in `.html` | [`InvalidUpload`](JobpackError::InvalidUpload) |
//! | [`export_csv`](JobService::export_csv) | batch not empty | [`NoData`](JobpackError::NoData) |
//! | [`export_report`](JobService::export_report) | batch not empty | [`NoData`](JobpackError::NoData), [`Report`](JobpackError::Report) |
//! | [`export_contacts`](JobService::export_contacts) | batch not empty | [`NoData`](JobpackError::NoData), [`Report`](JobpackError::Report) |
//! | [`analyze`](JobService::analyze) | batch not empty | [`NoData`](JobpackError::NoData) |
//!
//! A failed precondition has no side effects: the store is untouched and no
//! file is created.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "html", feature = "xlsx-output"))]
//! # fn main() -> jobpack::Result<()> {
//! use std::sync::Arc;
//! use jobpack::service::JobService;
//! use jobpack::store::BatchStore;
//!
//! let service = JobService::new(Arc::new(BatchStore::new()));
//!
//! let html = std::fs::read_to_string("messages.html")?;
//! let stats = service.upload("messages.html", &html)?;
//! println!("{} job posts", stats.output_count);
//!
//! service.export_csv("job_posts.csv")?;
//! service.export_report("job_report.xlsx")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "html", feature = "xlsx-output")))]
//! # fn main() {}
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::{PipelineConfig, ReportConfig};
use crate::core::output::{to_csv, write_csv, write_json};
use crate::core::processor::{Pipeline, ProcessingStats};
use crate::core::report::{Analysis, ReportBuilder};
use crate::error::{JobpackError, Result};
use crate::store::BatchStore;

#[cfg(feature = "html")]
use crate::config::HtmlConfig;
#[cfg(feature = "html")]
use crate::html::HtmlExportParser;

/// Message returned when an upload is not an HTML file.
pub const NOT_HTML: &str = "File must be an HTML file";

/// Default file name for the CSV download.
pub const CSV_FILE_NAME: &str = "job_posts.csv";

/// Returns `true` if `filename` has an `.html` suffix (any case).
pub fn is_html_filename(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

/// Upload and export operations sharing one [`BatchStore`].
#[derive(Debug, Clone)]
pub struct JobService {
    store: Arc<BatchStore>,
    pipeline: Pipeline,
    reports: ReportBuilder,
    #[cfg(feature = "html")]
    html: HtmlExportParser,
}

impl JobService {
    /// Creates a service with default configuration.
    pub fn new(store: Arc<BatchStore>) -> Self {
        Self {
            store,
            pipeline: Pipeline::default(),
            reports: ReportBuilder::default(),
            #[cfg(feature = "html")]
            html: HtmlExportParser::default(),
        }
    }

    #[must_use]
    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline = Pipeline::new(config);
        self
    }

    #[must_use]
    pub fn with_report_config(mut self, config: ReportConfig) -> Self {
        self.reports = ReportBuilder::new(config);
        self
    }

    #[cfg(feature = "html")]
    #[must_use]
    pub fn with_html_config(mut self, config: HtmlConfig) -> Self {
        self.html = HtmlExportParser::with_config(config);
        self
    }

    pub fn store(&self) -> &Arc<BatchStore> {
        &self.store
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Validates and processes an uploaded chat export, replacing the batch.
    #[cfg(feature = "html")]
    pub fn upload(&self, filename: &str, content: &str) -> Result<ProcessingStats> {
        if !is_html_filename(filename) {
            return Err(JobpackError::invalid_upload(filename, NOT_HTML));
        }

        let messages = self.html.parse_str(content)?;
        info!(filename, messages = messages.len(), "accepted upload");
        Ok(self.ingest(messages))
    }

    /// Processes already-split messages, replacing the batch.
    pub fn ingest<I, S>(&self, messages: I) -> ProcessingStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (records, stats) = self.pipeline.run_with_stats(messages);
        self.store.replace(records);
        stats
    }

    // =========================================================================
    // Exports
    // =========================================================================

    /// Renders the current batch as CSV.
    pub fn csv(&self) -> Result<String> {
        to_csv(&self.store.latest()?)
    }

    /// Writes the current batch as CSV.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let batch = self.store.latest()?;
        write_csv(&batch, path)
    }

    /// Writes the `Job_Data` / `Contact_Info` / `Summary` workbook.
    #[cfg(feature = "xlsx-output")]
    pub fn export_report(&self, path: impl AsRef<Path>) -> Result<()> {
        let batch = self.store.latest()?;
        let report = self.reports.build_job_report(&batch);
        self.write_workbook(&report, path.as_ref(), "job report")
    }

    /// Writes the `Contacts` / `Summary` workbook.
    #[cfg(feature = "xlsx-output")]
    pub fn export_contacts(&self, path: impl AsRef<Path>) -> Result<()> {
        let batch = self.store.latest()?;
        let report = self.reports.build_contact_report(&batch);
        self.write_workbook(&report, path.as_ref(), "contacts report")
    }

    #[cfg(feature = "xlsx-output")]
    fn write_workbook(
        &self,
        report: &crate::core::report::Report,
        path: &Path,
        artifact: &'static str,
    ) -> Result<()> {
        let bytes = crate::core::output::to_xlsx(report, self.reports.config())
            .map_err(|err| JobpackError::report(artifact, Some(path.to_path_buf()), err))?;
        crate::core::output::write_atomic(path, artifact, &bytes)?;
        info!(artifact, path = %path.display(), "exported report");
        Ok(())
    }

    /// Summarizes contacts in the current batch.
    pub fn analyze(&self) -> Result<Analysis> {
        let batch = self.store.latest()?;
        Ok(self.reports.analyze(&batch))
    }

    /// Writes the analysis summary as pretty JSON.
    pub fn export_analysis(&self, path: impl AsRef<Path>) -> Result<Analysis> {
        let analysis = self.analyze()?;
        write_json(&analysis, path)?;
        Ok(analysis)
    }
}
