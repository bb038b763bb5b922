//! Output format writers.
//!
//! This module provides writers for the export artifacts:
//! - [`write_csv`] / [`to_csv`] - one row per job record, comma-delimited
//! - [`write_xlsx`] / [`to_xlsx`] - one sheet per report table - requires `xlsx-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON, used for the analysis summary
//!
//! # Choosing a Format
//!
//! | Format | Content | Produced from |
//! |--------|---------|---------------|
//! | CSV | Cleaned job records | `&[JobRecord]` |
//! | XLSX | Job or contacts report | [`Report`](crate::core::report::Report) |
//! | JSON | Contact analysis | any `Serialize` value |
//!
//! Every `write_*` function writes to a temporary file next to the
//! destination and renames it into place once the artifact is complete.
//! On failure the temporary file is removed and a
//! [`JobpackError::Report`] is returned.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> jobpack::Result<()> {
//! use jobpack::core::output::{to_csv, write_csv};
//! use jobpack::JobRecord;
//!
//! let records = vec![JobRecord::new("Hiring a Rust developer").with_company("Acme")];
//!
//! write_csv(&records, "job_posts.csv")?;
//!
//! // Or get as a string
//! let csv_string = to_csv(&records)?;
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{JobpackError, Result};

mod csv_writer;
mod json_writer;
#[cfg(feature = "xlsx-output")]
mod xlsx_writer;

pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
#[cfg(feature = "xlsx-output")]
pub use xlsx_writer::{to_xlsx, write_xlsx};

/// Writes `bytes` to `path` through a temporary sibling file.
pub(crate) fn write_atomic(path: &Path, artifact: &'static str, bytes: &[u8]) -> Result<()> {
    persist(path, bytes).map_err(|err| {
        warn!(artifact, path = %path.display(), error = %err, "discarded partial artifact");
        JobpackError::report(artifact, Some(path.to_path_buf()), err)
    })?;
    debug!(artifact, path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the temp file on any early return deletes it.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| JobpackError::Io(err.error))?;
    Ok(())
}
