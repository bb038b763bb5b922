//! CSV output writer.

use std::path::Path;

use super::write_atomic;
use crate::error::Result;
use crate::record::{Field, JobRecord};

/// Writes job records to CSV.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `name`, `email`, `phone`, `job_title`, `company`, `location`,
///   `date_of_posting`, `job_description`, `link`, `notes`
/// - Absent fields are written as empty cells
/// - Encoding: UTF-8
pub fn write_csv(records: &[JobRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let csv = to_csv(records)?;
    write_atomic(output_path.as_ref(), "CSV export", csv.as_bytes())
}

/// Converts job records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(records: &[JobRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(Vec::new());

    writer.write_record(Field::ALL.iter().map(|f| f.as_str()))?;

    for record in records {
        writer.write_record(Field::ALL.iter().map(|&f| record.value(f)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
