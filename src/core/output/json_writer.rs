//! JSON output writer.

use std::path::Path;

use serde::Serialize;

use super::write_atomic;
use crate::error::Result;

/// Writes any serializable value as pretty-printed JSON.
///
/// # Format
/// ```json
/// {
///   "total_jobs": 3,
///   "contact_extraction_rate": "66.7%",
///   ...
/// }
/// ```
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(value)?;
    write_atomic(output_path.as_ref(), "JSON export", json.as_bytes())
}

/// Converts a value to a pretty-printed JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
