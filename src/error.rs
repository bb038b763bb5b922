//! Unified error types for jobpack.
//!
//! This module provides a single [`JobpackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Classes
//!
//! | Class | Variants | Surfaced as |
//! |-------|----------|-------------|
//! | Precondition | [`InvalidUpload`](JobpackError::InvalidUpload), [`NoData`](JobpackError::NoData) | client error |
//! | Per-message | [`InvalidMessage`](JobpackError::InvalidMessage), [`MessageTooLarge`](JobpackError::MessageTooLarge) | skipped by the pipeline |
//! | Artifact | [`Report`](JobpackError::Report), [`Io`](JobpackError::Io), [`Csv`](JobpackError::Csv), ... | server error |
//!
//! Malformed emails and phone numbers are never errors: the cleaner drops
//! the field instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for jobpack operations.
///
/// # Example
///
/// ```rust
/// use jobpack::error::Result;
/// use jobpack::JobRecord;
///
/// fn load() -> Result<Vec<JobRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, JobpackError>;

/// The error type for all jobpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JobpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet writing error.
    #[cfg(feature = "xlsx-output")]
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The HTML message selector could not be compiled.
    #[error("Invalid HTML selector '{selector}': {message}")]
    Html {
        /// The CSS selector that failed
        selector: String,
        /// Parser message
        message: String,
    },

    /// The uploaded file was rejected before processing.
    ///
    /// Only `.html` exports are accepted.
    #[error("Invalid upload '{filename}': {reason}")]
    InvalidUpload {
        /// Name of the rejected file
        filename: String,
        /// Why it was rejected
        reason: String,
    },

    /// No batch has been uploaded yet, or the latest batch is empty.
    #[error("No data available for download")]
    NoData,

    /// A single message could not be turned into a record.
    #[error("Message {index} could not be processed: {reason}")]
    InvalidMessage {
        /// 0-based position of the message in the batch
        index: usize,
        /// What went wrong
        reason: String,
    },

    /// A single message exceeded the configured size limit.
    #[error("Message {index} too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    MessageTooLarge {
        /// 0-based position of the message in the batch
        index: usize,
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Actual size encountered
        actual_size: usize,
    },

    /// The requested export format is unknown or its feature is disabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which format kind was being resolved (e.g. "export")
        format: &'static str,
        /// Details about the problem
        message: String,
    },

    /// Building or writing a report artifact failed.
    ///
    /// Any partially written file has already been removed when this
    /// error is returned.
    #[error("Failed to generate {artifact}{}: {source}", display_path(.path.as_deref()))]
    Report {
        /// Which artifact was being generated (e.g. "job report")
        artifact: &'static str,
        /// Destination path, if the artifact was going to disk
        path: Option<PathBuf>,
        /// The underlying failure
        #[source]
        source: Box<JobpackError>,
    },
}

fn display_path(path: Option<&std::path::Path>) -> String {
    path.map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl JobpackError {
    /// Creates an invalid upload error.
    pub fn invalid_upload(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        JobpackError::InvalidUpload {
            filename: filename.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid message error.
    pub fn invalid_message(index: usize, reason: impl Into<String>) -> Self {
        JobpackError::InvalidMessage {
            index,
            reason: reason.into(),
        }
    }

    /// Creates a message-too-large error.
    pub fn message_too_large(index: usize, max_size: usize, actual_size: usize) -> Self {
        JobpackError::MessageTooLarge {
            index,
            max_size,
            actual_size,
        }
    }

    /// Wraps a failure that happened while producing an artifact.
    pub fn report(artifact: &'static str, path: Option<PathBuf>, source: JobpackError) -> Self {
        JobpackError::Report {
            artifact,
            path,
            source: Box::new(source),
        }
    }

    /// Creates an HTML selector error.
    pub fn html(selector: impl Into<String>, message: impl Into<String>) -> Self {
        JobpackError::Html {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, JobpackError::Io(_))
    }

    /// Returns `true` if there was no batch to export.
    pub fn is_not_found(&self) -> bool {
        matches!(self, JobpackError::NoData)
    }

    /// Returns `true` if the upload was rejected.
    pub fn is_invalid_upload(&self) -> bool {
        matches!(self, JobpackError::InvalidUpload { .. })
    }

    /// Returns `true` if this error concerns a single message.
    pub fn is_message_error(&self) -> bool {
        matches!(
            self,
            JobpackError::InvalidMessage { .. } | JobpackError::MessageTooLarge { .. }
        )
    }

    /// Returns `true` if the caller is at fault (bad upload, nothing to export).
    pub fn is_client_error(&self) -> bool {
        self.is_invalid_upload() || self.is_not_found()
    }

    /// Returns `true` if this error should be reported as a server failure.
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

// ============================================================================
// Tests
// ============================================================================
