//! The latest uploaded batch.
//!
//! [`BatchStore`] holds the most recent batch of [`JobRecord`]s. An upload
//! replaces the whole batch; readers get a cheap `Arc` snapshot and keep
//! seeing it even if a newer upload lands while they work.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{JobpackError, Result};
use crate::record::JobRecord;

/// Last-writer-wins holder for the current batch.
#[derive(Debug)]
pub struct BatchStore {
    latest: RwLock<Arc<[JobRecord]>>,
}

impl Default for BatchStore {
    fn default() -> Self {
        Self {
            latest: RwLock::new(Arc::from(Vec::new())),
        }
    }
}

impl BatchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current batch and returns its size.
    pub fn replace(&self, records: Vec<JobRecord>) -> usize {
        let batch: Arc<[JobRecord]> = Arc::from(records);
        let len = batch.len();
        *self.latest.write() = batch;
        len
    }

    /// Returns the current batch, which may be empty.
    pub fn snapshot(&self) -> Arc<[JobRecord]> {
        Arc::clone(&self.latest.read())
    }

    /// Returns the current batch, or [`JobpackError::NoData`] if it is empty.
    pub fn latest(&self) -> Result<Arc<[JobRecord]>> {
        let batch = self.snapshot();
        if batch.is_empty() {
            return Err(JobpackError::NoData);
        }
        Ok(batch)
    }

    pub fn len(&self) -> usize {
        self.latest.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
