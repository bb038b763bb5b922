use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use super::cleaner::clean;
use super::extractor::extract;
use crate::config::PipelineConfig;
use crate::error::{JobpackError, Result};
use crate::record::JobRecord;

/// Extracts and cleans one message.
///
/// # Example
/// Input:  `"Company: Acme Corp\nEmail: Jane@ACME.com"`
/// Output: record with `company = "Acme Corp"`, `email = "Jane@acme.com"`
pub fn process_message(text: &str) -> JobRecord {
    clean(extract(text))
}

/// Runs the extractor and cleaner over a batch of messages.
///
/// Messages are processed in order and each one yields exactly one record,
/// empty messages included. A message that panics during parsing (or that
/// exceeds an opt-in [`PipelineConfig::max_message_size`]) is logged and
/// skipped; the rest of the batch is always processed.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes the message at `index`, isolating any panic raised while
    /// parsing it.
    pub fn try_process(&self, index: usize, text: &str) -> Result<JobRecord> {
        if let Some(max_size) = self
            .config
            .max_message_size
            .filter(|&max| text.len() > max)
        {
            return Err(JobpackError::message_too_large(index, max_size, text.len()));
        }

        panic::catch_unwind(AssertUnwindSafe(|| process_message(text)))
            .map_err(|payload| JobpackError::invalid_message(index, panic_reason(&*payload)))
    }

    /// Processes every message, returning the records that survived.
    pub fn run<I, S>(&self, messages: I) -> Vec<JobRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_stats(messages).0
    }

    /// Like [`run`](Self::run), also reporting how many messages were skipped.
    pub fn run_with_stats<I, S>(&self, messages: I) -> (Vec<JobRecord>, ProcessingStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut stats = ProcessingStats::default();

        for (index, message) in messages.into_iter().enumerate() {
            stats.input_count += 1;
            match self.try_process(index, message.as_ref()) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(index, error = %err, "skipping message");
                    stats.skipped += 1;
                }
            }
        }

        stats.output_count = records.len();
        info!(
            input = stats.input_count,
            output = stats.output_count,
            skipped = stats.skipped,
            "processed batch"
        );
        debug!(
            with_contact = records.iter().filter(|r| r.has_contact()).count(),
            "contact fields found by primary extractor"
        );

        (records, stats)
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("parser panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("parser panicked: {msg}")
    } else {
        "parser panicked".to_string()
    }
}

/// Statistics about a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub input_count: usize,
    pub output_count: usize,
    pub skipped: usize,
}

impl ProcessingStats {
    /// Share of input messages that produced a record, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.input_count == 0 {
            return 0.0;
        }
        (self.output_count as f64 / self.input_count as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_message() {
        let record = process_message("Company: Acme Corp\nEmail: Jane@ACME.com");
        assert_eq!(record.company(), Some("Acme Corp"));
        assert_eq!(record.email(), Some("Jane@acme.com"));
    }

    #[test]
    fn test_run_preserves_order() {
        let pipeline = Pipeline::default();
        let records = pipeline.run(["Company: First", "Company: Second", "Company: Third"]);
        let companies: Vec<_> = records.iter().filter_map(|r| r.company()).collect();
        assert_eq!(companies, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_run_keeps_empty_messages() {
        let pipeline = Pipeline::default();
        let (records, stats) =
            pipeline.run_with_stats(vec!["one".to_string(), "   ".to_string(), "two".to_string()]);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].description(), "");
        assert_eq!(stats.output_count, 3);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_run_keeps_large_messages_by_default() {
        let large = format!("Company: Acme\n{}", "x".repeat(2 * 1024 * 1024));
        let (records, stats) = Pipeline::default().run_with_stats(["Company: A", large.as_str()]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].company(), Some("Acme"));
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_run_skips_oversized_messages_when_limited() {
        let pipeline = Pipeline::new(PipelineConfig::new().with_max_message_size(8));
        let (records, stats) = pipeline.run_with_stats(["short", "way too long", "tiny"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].description(), "tiny");
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_try_process_too_large() {
        let pipeline = Pipeline::new(PipelineConfig::new().with_max_message_size(4));
        let err = pipeline.try_process(7, "12345").unwrap_err();
        assert!(matches!(
            err,
            JobpackError::MessageTooLarge {
                index: 7,
                max_size: 4,
                actual_size: 5
            }
        ));
    }

    #[test]
    fn test_panic_reason() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_reason(&*payload), "parser panicked: boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_reason(&*payload), "parser panicked");
    }

    #[test]
    fn test_success_rate() {
        let stats = ProcessingStats {
            input_count: 4,
            output_count: 3,
            skipped: 1,
        };
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
        assert_eq!(ProcessingStats::default().success_rate(), 0.0);
    }
}
