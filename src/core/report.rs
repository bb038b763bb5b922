//! Tabular reports over a batch of job records.
//!
//! A [`Report`] is an ordered set of named [`Table`]s. Writers turn it into
//! a workbook (one sheet per table); tests and the CLI inspect it directly.
//!
//! # Reports
//!
//! | Report | Tables |
//! |--------|--------|
//! | [`build_job_report`](ReportBuilder::build_job_report) | `Job_Data`, `Contact_Info`, `Summary` |
//! | [`build_contact_report`](ReportBuilder::build_contact_report) | `Contacts`, `Summary` |
//!
//! `Job_Data` counts only what is found in each record's description, while
//! `Contact_Info` and `Contacts` come from [`aggregate`](super::contacts::aggregate),
//! which also searches company and role.
//!
//! # Example
//!
//! ```
//! use jobpack::core::report::{ReportBuilder, JOB_DATA};
//! use jobpack::JobRecord;
//!
//! let records = vec![JobRecord::new("Mail jane@acme.com").with_company("Acme")];
//! let report = ReportBuilder::default().build_job_report(&records);
//!
//! let jobs = report.table(JOB_DATA).unwrap();
//! assert_eq!(jobs.len(), 1);
//! assert_eq!(jobs.cell(0, "Has_Contact_Info").unwrap().to_string(), "Yes");
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use super::contacts::{ContactEntry, aggregate_at, extract_emails, extract_names};
use crate::config::ReportConfig;
use crate::record::JobRecord;

pub const JOB_DATA: &str = "Job_Data";
pub const CONTACT_INFO: &str = "Contact_Info";
pub const CONTACTS: &str = "Contacts";
pub const SUMMARY: &str = "Summary";

const JOB_COLUMNS: [&str; 10] = [
    "S_No",
    "Company",
    "Job_Role",
    "Location",
    "Description",
    "Timestamp",
    "Extracted_Emails",
    "Extracted_Names",
    "Contact_Count",
    "Has_Contact_Info",
];

const CONTACT_COLUMNS: [&str; 7] = [
    "Job_Index",
    "Company",
    "Role",
    "Email",
    "Name",
    "Source",
    "Extraction_Date",
];

const SUMMARY_COLUMNS: [&str; 2] = ["Metric", "Value"];

// ============================================================================
// Tables
// ============================================================================

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(u64),
    /// Rendered as `Yes` / `No`.
    Flag(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: usize) -> Self {
        Cell::Number(value as u64)
    }

    /// Rendered width in characters.
    pub fn width(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            other => other.to_string().chars().count(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Flag(true) => f.write_str("Yes"),
            Cell::Flag(false) => f.write_str("No"),
        }
    }
}

/// A named table with a fixed column schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width mismatch");
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Returns the cell at `row` in the named column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Looks up a `Metric`/`Value` pair in a summary table.
    pub fn metric(&self, name: &str) -> Option<&Cell> {
        self.rows
            .iter()
            .find(|row| matches!(row.first(), Some(Cell::Text(m)) if m == name))
            .and_then(|row| row.get(1))
    }

    /// Display width for each column: the longest cell, header included,
    /// plus padding, capped at the configured maximum.
    pub fn column_widths(&self, config: &ReportConfig) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(Cell::width)
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0);
                (longest + config.column_padding).min(config.max_column_width)
            })
            .collect()
    }
}

/// An ordered collection of tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub tables: Vec<Table>,
}

impl Report {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Aggregate contact statistics for a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub total_jobs: usize,
    /// Records that produced at least one contact entry.
    pub jobs_with_contacts: usize,
    pub total_contacts: usize,
    pub contacts_with_email: usize,
    pub contacts_with_name_only: usize,
    pub unique_emails: usize,
    pub unique_names: usize,
    /// `jobs_with_contacts / total_jobs` as a percentage, e.g. `"66.7%"`.
    pub contact_extraction_rate: String,
    pub sample_contacts: Vec<ContactEntry>,
}

fn extraction_rate(with_contacts: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", with_contacts as f64 / total as f64 * 100.0)
}

// ============================================================================
// Builder
// ============================================================================

/// Builds reports and analyses with a shared [`ReportConfig`].
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp(&self, at: NaiveDateTime) -> String {
        at.format(&self.config.timestamp_format).to_string()
    }

    /// Builds the `Job_Data` / `Contact_Info` / `Summary` report.
    pub fn build_job_report(&self, records: &[JobRecord]) -> Report {
        self.build_job_report_at(records, Self::now())
    }

    /// Same as [`build_job_report`](Self::build_job_report) with a fixed clock.
    pub fn build_job_report_at(&self, records: &[JobRecord], now: NaiveDateTime) -> Report {
        let mut jobs = Table::new(JOB_DATA, &JOB_COLUMNS);
        let mut all_emails = Vec::new();
        let mut all_names = Vec::new();
        let mut jobs_with_contact = 0;

        for (idx, record) in records.iter().enumerate() {
            let emails = extract_emails(record.description());
            let names = extract_names(record.description());
            let found = emails.len() + names.len();
            if found > 0 {
                jobs_with_contact += 1;
            }

            jobs.push_row(vec![
                Cell::number(idx + 1),
                Cell::text(record.company().unwrap_or("")),
                Cell::text(record.job_title().unwrap_or("")),
                Cell::text(record.location().unwrap_or("")),
                Cell::text(record.description()),
                Cell::text(record.date_of_posting.as_deref().unwrap_or("")),
                Cell::text(emails.join(", ")),
                Cell::text(names.join(", ")),
                Cell::number(found),
                Cell::Flag(found > 0),
            ]);

            all_emails.extend(emails);
            all_names.extend(names);
        }

        let contacts = self.contact_table(CONTACT_INFO, &aggregate_at(records, now));

        let companies: HashSet<&str> = records.iter().filter_map(JobRecord::company).collect();
        let mut summary = Table::new(SUMMARY, &SUMMARY_COLUMNS);
        push_metric(&mut summary, "Total Jobs", Cell::number(records.len()));
        push_metric(&mut summary, "Jobs with Contact Info", Cell::number(jobs_with_contact));
        push_metric(&mut summary, "Total Emails Found", Cell::number(all_emails.len()));
        push_metric(&mut summary, "Unique Emails Found", Cell::number(count_unique(&all_emails)));
        push_metric(&mut summary, "Total Names Found", Cell::number(all_names.len()));
        push_metric(&mut summary, "Unique Names Found", Cell::number(count_unique(&all_names)));
        push_metric(&mut summary, "Unique Companies", Cell::number(companies.len()));
        push_metric(&mut summary, "Export Date", Cell::text(self.timestamp(now)));

        Report {
            tables: vec![jobs, contacts, summary],
        }
    }

    /// Builds the `Contacts` / `Summary` report.
    ///
    /// The `Contacts` table keeps its columns even when nothing was found.
    pub fn build_contact_report(&self, records: &[JobRecord]) -> Report {
        self.build_contact_report_at(records, Self::now())
    }

    /// Same as [`build_contact_report`](Self::build_contact_report) with a fixed clock.
    pub fn build_contact_report_at(&self, records: &[JobRecord], now: NaiveDateTime) -> Report {
        let entries = aggregate_at(records, now);
        let contacts = self.contact_table(CONTACTS, &entries);

        let emails: HashSet<&str> = entries
            .iter()
            .filter(|c| c.has_email())
            .map(|c| c.email.as_str())
            .collect();
        let names: HashSet<&str> = entries
            .iter()
            .filter(|c| c.has_name())
            .map(|c| c.name.as_str())
            .collect();

        let mut summary = Table::new(SUMMARY, &SUMMARY_COLUMNS);
        push_metric(&mut summary, "Total Contacts Found", Cell::number(entries.len()));
        push_metric(
            &mut summary,
            "Contacts with Email",
            Cell::number(entries.iter().filter(|c| c.has_email()).count()),
        );
        push_metric(
            &mut summary,
            "Contacts with Name Only",
            Cell::number(entries.iter().filter(|c| c.is_name_only()).count()),
        );
        push_metric(&mut summary, "Unique Emails", Cell::number(emails.len()));
        push_metric(&mut summary, "Unique Names", Cell::number(names.len()));
        push_metric(&mut summary, "Export Date", Cell::text(self.timestamp(now)));

        Report {
            tables: vec![contacts, summary],
        }
    }

    fn contact_table(&self, name: &str, entries: &[ContactEntry]) -> Table {
        let mut table = Table::new(name, &CONTACT_COLUMNS);
        for entry in entries {
            table.push_row(vec![
                Cell::number(entry.job_index),
                Cell::text(&entry.company),
                Cell::text(&entry.role),
                Cell::text(&entry.email),
                Cell::text(&entry.name),
                Cell::text(&entry.source),
                Cell::text(self.timestamp(entry.extracted_at)),
            ]);
        }
        table
    }

    /// Summarizes the contacts discoverable in `records`.
    pub fn analyze(&self, records: &[JobRecord]) -> Analysis {
        self.analyze_at(records, Self::now())
    }

    /// Same as [`analyze`](Self::analyze) with a fixed clock.
    pub fn analyze_at(&self, records: &[JobRecord], now: NaiveDateTime) -> Analysis {
        let entries = aggregate_at(records, now);

        let jobs_with_contacts = entries
            .iter()
            .map(|c| c.job_index)
            .collect::<HashSet<_>>()
            .len();
        let unique_emails = entries
            .iter()
            .filter(|c| c.has_email())
            .map(|c| c.email.as_str())
            .collect::<HashSet<_>>()
            .len();
        let unique_names = entries
            .iter()
            .filter(|c| c.has_name())
            .map(|c| c.name.as_str())
            .collect::<HashSet<_>>()
            .len();

        Analysis {
            total_jobs: records.len(),
            jobs_with_contacts,
            total_contacts: entries.len(),
            contacts_with_email: entries.iter().filter(|c| c.has_email()).count(),
            contacts_with_name_only: entries.iter().filter(|c| c.is_name_only()).count(),
            unique_emails,
            unique_names,
            contact_extraction_rate: extraction_rate(jobs_with_contacts, records.len()),
            sample_contacts: entries.into_iter().take(self.config.sample_size).collect(),
        }
    }
}

fn push_metric(table: &mut Table, metric: &str, value: Cell) {
    table.push_row(vec![Cell::text(metric), value]);
}

fn count_unique(values: &[String]) -> usize {
    values.iter().collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn sample_records() -> Vec<JobRecord> {
        vec![
            JobRecord::new("Mail jane@acme.com. Recruiter: Jane Doe.")
                .with_company("Acme")
                .with_job_title("Engineer")
                .with_location("Remote")
                .with_date_of_posting("2024-06-01"),
            JobRecord::new("We are hiring, no contact given").with_company("Globex"),
            JobRecord::new("Ping jane@acme.com").with_company("Acme"),
        ]
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::text("a").to_string(), "a");
        assert_eq!(Cell::number(12).to_string(), "12");
        assert_eq!(Cell::Flag(true).to_string(), "Yes");
        assert_eq!(Cell::Flag(false).to_string(), "No");
    }

    #[test]
    fn test_column_widths_include_header_and_cap() {
        let mut table = Table::new("T", &["Short", "Description"]);
        table.push_row(vec![Cell::text("ab"), Cell::text("x".repeat(120))]);

        let widths = table.column_widths(&ReportConfig::default());
        assert_eq!(widths, vec![7, 50]);
    }

    #[test]
    fn test_column_widths_custom_config() {
        let mut table = Table::new("T", &["A"]);
        table.push_row(vec![Cell::text("abcdef")]);
        let config = ReportConfig::new()
            .with_column_padding(0)
            .with_max_column_width(4);
        assert_eq!(table.column_widths(&config), vec![4]);
    }

    #[test]
    fn test_job_report_tables() {
        let report = ReportBuilder::default().build_job_report_at(&sample_records(), fixed_time());
        assert_eq!(report.table_names(), vec![JOB_DATA, CONTACT_INFO, SUMMARY]);
    }

    #[test]
    fn test_job_report_rows() {
        let report = ReportBuilder::default().build_job_report_at(&sample_records(), fixed_time());
        let jobs = report.table(JOB_DATA).unwrap();

        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs.cell(0, "S_No"), Some(&Cell::Number(1)));
        assert_eq!(jobs.cell(0, "Job_Role").unwrap().to_string(), "Engineer");
        assert_eq!(jobs.cell(0, "Timestamp").unwrap().to_string(), "2024-06-01");
        assert_eq!(jobs.cell(0, "Extracted_Emails").unwrap().to_string(), "jane@acme.com");
        assert_eq!(jobs.cell(0, "Extracted_Names").unwrap().to_string(), "Jane Doe");
        assert_eq!(jobs.cell(0, "Contact_Count"), Some(&Cell::Number(2)));
        assert_eq!(jobs.cell(0, "Has_Contact_Info"), Some(&Cell::Flag(true)));
        assert_eq!(jobs.cell(1, "Has_Contact_Info"), Some(&Cell::Flag(false)));
        assert_eq!(jobs.cell(1, "Extracted_Emails").unwrap().to_string(), "");
    }

    #[test]
    fn test_job_report_summary() {
        let report = ReportBuilder::default().build_job_report_at(&sample_records(), fixed_time());
        let summary = report.table(SUMMARY).unwrap();

        assert_eq!(summary.metric("Total Jobs"), Some(&Cell::Number(3)));
        assert_eq!(summary.metric("Jobs with Contact Info"), Some(&Cell::Number(2)));
        assert_eq!(summary.metric("Total Emails Found"), Some(&Cell::Number(2)));
        assert_eq!(summary.metric("Unique Emails Found"), Some(&Cell::Number(1)));
        assert_eq!(summary.metric("Total Names Found"), Some(&Cell::Number(1)));
        assert_eq!(summary.metric("Unique Companies"), Some(&Cell::Number(2)));
        assert_eq!(
            summary.metric("Export Date").unwrap().to_string(),
            "2024-06-15 09:30:00"
        );
    }

    #[test]
    fn test_job_report_contact_info() {
        let report = ReportBuilder::default().build_job_report_at(&sample_records(), fixed_time());
        let contacts = report.table(CONTACT_INFO).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts.cell(0, "Name").unwrap().to_string(), "Jane Doe");
        assert_eq!(contacts.cell(1, "Job_Index"), Some(&Cell::Number(3)));
        assert_eq!(contacts.cell(1, "Role").unwrap().to_string(), "Unknown");
    }

    #[test]
    fn test_job_report_empty_batch() {
        let report = ReportBuilder::default().build_job_report_at(&[], fixed_time());
        assert!(report.table(JOB_DATA).unwrap().is_empty());
        assert!(report.table(CONTACT_INFO).unwrap().is_empty());
        let summary = report.table(SUMMARY).unwrap();
        assert_eq!(summary.metric("Total Jobs"), Some(&Cell::Number(0)));
    }

    #[test]
    fn test_contact_report_keeps_columns_when_empty() {
        let records = vec![JobRecord::new("nothing to see")];
        let report = ReportBuilder::default().build_contact_report_at(&records, fixed_time());
        let contacts = report.table(CONTACTS).unwrap();

        assert!(contacts.is_empty());
        assert_eq!(contacts.columns.len(), 7);
        assert_eq!(contacts.columns[6], "Extraction_Date");
        assert_eq!(report.table_names(), vec![CONTACTS, SUMMARY]);
    }

    #[test]
    fn test_contact_report_summary() {
        let records = vec![
            JobRecord::new("Mail a@x.com or b@y.org. Recruiter: Maria Lopez."),
            JobRecord::new("Recruiter: Tom Baker."),
        ];
        let report = ReportBuilder::default().build_contact_report_at(&records, fixed_time());
        let summary = report.table(SUMMARY).unwrap();

        assert_eq!(summary.metric("Total Contacts Found"), Some(&Cell::Number(3)));
        assert_eq!(summary.metric("Contacts with Email"), Some(&Cell::Number(2)));
        assert_eq!(summary.metric("Contacts with Name Only"), Some(&Cell::Number(1)));
        assert_eq!(summary.metric("Unique Emails"), Some(&Cell::Number(2)));
        assert_eq!(summary.metric("Unique Names"), Some(&Cell::Number(2)));

        let contacts = report.table(CONTACTS).unwrap();
        assert_eq!(
            contacts.cell(0, "Extraction_Date").unwrap().to_string(),
            "2024-06-15 09:30:00"
        );
    }

    #[test]
    fn test_analyze() {
        let analysis = ReportBuilder::default().analyze_at(&sample_records(), fixed_time());
        assert_eq!(analysis.total_jobs, 3);
        assert_eq!(analysis.jobs_with_contacts, 2);
        assert_eq!(analysis.total_contacts, 2);
        assert_eq!(analysis.contacts_with_email, 2);
        assert_eq!(analysis.contacts_with_name_only, 0);
        assert_eq!(analysis.unique_emails, 1);
        assert_eq!(analysis.unique_names, 1);
        assert_eq!(analysis.contact_extraction_rate, "66.7%");
    }

    #[test]
    fn test_analyze_empty_batch() {
        let analysis = ReportBuilder::default().analyze_at(&[], fixed_time());
        assert_eq!(analysis.total_jobs, 0);
        assert_eq!(analysis.contact_extraction_rate, "0%");
        assert!(analysis.sample_contacts.is_empty());
    }

    #[test]
    fn test_analyze_sample_size() {
        let records: Vec<JobRecord> = (0..8)
            .map(|i| JobRecord::new(format!("mail user{i}@acme.com")))
            .collect();
        let analysis = ReportBuilder::new(ReportConfig::new().with_sample_size(3))
            .analyze_at(&records, fixed_time());
        assert_eq!(analysis.total_contacts, 8);
        assert_eq!(analysis.sample_contacts.len(), 3);
        assert_eq!(analysis.sample_contacts[0].email, "user0@acme.com");
        assert_eq!(analysis.contact_extraction_rate, "100.0%");
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = ReportBuilder::default().analyze_at(&sample_records(), fixed_time());
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["total_jobs"], 3);
        assert_eq!(json["contact_extraction_rate"], "66.7%");
    }
}
