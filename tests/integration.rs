//! Integration tests: HTML export in, records, contacts and reports out.

use std::io::Write;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use jobpack::core::report::{CONTACT_INFO, CONTACTS, JOB_DATA, SUMMARY};
use jobpack::core::{Cell, process_message};
use jobpack::prelude::*;
use tempfile::NamedTempFile;

const EXPORT: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Exported Data</title></head>
<body>
<div class="page_body chat_page"><div class="history">
  <div class="message service" id="message-1">
    <div class="body details">1 May 2024</div>
  </div>
  <div class="message default clearfix" id="message101">
    <div class="body">
      <div class="text">
        Job Title: Backend Engineer<br>Company: Acme Corp<br>Location: Remote<br>Email: jane.doe@acme.com<br>Contact: Jane Doe - HR<br>Posted 2024-05-01<br>Apply: https://acme.example.com/jobs/42
      </div>
    </div>
  </div>
  <div class="message default clearfix" id="message102">
    <div class="body">
      <div class="text">Company: Globex<br>Location: Berlin, DE<br>Call +44 20 7946 0958<br>Recruiter: Tom Baker.</div>
    </div>
  </div>
  <div class="message default clearfix joined" id="message103">
    <div class="body"><div class="text">Looking for a designer, DM me</div></div>
  </div>
  <div class="message service" id="message-2"><div class="body details"> </div></div>
</div></div>
</body>
</html>"#;

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn uploaded_service() -> JobService {
    let service = JobService::new(Arc::new(BatchStore::new()));
    service.upload("messages.html", EXPORT).unwrap();
    service
}

fn uploaded_records() -> Vec<JobRecord> {
    uploaded_service().store().latest().unwrap().to_vec()
}

// ============================================================================
// Upload and pipeline
// ============================================================================

#[test]
fn test_upload_splits_and_skips_empty_messages() {
    let service = JobService::new(Arc::new(BatchStore::new()));
    let stats = service.upload("messages.html", EXPORT).unwrap();

    // The date separator is a message too; the blank service message is dropped.
    assert_eq!(stats.input_count, 4);
    assert_eq!(stats.output_count, 4);
    assert_eq!(stats.skipped, 0);
}

#[test]
fn test_upload_extracts_fields() {
    let records = uploaded_records();
    let acme = &records[1];

    assert_eq!(acme.job_title(), Some("Backend Engineer"));
    assert_eq!(acme.company(), Some("Acme Corp"));
    assert_eq!(acme.location(), Some("Remote"));
    assert_eq!(acme.email(), Some("jane.doe@acme.com"));
    assert_eq!(acme.date_of_posting.as_deref(), Some("2024-05-01"));
    assert_eq!(acme.link.as_deref(), Some("https://acme.example.com/jobs/42"));
    // The date is the only long digit run, and it is not a phone number.
    assert_eq!(acme.phone(), None);
    assert!(acme.description().starts_with("Job Title: Backend Engineer\nCompany"));
}

#[test]
fn test_upload_normalizes_phone() {
    let records = uploaded_records();
    let globex = &records[2];

    assert_eq!(globex.company(), Some("Globex"));
    assert_eq!(globex.location(), Some("Berlin, DE"));
    assert_eq!(globex.phone(), Some("+44 20 7946 0958"));
    assert_eq!(globex.email(), None);
}

#[test]
fn test_upload_rejects_non_html_without_side_effects() {
    let service = uploaded_service();

    let err = service.upload("messages.txt", EXPORT).unwrap_err();
    assert!(err.is_invalid_upload());
    assert_eq!(service.store().len(), 4);
}

#[test]
fn test_second_upload_replaces_batch() {
    let service = uploaded_service();
    service
        .upload("other.HTML", r#"<div class="message">Company: Initech</div>"#)
        .unwrap();

    let batch = service.store().latest().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].company(), Some("Initech"));
}

#[test]
fn test_upload_reads_inline_markup_as_one_line() {
    let service = JobService::new(Arc::new(BatchStore::new()));
    service
        .upload(
            "messages.html",
            r#"<div class="message default"><div class="text">Job Title: <strong>Senior</strong> Rust Engineer<br>Location: Berlin, <a href="https://maps.example.com">Germany</a><br>Company: Acme <b>Corp</b></div></div>"#,
        )
        .unwrap();

    let batch = service.store().latest().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].job_title(), Some("Senior Rust Engineer"));
    assert_eq!(batch[0].location(), Some("Berlin, Germany"));
    assert_eq!(batch[0].company(), Some("Acme Corp"));
}

#[test]
fn test_parse_file_then_run() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();
    file.flush().unwrap();

    let messages = HtmlExportParser::new().parse(file.path()).unwrap();
    let records = Pipeline::default().run(&messages);
    assert_eq!(records.len(), messages.len());
}

#[test]
fn test_acme_example() {
    let record = process_message(
        "Company: Acme Corp\nLocation: Remote\nEmail: jane.doe@acme.com\nContact: Jane Doe - HR",
    );

    assert_eq!(record.company(), Some("Acme Corp"));
    assert_eq!(record.location(), Some("Remote"));
    assert_eq!(record.email(), Some("jane.doe@acme.com"));
    assert_eq!(
        record.description(),
        "Company: Acme Corp\nLocation: Remote\nEmail: jane.doe@acme.com\nContact: Jane Doe - HR"
    );

    let contacts = aggregate(&[record]);
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].email, "jane.doe@acme.com");
    assert_eq!(contacts[0].name, "Jane Doe");
}

#[test]
fn test_phone_with_letters_is_absent() {
    let mut candidate = extract("Call +1 555 abc 1234");
    candidate.phone = Some("+1 555 abc 1234".to_string());
    assert_eq!(clean(candidate).phone, None);
}

// ============================================================================
// Contacts and reports
// ============================================================================

#[test]
fn test_contacts_across_batch() {
    let contacts = aggregate(&uploaded_records());

    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].job_index, 2);
    assert_eq!(contacts[0].email, "jane.doe@acme.com");
    assert_eq!(contacts[0].name, "Jane Doe");
    assert_eq!(contacts[0].role, "Backend Engineer");

    assert_eq!(contacts[1].job_index, 3);
    assert_eq!(contacts[1].email, "");
    assert_eq!(contacts[1].name, "Tom Baker");
    assert_eq!(contacts[1].company, "Globex");
    assert_eq!(contacts[1].role, "Unknown");
}

#[test]
fn test_job_report() {
    let report = ReportBuilder::default().build_job_report_at(&uploaded_records(), fixed_time());
    assert_eq!(report.table_names(), vec![JOB_DATA, CONTACT_INFO, SUMMARY]);

    let jobs = report.table(JOB_DATA).unwrap();
    assert_eq!(jobs.len(), 4);
    assert_eq!(jobs.cell(1, "Company").unwrap().to_string(), "Acme Corp");
    assert_eq!(jobs.cell(1, "Timestamp").unwrap().to_string(), "2024-05-01");
    assert_eq!(jobs.cell(3, "Has_Contact_Info").unwrap().to_string(), "No");

    let summary = report.table(SUMMARY).unwrap();
    assert_eq!(summary.metric("Total Jobs"), Some(&Cell::Number(4)));
    assert_eq!(summary.metric("Jobs with Contact Info"), Some(&Cell::Number(2)));
    assert_eq!(summary.metric("Unique Emails Found"), Some(&Cell::Number(1)));
    assert_eq!(summary.metric("Unique Names Found"), Some(&Cell::Number(2)));
    assert_eq!(summary.metric("Unique Companies"), Some(&Cell::Number(2)));
    assert_eq!(
        summary.metric("Export Date").unwrap().to_string(),
        "2024-05-02 08:00:00"
    );
}

#[test]
fn test_contact_report() {
    let report =
        ReportBuilder::default().build_contact_report_at(&uploaded_records(), fixed_time());
    assert_eq!(report.table_names(), vec![CONTACTS, SUMMARY]);

    let summary = report.table(SUMMARY).unwrap();
    assert_eq!(summary.metric("Total Contacts Found"), Some(&Cell::Number(2)));
    assert_eq!(summary.metric("Contacts with Email"), Some(&Cell::Number(1)));
    assert_eq!(summary.metric("Contacts with Name Only"), Some(&Cell::Number(1)));
}

#[test]
fn test_analysis() {
    let analysis = uploaded_service().analyze().unwrap();

    assert_eq!(analysis.total_jobs, 4);
    assert_eq!(analysis.jobs_with_contacts, 2);
    assert_eq!(analysis.total_contacts, 2);
    assert_eq!(analysis.contacts_with_email, 1);
    assert_eq!(analysis.contacts_with_name_only, 1);
    assert_eq!(analysis.unique_emails, 1);
    assert_eq!(analysis.unique_names, 2);
    assert_eq!(analysis.contact_extraction_rate, "50.0%");
    assert_eq!(analysis.sample_contacts.len(), 2);
}

#[test]
fn test_csv_of_empty_batch_is_not_found() {
    let service = JobService::new(Arc::new(BatchStore::new()));
    let err = service.csv().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "No data available for download");
}

#[test]
fn test_upload_without_messages_leaves_nothing_to_export() {
    let service = JobService::new(Arc::new(BatchStore::new()));
    let stats = service
        .upload("empty.html", "<html><body></body></html>")
        .unwrap();

    assert_eq!(stats.input_count, 0);
    assert!(service.analyze().unwrap_err().is_not_found());
}
