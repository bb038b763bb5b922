//! Contact discovery across job records.
//!
//! The primary extractor keeps only the first strict email of a message.
//! This module runs a looser set of patterns over each record's free text
//! to recover every email (including `name(at)domain.tld` obfuscation) and
//! recruiter-style names, then turns them into [`ContactEntry`] rows.
//!
//! # Entry generation
//!
//! For each record, in order:
//!
//! - emails found: one entry per email, each carrying the record's *first*
//!   discovered name (or an empty name)
//! - no emails but names found: one entry per name with an empty email
//! - neither: no entries
//!
//! # Example
//!
//! ```
//! use jobpack::core::contacts::{aggregate, extract_emails, extract_names};
//! use jobpack::JobRecord;
//!
//! assert_eq!(extract_emails("mail hr(at)acme.io"), vec!["hr@acme.io"]);
//! assert_eq!(extract_names("Contact: Jane Doe - HR"), vec!["Jane Doe"]);
//!
//! let records = vec![JobRecord::new("Write to jane@acme.com, contact Jane Doe.")];
//! let contacts = aggregate(&records);
//! assert_eq!(contacts.len(), 1);
//! assert_eq!(contacts[0].name, "Jane Doe");
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::JobRecord;

/// Source label attached to every discovered contact.
pub const SOURCE_LABEL: &str = "Extracted from job posting";

/// Placeholder for a missing company or role.
pub const UNKNOWN: &str = "Unknown";

// ============================================================================
// Patterns
// ============================================================================

/// A domain label after its dot. A dot with whitespace on either side
/// (`acme . com`, `acme .com`, `acme. com`) only counts when a lower-case
/// label follows, so a sentence-ending period before a capitalized word is
/// not read as part of the address.
const LABEL: &str = r"(?:\.[A-Za-z0-9-]+|\s*\.\s*(?-i:[a-z0-9-]+))";

/// The top-level domain, with the same rule for a padded dot.
const TLD: &str = r"(?:\.[A-Za-z]{2,}|\s*\.\s*(?-i:[a-z]{2,}))\b";

static EMAIL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // jane.doe@acme.com
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b".to_string(),
        // jane.doe @ acme . com
        format!(r"\b[A-Za-z0-9._%+-]+\s*@\s*[A-Za-z0-9-]+(?:{LABEL})*{TLD}"),
        // jane.doe(at)acme.com
        r"(?i)\b[A-Za-z0-9._%+-]+\(at\)[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b".to_string(),
        // jane.doe (at) acme . com
        format!(r"(?i)\b[A-Za-z0-9._%+-]+\s*\(at\)\s*[A-Za-z0-9-]+(?:{LABEL})*{TLD}"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("email pattern should compile"))
    .collect()
});

/// Two to N capitalized words on one line. Longer runs are filtered later.
const NAME: &str = r"[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)+";

static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(
            r"(?i:\b(?:contact|reach out|email|send cv|apply to|hr|recruiter|hiring manager))[\s:]*({NAME})"
        ),
        format!(r"(?i:\b(?:contact person|contact|coordinator|manager))[\s:]*({NAME})"),
        format!(r"({NAME})\s*-\s*(?i:hr|recruiter|hiring|manager|coordinator)\b"),
        format!(r"(?i:\b(?:for more details|contact|reach))\s+({NAME})"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("name pattern should compile"))
    .collect()
});

const NAME_STOPWORDS: [&str; 3] = ["job", "work", "position"];

const MAX_NAME_WORDS: usize = 4;

// ============================================================================
// Extraction
// ============================================================================

/// Finds every email-like string in `text`.
///
/// Results are lower-cased, stripped of whitespace, de-obfuscated
/// (`(at)` becomes `@`) and deduplicated, in order of first discovery.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut emails: Vec<String> = Vec::new();

    for pattern in EMAIL_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let email = normalize_found_email(m.as_str());
            // "jane@acme.com. please apply": the compact address is already
            // known, the padded tail is sentence text.
            let padded = m.as_str().contains(char::is_whitespace);
            if padded && emails.iter().any(|known| extends_address(&email, known)) {
                continue;
            }
            if email.contains('@') && email.contains('.') && seen.insert(email.clone()) {
                emails.push(email);
            }
        }
    }

    emails
}

fn extends_address(candidate: &str, known: &str) -> bool {
    candidate
        .strip_prefix(known)
        .is_some_and(|rest| rest.starts_with('.'))
}

fn normalize_found_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .replace("(at)", "@")
}

/// Finds likely contact names in `text`, deduplicated in order of discovery.
pub fn extract_names(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for pattern in NAME_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(name) = caps.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if is_plausible_name(name) && seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }

    names
}

fn is_plausible_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    name.chars().count() > 2
        && name.split_whitespace().count() <= MAX_NAME_WORDS
        && !NAME_STOPWORDS.iter().any(|word| lower.contains(word))
}

// ============================================================================
// Aggregation
// ============================================================================

/// One discovered email or name, attributed to a source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    /// 1-based position of the source record.
    pub job_index: usize,
    pub company: String,
    pub role: String,
    /// Empty for name-only entries.
    pub email: String,
    /// Empty when the record had emails but no names.
    pub name: String,
    pub source: String,
    pub extracted_at: NaiveDateTime,
}

impl ContactEntry {
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns `true` for entries with a name and no email.
    pub fn is_name_only(&self) -> bool {
        self.has_name() && !self.has_email()
    }
}

/// Text searched for contacts: description, company and role.
pub fn search_text(record: &JobRecord) -> String {
    format!(
        "{} {} {}",
        record.description(),
        record.company().unwrap_or(""),
        record.job_title().unwrap_or("")
    )
}

/// Builds contact entries for all records, stamped with the current local time.
pub fn aggregate(records: &[JobRecord]) -> Vec<ContactEntry> {
    aggregate_at(records, Local::now().naive_local())
}

/// Builds contact entries for all records with a fixed extraction timestamp.
pub fn aggregate_at(records: &[JobRecord], extracted_at: NaiveDateTime) -> Vec<ContactEntry> {
    let mut entries = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let text = search_text(record);
        let emails = extract_emails(&text);
        let names = extract_names(&text);

        let entry = |email: String, name: String| ContactEntry {
            job_index: idx + 1,
            company: record.company().unwrap_or(UNKNOWN).to_string(),
            role: record.job_title().unwrap_or(UNKNOWN).to_string(),
            email,
            name,
            source: SOURCE_LABEL.to_string(),
            extracted_at,
        };

        if emails.is_empty() {
            entries.extend(names.into_iter().map(|name| entry(String::new(), name)));
        } else {
            // Every email gets the first name, even when several were found.
            let first_name = names.into_iter().next().unwrap_or_default();
            entries.extend(
                emails
                    .into_iter()
                    .map(|email| entry(email, first_name.clone())),
            );
        }
    }

    debug!(
        records = records.len(),
        contacts = entries.len(),
        "aggregated contacts"
    );
    entries
}
