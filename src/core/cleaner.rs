//! Field validation and normalization.
//!
//! [`clean`] turns a [`RawCandidate`] into a [`JobRecord`]:
//!
//! 1. email is validated and normalized, or dropped
//! 2. phone is parsed without a default region and kept only if valid
//! 3. every field is trimmed, and empty optional fields become `None`
//!
//! Normalization runs before trimming. Invalid values never produce an
//! error; the field is simply absent in the result.

use email_address::{EmailAddress, Options};
use phonenumber::Mode;

use crate::record::{JobRecord, RawCandidate};

/// Outcome of parsing a phone number with no assumed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneOutcome {
    /// Parsed and valid; holds the international format.
    Valid(String),
    /// Parsed, but not a valid number for its region; holds the international format.
    InvalidNumber(String),
    /// Could not be parsed at all (no country code, stray characters, ...).
    InvalidFormat,
}

impl PhoneOutcome {
    /// Returns the formatted number only if it is valid.
    pub fn valid(self) -> Option<String> {
        match self {
            PhoneOutcome::Valid(formatted) => Some(formatted),
            PhoneOutcome::InvalidNumber(_) | PhoneOutcome::InvalidFormat => None,
        }
    }
}

/// Parses `raw` as an international phone number.
pub fn classify_phone(raw: &str) -> PhoneOutcome {
    let Ok(number) = phonenumber::parse(None, raw) else {
        return PhoneOutcome::InvalidFormat;
    };

    let formatted = number.format().mode(Mode::International).to_string();
    if phonenumber::is_valid(&number) {
        PhoneOutcome::Valid(formatted)
    } else {
        PhoneOutcome::InvalidNumber(formatted)
    }
}

/// Validates an email address and returns its normalized form.
///
/// Display text (`Jane <jane@acme.com>`) and domain literals are rejected.
/// The domain must contain a dot and end in an alphabetic label of at least
/// two characters. The domain is lower-cased; the local part is kept as is.
///
/// # Example
///
/// ```
/// use jobpack::core::cleaner::normalize_email;
///
/// assert_eq!(normalize_email("Jane.Doe@ACME.com").as_deref(), Some("Jane.Doe@acme.com"));
/// assert_eq!(normalize_email("not an email"), None);
/// ```
pub fn normalize_email(raw: &str) -> Option<String> {
    let options = Options::default()
        .with_required_tld()
        .without_domain_literal()
        .without_display_text();
    let address = EmailAddress::parse_with_options(raw, options).ok()?;

    let domain = address.domain().to_ascii_lowercase();
    if !has_alpha_tld(&domain) {
        return None;
    }

    Some(format!("{}@{}", address.local_part(), domain))
}

fn has_alpha_tld(domain: &str) -> bool {
    match domain.rsplit_once('.') {
        Some((head, tld)) => {
            !head.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Validates and trims a candidate.
pub fn clean(candidate: RawCandidate) -> JobRecord {
    let RawCandidate {
        name,
        email,
        phone,
        job_title,
        company,
        location,
        date_of_posting,
        job_description,
        link,
        notes,
    } = candidate;

    let email = email.as_deref().and_then(normalize_email);
    let phone = phone.as_deref().and_then(|raw| classify_phone(raw).valid());

    JobRecord {
        name: trimmed(name),
        email: trimmed(email),
        phone: trimmed(phone),
        job_title: trimmed(job_title),
        company: trimmed(company),
        location: trimmed(location),
        date_of_posting: trimmed(date_of_posting),
        job_description: job_description.trim().to_string(),
        link: trimmed(link),
        notes: trimmed(notes),
    }
}

impl From<RawCandidate> for JobRecord {
    fn from(candidate: RawCandidate) -> Self {
        clean(candidate)
    }
}

impl From<JobRecord> for RawCandidate {
    fn from(record: JobRecord) -> Self {
        RawCandidate {
            name: record.name,
            email: record.email,
            phone: record.phone,
            job_title: record.job_title,
            company: record.company,
            location: record.location,
            date_of_posting: record.date_of_posting,
            job_description: record.job_description,
            link: record.link,
            notes: record.notes,
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
