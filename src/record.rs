//! Job posting records.
//!
//! Two shapes flow through the pipeline:
//!
//! - [`RawCandidate`] - what the extractor pulled out of one message, unvalidated
//! - [`JobRecord`] - the cleaned candidate: email/phone normalized or dropped,
//!   every field trimmed
//!
//! Both carry the same ten fields, enumerated by [`Field`].
//!
//! # Examples
//!
//! ```
//! use jobpack::JobRecord;
//!
//! let record = JobRecord::new("Company: Acme Corp")
//!     .with_company("Acme Corp")
//!     .with_email("jane@acme.com");
//!
//! assert_eq!(record.company(), Some("Acme Corp"));
//! assert!(record.has_contact());
//! ```

use serde::{Deserialize, Serialize};

/// Names a field of a job record.
///
/// The order of [`Field::ALL`] is the column order used for CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    JobTitle,
    Company,
    Location,
    DateOfPosting,
    JobDescription,
    Link,
    Notes,
}

impl Field {
    /// All fields, in export column order.
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::JobTitle,
        Field::Company,
        Field::Location,
        Field::DateOfPosting,
        Field::JobDescription,
        Field::Link,
        Field::Notes,
    ];

    /// Returns the snake_case field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::JobTitle => "job_title",
            Field::Company => "company",
            Field::Location => "location",
            Field::DateOfPosting => "date_of_posting",
            Field::JobDescription => "job_description",
            Field::Link => "link",
            Field::Notes => "notes",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated fields extracted from one message.
///
/// `job_description` always holds the full source text. Every other field
/// is `None` when its rule did not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub date_of_posting: Option<String>,
    pub job_description: String,
    pub link: Option<String>,
    pub notes: Option<String>,
}

impl RawCandidate {
    /// Creates a candidate for `text` with no extracted fields.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            job_description: text.into(),
            ..Self::default()
        }
    }

    /// Returns the value of an optional field.
    ///
    /// [`Field::JobDescription`] is always `Some`.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::JobDescription => Some(&self.job_description),
            _ => self.slot(field).and_then(|v| v.as_deref()),
        }
    }

    /// Sets a field. Setting [`Field::JobDescription`] to `None` clears it
    /// to an empty string.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        match field {
            Field::JobDescription => self.job_description = value.unwrap_or_default(),
            _ => {
                if let Some(slot) = self.slot_mut(field) {
                    *slot = value;
                }
            }
        }
    }

    fn slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::JobTitle => Some(&self.job_title),
            Field::Company => Some(&self.company),
            Field::Location => Some(&self.location),
            Field::DateOfPosting => Some(&self.date_of_posting),
            Field::Link => Some(&self.link),
            Field::Notes => Some(&self.notes),
            Field::JobDescription => None,
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::JobTitle => Some(&mut self.job_title),
            Field::Company => Some(&mut self.company),
            Field::Location => Some(&mut self.location),
            Field::DateOfPosting => Some(&mut self.date_of_posting),
            Field::Link => Some(&mut self.link),
            Field::Notes => Some(&mut self.notes),
            Field::JobDescription => None,
        }
    }
}

/// A cleaned job posting.
///
/// Produced by [`clean`](crate::core::cleaner::clean). Guarantees:
///
/// - a present `email` passed mailbox validation and is normalized
/// - a present `phone` is a valid number in international format
/// - no field carries leading or trailing whitespace
/// - optional fields are never `Some("")`
///
/// # Serialization
///
/// Field names serialize as-is (`job_title`, `date_of_posting`, ...), which
/// are also the CSV column names.
///
/// ```
/// use jobpack::JobRecord;
///
/// let record = JobRecord::new("Hiring now").with_location("Remote");
/// let json = serde_json::to_string(&record)?;
/// assert!(json.contains(r#""location":"Remote""#));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Contact name. The extractor never fills this in.
    #[serde(default)]
    pub name: Option<String>,

    /// Normalized contact email.
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone in international format, e.g. `+1 650-253-0000`.
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub job_title: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    /// First `YYYY-MM-DD` date found in the message.
    #[serde(default)]
    pub date_of_posting: Option<String>,

    /// The full (trimmed) message text.
    #[serde(default)]
    pub job_description: String,

    /// First http(s) link found in the message.
    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl JobRecord {
    /// Creates a record holding only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            job_description: description.into(),
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_date_of_posting(mut self, date: impl Into<String>) -> Self {
        self.date_of_posting = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.job_description
    }

    /// Returns the value of `field` as text, `""` when absent.
    pub fn value(&self, field: Field) -> &str {
        let value = match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::JobTitle => &self.job_title,
            Field::Company => &self.company,
            Field::Location => &self.location,
            Field::DateOfPosting => &self.date_of_posting,
            Field::Link => &self.link,
            Field::Notes => &self.notes,
            Field::JobDescription => return &self.job_description,
        };
        value.as_deref().unwrap_or("")
    }

    /// Returns `true` if the primary extractor found an email or phone.
    pub fn has_contact(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}
