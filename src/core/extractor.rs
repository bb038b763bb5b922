//! Heuristic field extraction from one message.
//!
//! Extraction is driven by [`RULES`], an ordered table of
//! `(field, pattern, kind)` entries. Each rule is applied independently to
//! the whole message and only its leftmost match is kept, so rules never
//! interact and can be added or reordered without touching [`extract`].
//!
//! # Example
//!
//! ```
//! use jobpack::core::extractor::extract;
//!
//! let candidate = extract("Company: Acme Corp\nLocation: Remote\nEmail: jane.doe@acme.com");
//! assert_eq!(candidate.company.as_deref(), Some("Acme Corp"));
//! assert_eq!(candidate.location.as_deref(), Some("Remote"));
//! assert_eq!(candidate.email.as_deref(), Some("jane.doe@acme.com"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::cleaner::{PhoneOutcome, classify_phone};
use crate::record::{Field, RawCandidate};

/// How a rule's match becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// The whole match is the value.
    Whole,
    /// Capture group 1 is the value, trimmed. Empty captures are dropped.
    Label,
    /// The whole match, reformatted as an international number when it
    /// parses. Unparseable matches are kept verbatim for the cleaner.
    Phone,
}

/// One extraction rule.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub kind: RuleKind,
    pub pattern: Regex,
}

impl FieldRule {
    fn new(field: Field, kind: RuleKind, pattern: &str) -> Self {
        Self {
            field,
            kind,
            pattern: Regex::new(pattern).expect("extraction rule should compile"),
        }
    }

    /// Applies this rule to `text`, returning the field value if it matched.
    pub fn apply(&self, text: &str) -> Option<String> {
        match self.kind {
            RuleKind::Whole => self.pattern.find(text).map(|m| m.as_str().to_string()),
            RuleKind::Label => self
                .pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            RuleKind::Phone => self.pattern.find(text).map(|m| {
                let raw = m.as_str();
                match classify_phone(raw) {
                    PhoneOutcome::Valid(formatted) | PhoneOutcome::InvalidNumber(formatted) => {
                        formatted
                    }
                    PhoneOutcome::InvalidFormat => raw.to_string(),
                }
            }),
        }
    }
}

/// Extraction rules, in application order.
///
/// `job_description` is not listed: it is always the full input.
/// `name` and `notes` have no rule.
pub static RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::new(
            Field::Email,
            RuleKind::Whole,
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        ),
        FieldRule::new(Field::Phone, RuleKind::Phone, r"\+?\d[\d\s\-()]{8,}\d"),
        FieldRule::new(Field::Link, RuleKind::Whole, r"https?://\S+"),
        FieldRule::new(
            Field::JobTitle,
            RuleKind::Label,
            r"(?i)job\s*title\s*[:\-]?\s*([^\n\r]+)",
        ),
        FieldRule::new(
            Field::Company,
            RuleKind::Label,
            r"(?i)company\s*[:\-]?\s*([^\n\r]+)",
        ),
        FieldRule::new(
            Field::Location,
            RuleKind::Label,
            r"(?i)location\s*[:\-]?\s*([^\n\r]+)",
        ),
        FieldRule::new(Field::DateOfPosting, RuleKind::Whole, r"\b\d{4}-\d{2}-\d{2}\b"),
    ]
});

/// Extracts candidate fields from one message's plain text.
///
/// Never fails: a rule that does not match leaves its field `None`.
pub fn extract(text: &str) -> RawCandidate {
    let mut candidate = RawCandidate::new(text);

    for rule in RULES.iter() {
        if let Some(value) = rule.apply(text) {
            candidate.set(rule.field, Some(value));
        }
    }

    candidate
}
