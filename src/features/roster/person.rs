//! Person entity and birth date validation

use crate::core::errors::RosterError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical birth date format
pub const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

/// A tracked person on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique ID assigned by the store, never reused
    pub id: u64,
    /// Display name, non-empty
    pub name: String,
    /// Birth date in `DD.MM.YYYY`; only day and month drive recurrence,
    /// the year is used for age computation
    pub birth_date: String,
    /// Optional mention handle, stored without the leading `@`
    #[serde(default)]
    pub handle: Option<String>,
}

impl Person {
    /// Parsed birth date, `None` when the stored string is not a valid
    /// `DD.MM.YYYY` date (possible for records edited on disk).
    pub fn parsed_birth_date(&self) -> Option<NaiveDate> {
        parse_birth_date(&self.birth_date).ok()
    }

    /// How this person is mentioned in chat: `@handle` when a handle is
    /// set, the display name otherwise.
    pub fn mention(&self) -> String {
        match &self.handle {
            Some(handle) => format!("@{handle}"),
            None => self.name.clone(),
        }
    }
}

/// Candidate person for an add operation, before validation and ID
/// assignment.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub birth_date: String,
    pub handle: Option<String>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, birth_date: impl Into<String>) -> Self {
        NewPerson {
            name: name.into(),
            birth_date: birth_date.into(),
            handle: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }
}

/// Strictly parse a `DD.MM.YYYY` birth date.
///
/// chrono alone would accept unpadded forms like `1.6.1990`, so the shape
/// is checked first; the chrono parse then rejects impossible dates such
/// as `31.02.2000`.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, RosterError> {
    let parts: Vec<&str> = input.split('.').collect();
    let shape_ok = parts.len() == 3
        && parts[0].len() == 2
        && parts[1].len() == 2
        && parts[2].len() == 4
        && parts
            .iter()
            .all(|p| p.bytes().all(|b| b.is_ascii_digit()));
    if !shape_ok {
        return Err(RosterError::validation(format!(
            "birth date '{input}' must use the DD.MM.YYYY format"
        )));
    }

    NaiveDate::parse_from_str(input, BIRTH_DATE_FORMAT).map_err(|_| {
        RosterError::validation(format!("'{input}' is not a real calendar date"))
    })
}

/// Normalize a raw handle: trim whitespace and a leading `@`.
/// Returns `None` for blank input.
pub fn normalize_handle(raw: &str) -> Option<String> {
    let handle = raw.trim().trim_start_matches('@').trim();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}
