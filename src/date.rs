use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::types::RenameError;

/// The canonical 19-character form every candidate is compared and parsed in.
/// Zero-padded and significance-ordered, so lexical order equals
/// chronological order.
pub const CANONICAL_FORMAT: &str = "%Y.%m.%d %H.%M.%S";

const CANONICAL_LEN: usize = 19;

/// Cameras with an unset clock write dates containing this.
const SENTINEL: &str = "0000";

/// A date parsed once from the selected canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate(NaiveDateTime);

impl ResolvedDate {
    pub fn parse(s: &str) -> Result<Self, RenameError> {
        if s.len() != CANONICAL_LEN {
            return Err(RenameError::InvalidDateLength(s.to_string()));
        }
        NaiveDateTime::parse_from_str(s, CANONICAL_FORMAT)
            .map(Self)
            .map_err(|_| RenameError::InvalidDate(s.to_string()))
    }

    pub fn year(&self) -> String {
        format!("{:04}", self.0.year())
    }

    pub fn short_year(&self) -> String {
        format!("{:02}", self.0.year() % 100)
    }

    pub fn month(&self) -> String {
        format!("{:02}", self.0.month())
    }

    pub fn day(&self) -> String {
        format!("{:02}", self.0.day())
    }

    pub fn hour(&self) -> String {
        format!("{:02}", self.0.hour())
    }

    pub fn minute(&self) -> String {
        format!("{:02}", self.0.minute())
    }

    pub fn second(&self) -> String {
        format!("{:02}", self.0.second())
    }
}

/// Picks the earliest usable candidate. Candidates containing the unset-clock
/// sentinel or nothing but whitespace are dropped first; running out of
/// candidates is fatal for the whole run.
pub fn resolve(mut candidates: Vec<String>) -> Result<ResolvedDate, RenameError> {
    candidates.retain(|date| !date.contains(SENTINEL) && !date.trim().is_empty());
    candidates.sort();
    let earliest = candidates.into_iter().next().ok_or(RenameError::NoDates)?;
    ResolvedDate::parse(&earliest)
}
