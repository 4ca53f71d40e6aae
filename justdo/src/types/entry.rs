//! Diary entry types: things done or learned on a given day

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// What kind of diary entry this is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Done,
    Learned,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::Learned => write!(f, "learned"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "done" => Ok(Self::Done),
            "learned" => Ok(Self::Learned),
            other => Err(format!("unknown entry kind: {other} (expected done or learned)")),
        }
    }
}

/// A diary entry recorded against a calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoneEntry {
    pub id: i64,
    pub entry_date: NaiveDate,
    #[serde(rename = "entry_type")]
    pub kind: EntryKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl DoneEntry {
    /// Build an entry with server-style defaults. Mostly useful in tests.
    pub fn new(id: i64, entry_date: NaiveDate, kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            id,
            entry_date,
            kind,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Set the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Canonical listing order: newest day first, then newest entry
    /// first within a day, matching the server's listing.
    pub fn canonical_cmp(&self, other: &DoneEntry) -> Ordering {
        other
            .entry_date
            .cmp(&self.entry_date)
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }
}
