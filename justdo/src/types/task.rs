//! Task type as served by the JustDo API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// A single task. Server-assigned fields (`id`, `order`, `created_at`)
/// are never invented locally; every task in a store came out of a
/// response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub done: bool,

    /// Optional lowercase label. Absent and empty are the same thing;
    /// the canonical form is `None`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tag: Option<String>,

    /// Day this task is scheduled on. `None` means the general lane.
    #[serde(default)]
    pub scheduled_for: Option<NaiveDate>,

    /// Server-side rank within the full collection. Lower sorts first.
    #[serde(default)]
    pub order: i64,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task with server-style defaults. Mostly useful in tests;
    /// production tasks arrive fully formed from the API.
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
            tag: None,
            scheduled_for: None,
            order: 0,
            created_at: Utc::now(),
        }
    }

    /// Set the completion flag
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Schedule on a specific day
    pub fn with_scheduled_for(mut self, date: NaiveDate) -> Self {
        self.scheduled_for = Some(date);
        self
    }

    /// Set the rank
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Set the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Canonical collection order: ascending rank, then newest first,
    /// then highest id first. This is the exact order the server lists
    /// tasks in, so inserting a fresh task at its canonical position
    /// reproduces what a refetch would return.
    pub fn canonical_cmp(&self, other: &Task) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Deserialize an optional string, folding empty into `None`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
