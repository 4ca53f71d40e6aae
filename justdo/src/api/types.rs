//! Request and response types for the JustDo API.

use crate::types::{EntryKind, TokenPair, User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/register/`. `password2` always mirrors
/// `password`; mismatched confirmation is not supported at this layer.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl RegisterRequest {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password2: password.to_string(),
        }
    }
}

/// Response from `POST /auth/register/`.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub tokens: TokenPair,
}

/// Body for `POST /auth/login/`. The response is a bare [`TokenPair`].
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Optional fields accepted by task creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub tag: Option<String>,
    pub scheduled_for: Option<NaiveDate>,
}

impl NewTask {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_scheduled_for(mut self, date: NaiveDate) -> Self {
        self.scheduled_for = Some(date);
        self
    }
}

/// Body for `POST /tasks/`. Optional fields are omitted entirely
/// rather than sent as null.
#[derive(Debug, Serialize)]
pub struct CreateTaskRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<NaiveDate>,
}

/// Body for `PATCH /tasks/{id}/`. An absent field leaves the server
/// value untouched; `Some(None)` on a nullable field clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// `None` clears the tag.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = Some(tag);
        self
    }

    /// `None` moves the task back to the general lane.
    pub fn with_scheduled_for(mut self, scheduled_for: Option<NaiveDate>) -> Self {
        self.scheduled_for = Some(scheduled_for);
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.done.is_none()
            && self.tag.is_none()
            && self.scheduled_for.is_none()
    }
}

/// Body for `POST /tasks/reorder/`: the full collection's ids in their
/// new global order.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub task_ids: Vec<i64>,
}

/// Body for `POST /tasks/done-entries/`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewDoneEntry {
    pub entry_date: NaiveDate,
    #[serde(rename = "entry_type")]
    pub kind: EntryKind,
    pub text: String,
}
