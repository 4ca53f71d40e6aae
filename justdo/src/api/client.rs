//! HTTP client for the JustDo API.

use reqwest::Client;
use tracing::debug;

use super::types::{
    CreateTaskRequest, LoginRequest, NewDoneEntry, NewTask, RegisterRequest, RegisterResponse,
    ReorderRequest, TaskPatch,
};
use crate::credentials::CredentialStore;
use crate::error::{ApiError, Result};
use crate::types::{DoneEntry, Task, TokenPair, User};

/// Default API base URL -- the single source of truth.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Get the API base URL from environment or default.
pub fn get_api_url() -> String {
    std::env::var("JUSTDO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Extract a human-readable message from a JSON error body.
///
/// Tries `detail`, then `error`, then the first per-field validation
/// message, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = json.get("detail").and_then(|v| v.as_str()) {
            return detail.to_string();
        }
        if let Some(error) = json.get("error").and_then(|v| v.as_str()) {
            return error.to_string();
        }
        // Validation failures arrive keyed by field name, each with a
        // list of messages.
        if let Some(fields) = json.as_object() {
            for messages in fields.values() {
                if let Some(first) = messages
                    .as_array()
                    .and_then(|m| m.first())
                    .and_then(|m| m.as_str())
                {
                    return first.to_string();
                }
            }
        }
    }
    body.to_string()
}

/// Client for the JustDo REST API.
///
/// Stateless request/response mapping only: no retries, no status-code
/// interpretation beyond surfacing, and the stored access token is
/// attached to every request when one exists. Clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: CredentialStore,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Client against the configured base URL with the standard
    /// credential location.
    pub fn new() -> Self {
        Self::with_base_url(get_api_url(), CredentialStore::from_env())
    }

    /// Client against an explicit base URL. Tests point this at a
    /// local mock server.
    pub fn with_base_url(base_url: impl Into<String>, credentials: CredentialStore) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    /// The credential store this client reads tokens from.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Attach the stored access token, when one exists.
    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.load() {
            Some(pair) => request.header("Authorization", format!("Bearer {}", pair.access)),
            None => request,
        }
    }

    /// Map an HTTP error response to an `ApiError` with the message
    /// pulled out of the body.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(
            status_code,
            extract_error_message(&body),
        ))
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Register a new account. Returns the created user together with
    /// its first token pair.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse> {
        let url = format!("{}/auth/register/", self.base_url);
        let body = RegisterRequest::new(username, email, password);
        debug!(username, "register");
        let response = self.authed(self.http.post(&url)).json(&body).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Exchange credentials for a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let url = format!("{}/auth/login/", self.base_url);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        debug!(username, "login");
        let response = self.authed(self.http.post(&url)).json(&body).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Who does the stored access token belong to.
    pub async fn me(&self) -> Result<User> {
        let url = format!("{}/auth/me/", self.base_url);
        let response = self.authed(self.http.get(&url)).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// The full task collection in the server's canonical order.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = format!("{}/tasks/", self.base_url);
        let response = self.authed(self.http.get(&url)).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Create a task; the server assigns id, rank, and timestamp.
    pub async fn create_task(&self, text: &str, options: &NewTask) -> Result<Task> {
        let url = format!("{}/tasks/", self.base_url);
        let body = CreateTaskRequest {
            text: text.to_string(),
            tag: options.tag.clone(),
            scheduled_for: options.scheduled_for,
        };
        debug!(text, "create task");
        let response = self.authed(self.http.post(&url)).json(&body).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Partially update a task; returns the server's representation.
    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let url = format!("{}/tasks/{}/", self.base_url, id);
        let response = self
            .authed(self.http.patch(&url))
            .json(patch)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Delete a task. No payload comes back.
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let url = format!("{}/tasks/{}/", self.base_url, id);
        let response = self.authed(self.http.delete(&url)).send().await?;
        self.check_response(response).await?;
        Ok(())
    }

    /// Persist a new global order as the full list of task ids. The
    /// response body carries nothing the client needs.
    pub async fn reorder_tasks(&self, task_ids: Vec<i64>) -> Result<()> {
        let url = format!("{}/tasks/reorder/", self.base_url);
        debug!(count = task_ids.len(), "reorder tasks");
        let body = ReorderRequest { task_ids };
        let response = self.authed(self.http.post(&url)).json(&body).send().await?;
        self.check_response(response).await?;
        Ok(())
    }

    // ── Diary entries ────────────────────────────────────────────────

    /// All diary entries, newest day first.
    pub async fn list_entries(&self) -> Result<Vec<DoneEntry>> {
        let url = format!("{}/tasks/done-entries/", self.base_url);
        let response = self.authed(self.http.get(&url)).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Record a diary entry.
    pub async fn create_entry(&self, entry: &NewDoneEntry) -> Result<DoneEntry> {
        let url = format!("{}/tasks/done-entries/", self.base_url);
        let response = self.authed(self.http.post(&url)).json(entry).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// Delete a diary entry.
    pub async fn delete_entry(&self, id: i64) -> Result<()> {
        let url = format!("{}/tasks/done-entries/{}/", self.base_url, id);
        let response = self.authed(self.http.delete(&url)).send().await?;
        self.check_response(response).await?;
        Ok(())
    }
}
