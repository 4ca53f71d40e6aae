//! Command handlers for the justdo CLI.
//!
//! Each invocation is one shot: restore the session, load the
//! collection, run the command, exit.

use chrono::NaiveDate;
use tracing::debug;

use justdo::{ApiClient, ApiError, SessionManager, SessionState, TaskStore, User};

pub mod auth;
pub mod board;
pub mod diary;
pub mod tasks;
pub mod theme;

/// Restore the saved session and load the full collection. Every
/// network-touching command starts here; an unauthenticated session
/// turns into the "not logged in" error before any data is fetched.
pub(crate) async fn open_board() -> Result<(User, TaskStore), ApiError> {
    let api = ApiClient::new();
    let session = SessionManager::new(api.clone());
    let user = match session.bootstrap().await? {
        SessionState::Authenticated(user) => user,
        SessionState::Unauthenticated => return Err(ApiError::AuthRequired),
    };
    debug!(username = %user.username, "session restored");

    let store = TaskStore::new(api);
    store.load().await?;
    Ok((user, store))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
