//! Session lifecycle: login, registration, logout, and startup
//! restoration of a previously saved session.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::types::User;

/// What the session looks like after a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A token is on disk and the server vouched for it.
    Authenticated(User),
    /// No token, or the server rejected the one we had.
    Unauthenticated,
}

/// Drives the authentication endpoints and keeps the credential file
/// in step with what the server last told us.
pub struct SessionManager {
    api: ApiClient,
}

impl SessionManager {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The API client this session rides on. Commands use it for task
    /// and diary calls after authentication is settled.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Restore the session saved by a previous run.
    ///
    /// Without a stored token this resolves locally; no request is
    /// made. With one, the server gets the final say: unless "who am
    /// I" vouches for the token, the credentials are deleted and the
    /// next run starts clean. Only a failure to delete them is an
    /// error here.
    pub async fn bootstrap(&self) -> Result<SessionState> {
        if self.api.credentials().load().is_none() {
            return Ok(SessionState::Unauthenticated);
        }

        match self.api.me().await {
            Ok(user) => Ok(SessionState::Authenticated(user)),
            Err(error) => {
                debug!(%error, "could not validate stored token, clearing credentials");
                self.api.credentials().clear()?;
                Ok(SessionState::Unauthenticated)
            }
        }
    }

    /// Log in and persist the issued token pair, then fetch the
    /// profile it belongs to. The tokens survive a failed profile
    /// fetch; a retry can reuse them.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let pair = self.api.login(username, password).await?;
        self.api.credentials().save(&pair)?;
        let user = self.api.me().await?;
        Ok(user)
    }

    /// Create an account. Registration responds with the user and a
    /// token pair in one shot, so no follow-up profile fetch is
    /// needed.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let response = self.api.register(username, email, password).await?;
        self.api.credentials().save(&response.tokens)?;
        Ok(response.user)
    }

    /// Forget the stored token pair. Purely local; the server keeps
    /// no session to tear down.
    pub fn logout(&self) -> Result<()> {
        self.api.credentials().clear()
    }
}
