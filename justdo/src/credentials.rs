//! Durable storage for the session's token pair.
//!
//! Tokens live in a JSON file with owner-only permissions, mirroring
//! the browser client's fixed-name token storage. `JUSTDO_ACCESS_TOKEN`
//! short-circuits the file for scripted use.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::types::TokenPair;

/// Resolve the credentials file path from environment or default.
fn default_credentials_path() -> PathBuf {
    if let Ok(path) = std::env::var("JUSTDO_CREDENTIALS_PATH") {
        PathBuf::from(path)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".justdo")
            .join("credentials")
    }
}

/// File-backed store for the access/refresh token pair.
///
/// Only login, register, logout, and the session-bootstrap failure
/// path write here; everything else just reads.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    /// `JUSTDO_ACCESS_TOKEN`, captured once at construction.
    env_token: Option<String>,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CredentialStore {
    /// Store at the standard location (`JUSTDO_CREDENTIALS_PATH` or
    /// `~/.justdo/credentials`), honoring `JUSTDO_ACCESS_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            path: default_credentials_path(),
            env_token: std::env::var("JUSTDO_ACCESS_TOKEN").ok(),
        }
    }

    /// Store at an explicit path, ignoring the environment. Tests point
    /// this at a temp file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_token: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the session token came from `JUSTDO_ACCESS_TOKEN` rather
    /// than the credentials file.
    pub fn has_env_token(&self) -> bool {
        self.env_token.is_some()
    }

    /// Load the stored pair. An environment token wins over the file.
    /// Missing or unreadable files read as "not logged in" rather than
    /// failing.
    pub fn load(&self) -> Option<TokenPair> {
        if let Some(access) = &self.env_token {
            return Some(TokenPair {
                access: access.clone(),
                refresh: String::new(),
            });
        }

        if !self.path.exists() {
            return None;
        }
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Persist the pair with owner-only permissions.
    pub fn save(&self, pair: &TokenPair) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(pair)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(contents.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    /// Remove the stored pair. Doing this twice is fine.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "credentials cleared");
        }
        Ok(())
    }
}
