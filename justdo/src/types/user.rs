//! Account types: the authenticated user and the JWT pair

use serde::{Deserialize, Serialize};

/// The user behind the current session, as reported by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "super::task::empty_as_none")]
    pub email: Option<String>,
}

/// Access/refresh token pair issued by login and register
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
