//! Authenticated session context.
//!
//! The session travels explicitly to every API-calling collaborator; there
//! is no ambient global auth state. Lifecycle is tied to login/logout: a
//! 401 from any call clears it and the shell routes back to login.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
    user: Option<AccountUser>,
}

/// Shared handle the client and the shell both hold.
pub type SharedSession = Arc<Mutex<Session>>;

impl Session {
    /// Create an unauthenticated session against a backend base URL
    /// (e.g. `https://app.example.com/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl(base_url.clone()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            user: None,
        })
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Store credentials after a successful login.
    pub fn authorize(&mut self, token: impl Into<String>, user: AccountUser) {
        self.token = Some(token.into());
        self.user = Some(user);
    }

    /// Drop credentials (logout, or a 401 from the backend).
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&AccountUser> {
        self.user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AccountUser {
        AccountUser {
            id: "u-1".to_string(),
            email: "test@example.com".to_string(),
            name: None,
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::new("https://app.example.com/api").unwrap();
        assert!(!session.is_authenticated());

        session.authorize("tok-123", user());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-123"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(Session::new("not a url").is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let session = Session::new("https://app.example.com/api/").unwrap();
        assert_eq!(session.base_url(), "https://app.example.com/api");
    }
}
