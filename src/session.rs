//! Session / Token Storage
//!
//! The signed-in state is just the token pair plus the email it was issued
//! for. The browser keeps it in `localStorage` under [`keys`]; native tools
//! keep it in a JSON file ([`FileSessionStore`]).

use serde::{Deserialize, Serialize};

use crate::models::{TokenPair, UserProfile};

/// Storage keys shared with the browser frontend
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const EMAIL: &str = "email";
    /// Dinner to opt into once checkout returns
    pub const PENDING_DINNER_ID: &str = "pending_dinner_id";

    pub const ALL: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, EMAIL, PENDING_DINNER_ID];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub pending_dinner_id: Option<String>,
    /// Last profile fetched from `/users/me`
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl Session {
    pub fn login(&mut self, tokens: TokenPair, email: impl Into<String>) {
        self.access_token = Some(tokens.access_token);
        self.refresh_token = tokens.refresh_token;
        self.email = Some(email.into());
    }

    /// Drops everything, not only the tokens
    pub fn logout(&mut self) {
        *self = Session::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .as_deref()
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// `Authorization` header value, when signed in
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }
}

#[cfg(feature = "native")]
pub use file::{FileSessionStore, SessionError};

#[cfg(feature = "native")]
mod file {
    use std::path::{Path, PathBuf};

    use super::Session;
    use crate::client::ClientError;
    use crate::models::{TokenPair, UserProfile};

    #[derive(Debug, thiserror::Error)]
    pub enum SessionError {
        #[error("Session file I/O error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Corrupt session file: {0}")]
        Format(#[from] serde_json::Error),
    }

    /// JSON-file-backed session for the CLI
    #[derive(Debug)]
    pub struct FileSessionStore {
        path: PathBuf,
        session: Session,
    }

    impl FileSessionStore {
        /// Open the store. A missing file is an empty session.
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
            let path = path.into();
            let session = if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            } else {
                Session::default()
            };
            Ok(Self { path, session })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn session(&self) -> &Session {
            &self.session
        }

        fn save(&self) -> Result<(), SessionError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(&self.session)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        }

        pub fn login(&mut self, tokens: TokenPair, email: &str) -> Result<(), SessionError> {
            self.session.login(tokens, email);
            tracing::info!(email, "session stored");
            self.save()
        }

        /// Clear the session and remove the file
        pub fn logout(&mut self) -> Result<(), SessionError> {
            self.session.logout();
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            tracing::info!("session cleared");
            Ok(())
        }

        /// Clear a stored session the backend refused. Returns whether
        /// anything was cleared; network failures keep the session.
        pub fn forget_if_rejected(&mut self, error: &ClientError) -> Result<bool, SessionError> {
            if !self.is_authenticated() || !error.is_auth_failure() {
                return Ok(false);
            }
            tracing::warn!(%error, "stored token rejected");
            self.logout()?;
            Ok(true)
        }

        pub fn set_profile(&mut self, profile: UserProfile) -> Result<(), SessionError> {
            self.session.profile = Some(profile);
            self.save()
        }

        pub fn set_pending_dinner(&mut self, dinner_id: Option<String>) -> Result<(), SessionError> {
            self.session.pending_dinner_id = dinner_id;
            self.save()
        }

        pub fn is_authenticated(&self) -> bool {
            self.session.is_authenticated()
        }

        pub fn token(&self) -> Option<&str> {
            self.session.token()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: "acc".into(),
            refresh_token: Some("ref".into()),
        }
    }

    #[test]
    fn test_login_logout() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);

        session.login(tokens(), "a@b.co");
        assert!(session.is_authenticated());
        assert_eq!(session.bearer().as_deref(), Some("Bearer acc"));

        session.pending_dinner_id = Some("d1".into());
        session.logout();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session {
            access_token: Some(String::new()),
            ..Default::default()
        };
        assert!(!session.is_authenticated());
        assert!(session.bearer().is_none());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = FileSessionStore::open(&path).unwrap();
        assert!(!store.is_authenticated());
        store.login(tokens(), "a@b.co").unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.token(), Some("acc"));
        assert_eq!(reopened.session().email.as_deref(), Some("a@b.co"));

        let mut store = reopened;
        store.logout().unwrap();
        assert!(!path.exists());
        assert!(!FileSessionStore::open(&path).unwrap().is_authenticated());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_rejected_token_clears_the_store() {
        use crate::client::ClientError;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut store = FileSessionStore::open(&path).unwrap();
        store.login(tokens(), "a@b.co").unwrap();

        let offline = ClientError::Network("connection refused".into());
        assert!(!store.forget_if_rejected(&offline).unwrap());
        assert!(store.is_authenticated());

        let rejected = ClientError::Api {
            status: 401,
            message: "Not authenticated".into(),
        };
        assert!(store.forget_if_rejected(&rejected).unwrap());
        assert!(!store.is_authenticated());
        assert!(!path.exists());

        // nothing left to clear
        assert!(!store.forget_if_rejected(&rejected).unwrap());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FileSessionStore::open(&path),
            Err(SessionError::Format(_))
        ));
    }
}
