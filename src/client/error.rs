//! Client error taxonomy

use thiserror::Error;

/// Errors from talking to the Bichance backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Too many requests. Please wait 60 seconds before trying again.")]
    RateLimited,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not signed in")]
    NotAuthenticated,
}

impl ClientError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::RateLimited => Some(429),
            _ => None,
        }
    }

    /// The message as the backend phrased it (for matching "Already opted in")
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// 401/403 from an authenticated endpoint: the stored token is no good
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated)
            || matches!(self.status(), Some(401) | Some(403))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Already opted in".into(),
        };
        assert_eq!(err.to_string(), "Already opted in");
        assert_eq!(err.message(), "Already opted in");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_auth_failures() {
        assert!(ClientError::NotAuthenticated.is_auth_failure());
        assert!(ClientError::Api {
            status: 401,
            message: "x".into()
        }
        .is_auth_failure());
    }
}
