//! Response Envelope
//!
//! The backend wraps successes in `{success, message, data}` and reports
//! failures as `{detail}` (or sometimes `{message}`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for ApiEnvelope<T> {
    fn default() -> Self {
        Self {
            success: None,
            message: None,
            data: None,
        }
    }
}

impl<T> ApiEnvelope<T> {
    /// Case-insensitive check on the message text
    pub fn message_contains(&self, needle: &str) -> bool {
        self.message
            .as_deref()
            .map(|m| m.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }

    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

/// Error body. `detail` is a string for handled errors and an array for
/// request validation failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Human-readable message, or `fallback` when the body says nothing
    pub fn describe(&self, fallback: &str) -> String {
        match &self.detail {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Parse an error body, tolerating non-JSON responses
    pub fn from_text(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

/// List payloads come back either as a bare array or wrapped as
/// `{"dinners": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Items(Vec<T>),
    Dinners { dinners: Vec<T> },
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Items(items) => items,
            ListPayload::Dinners { dinners } => dinners,
        }
    }
}

/// Pull the list out of an envelope, treating a missing `data` as empty
pub fn list_from_envelope<T>(envelope: ApiEnvelope<ListPayload<T>>) -> Vec<T> {
    envelope.data.map(ListPayload::into_vec).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Booking;

    #[test]
    fn test_detail_string_wins() {
        let body = ErrorBody::from_text(r#"{"detail":"Already opted in","message":"x"}"#);
        assert_eq!(body.describe("fallback"), "Already opted in");
    }

    #[test]
    fn test_message_then_fallback() {
        let body = ErrorBody::from_text(r#"{"message":"Invalid OTP"}"#);
        assert_eq!(body.describe("fallback"), "Invalid OTP");

        let body = ErrorBody::from_text("<html>502</html>");
        assert_eq!(body.describe("Failed to fetch dinners"), "Failed to fetch dinners");
    }

    #[test]
    fn test_validation_detail_rendered_as_json() {
        let body = ErrorBody::from_text(r#"{"detail":[{"loc":["body","email"]}]}"#);
        assert!(body.describe("x").contains("email"));
    }

    #[test]
    fn test_bookings_wrapped_in_dinners() {
        let env: ApiEnvelope<ListPayload<Booking>> = serde_json::from_str(
            r#"{"success":true,"message":"ok","data":{"dinners":[{"id":"g1"}]}}"#,
        )
        .unwrap();
        let list = list_from_envelope(env);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id.as_deref(), Some("g1"));
    }

    #[test]
    fn test_bare_array_and_missing_data() {
        let env: ApiEnvelope<ListPayload<Booking>> =
            serde_json::from_str(r#"{"data":[{"id":"a"},{"id":"b"}]}"#).unwrap();
        assert_eq!(list_from_envelope(env).len(), 2);

        let env: ApiEnvelope<ListPayload<Booking>> =
            serde_json::from_str(r#"{"message":"nothing"}"#).unwrap();
        assert!(list_from_envelope(env).is_empty());
    }

    #[test]
    fn test_message_contains_is_case_insensitive() {
        let env: ApiEnvelope<Value> = ApiEnvelope {
            message: Some("OTP sent".into()),
            ..Default::default()
        };
        assert!(env.message_contains("otp"));
        assert!(!env.is_success());
    }
}
