//! OTP Sign-In Flow
//!
//! Two-step email/OTP sign-in. The flow owns validation, the rate-limit
//! cooldown and the interpretation of backend replies; the caller owns the
//! transport (browser fetch or native HTTP client).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{ApiEnvelope, ErrorBody};
use crate::models::TokenPair;

/// Seconds to wait after the backend answers 429
pub const RATE_LIMIT_COOLDOWN_SECS: u32 = 60;

/// Minimum OTP length accepted before calling the backend
pub const MIN_OTP_LEN: usize = 4;

/// Where a freshly verified user lands
pub const ONBOARDING_PATH: &str = "/onboarding";

/// Where an already signed-in user is sent from the auth page
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// HTTP status plus whatever envelope the backend sent back
#[derive(Debug, Clone)]
pub struct OtpReply {
    pub status: u16,
    pub envelope: ApiEnvelope<Value>,
}

impl OtpReply {
    pub fn new(status: u16, envelope: ApiEnvelope<Value>) -> Self {
        Self { status, envelope }
    }

    /// Build from a raw response body. Error bodies carry `detail` instead
    /// of `message`; that text is lifted into the envelope message.
    pub fn from_body(status: u16, body: &str) -> Self {
        let mut envelope: ApiEnvelope<Value> = serde_json::from_str(body).unwrap_or_default();
        if envelope.message.is_none() && !(200..300).contains(&status) {
            let detail = ErrorBody::from_text(body).describe("");
            if !detail.is_empty() {
                envelope.message = Some(detail);
            }
        }
        Self { status, envelope }
    }

    fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStep {
    Email,
    Otp,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedLogin {
    pub email: String,
    /// Absent when the backend verified without issuing tokens
    pub tokens: Option<TokenPair>,
    pub redirect_to: &'static str,
}

/// State of the sign-in form
#[derive(Debug, Clone)]
pub struct OtpFlow {
    pub step: OtpStep,
    pub email: String,
    pub otp: String,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub cooldown: u32,
}

impl Default for OtpFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpFlow {
    pub fn new() -> Self {
        Self {
            step: OtpStep::Email,
            email: String::new(),
            otp: String::new(),
            loading: false,
            error: None,
            success: None,
            cooldown: 0,
        }
    }

    fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Validate the email and produce the send request. Returns `None` and
    /// sets an error when the request must not be sent.
    pub fn begin_send(&mut self) -> Option<SendOtpRequest> {
        self.clear_messages();

        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            self.error = Some("Please enter a valid email address.".to_string());
            return None;
        }

        if self.cooldown > 0 {
            self.error = Some(format!(
                "Please wait {} seconds before trying again.",
                self.cooldown
            ));
            return None;
        }

        self.loading = true;
        Some(SendOtpRequest {
            email: email.to_string(),
        })
    }

    /// Apply the backend's answer to a send request. `Err` is a transport
    /// failure (no HTTP response at all).
    pub fn finish_send(&mut self, reply: Result<OtpReply, String>) {
        self.loading = false;

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "send-otp request failed");
                self.error = Some("Failed to send OTP. Please try again.".to_string());
                return;
            }
        };

        if reply.status == 429 {
            self.cooldown = RATE_LIMIT_COOLDOWN_SECS;
            self.error = Some(format!(
                "Too many requests. Please wait {} seconds before trying again.",
                RATE_LIMIT_COOLDOWN_SECS
            ));
        } else if reply.ok() && (reply.envelope.is_success() || reply.envelope.message_contains("otp"))
        {
            self.step = OtpStep::Otp;
            self.success = Some(
                reply
                    .envelope
                    .message
                    .unwrap_or_else(|| "OTP sent to your email!".to_string()),
            );
        } else {
            self.error = Some(
                reply
                    .envelope
                    .message
                    .unwrap_or_else(|| "Failed to send OTP.".to_string()),
            );
        }
    }

    /// Validate the code and produce the verify request
    pub fn begin_verify(&mut self) -> Option<VerifyOtpRequest> {
        self.clear_messages();

        let otp = self.otp.trim();
        if otp.chars().count() < MIN_OTP_LEN {
            self.error = Some("Please enter the OTP.".to_string());
            return None;
        }

        self.loading = true;
        Some(VerifyOtpRequest {
            email: self.email.trim().to_string(),
            otp: otp.to_string(),
        })
    }

    /// Apply the backend's answer to a verify request. On success the
    /// caller stores the tokens and navigates to `redirect_to`.
    pub fn finish_verify(&mut self, reply: Result<OtpReply, String>) -> Option<VerifiedLogin> {
        self.loading = false;

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "verify-otp request failed");
                self.error = Some("Failed to verify OTP. Please try again.".to_string());
                return None;
            }
        };

        let verified = reply.ok()
            && (reply.envelope.is_success()
                || reply.envelope.message_contains("verified")
                || reply.envelope.message_contains("login successful"));

        if !verified {
            self.error = Some(
                reply
                    .envelope
                    .message
                    .unwrap_or_else(|| "Invalid OTP.".to_string()),
            );
            return None;
        }

        self.success = Some(
            reply
                .envelope
                .message
                .clone()
                .unwrap_or_else(|| "OTP verified! Redirecting...".to_string()),
        );

        let tokens = reply
            .envelope
            .data
            .and_then(|data| serde_json::from_value::<TokenPair>(data).ok())
            .filter(|t| !t.access_token.is_empty());

        Some(VerifiedLogin {
            email: self.email.trim().to_string(),
            tokens,
            redirect_to: ONBOARDING_PATH,
        })
    }

    /// Go back to the email step to use a different address
    pub fn change_email(&mut self) {
        self.step = OtpStep::Email;
        self.clear_messages();
    }

    /// One second of cooldown elapsed. Returns the remaining seconds.
    pub fn tick(&mut self) -> u32 {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.cooldown
    }

    pub fn send_label(&self) -> String {
        if self.loading {
            "Sending OTP...".to_string()
        } else if self.cooldown > 0 {
            format!("Wait {}s", self.cooldown)
        } else {
            "Send OTP".to_string()
        }
    }

    pub fn verify_label(&self) -> &'static str {
        if self.loading {
            "Verifying..."
        } else {
            "Verify OTP"
        }
    }
}
