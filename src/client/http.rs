//! Bichance REST API Client
//!
//! Typed wrapper over the backend endpoints. One request per call, no
//! retries: failures are surfaced to the caller as [`ClientError`].

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::error::{ClientError, ClientResult};
use crate::auth::{OtpReply, SendOtpRequest, VerifyOtpRequest};
use crate::config::ApiConfig;
use crate::endpoints;
use crate::envelope::{list_from_envelope, ApiEnvelope, ErrorBody, ListPayload};
use crate::models::{
    AdminSession, Booking, CheckoutSession, Dinner, NewDinner, OptedInDinner,
    SubscriptionSessionInfo, UserProfile,
};
use crate::profile::JourneyAnswer;
use crate::wizard::OptInRequest;

#[derive(Debug, Serialize)]
struct CheckoutRequest<'a> {
    price_id: &'a str,
}

#[derive(Debug, Serialize)]
struct AdminLoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Bichance backend client
#[derive(Debug, Clone)]
pub struct BichanceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BichanceClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach (or clear) the bearer token sent with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = endpoints::url(&self.base_url, path);
        tracing::debug!("backend request {} {}", method, url);
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn require_token(&self) -> ClientResult<()> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    async fn send(builder: RequestBuilder) -> ClientResult<Response> {
        builder.send().await.map_err(ClientError::from_reqwest)
    }

    /// Pass successful responses through, turn the rest into errors
    async fn check(response: Response, fallback: &str) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 429 {
            return Err(ClientError::RateLimited);
        }
        let text = response.text().await.unwrap_or_default();
        let message = ErrorBody::from_text(&text).describe(fallback);
        tracing::warn!(status = status.as_u16(), %message, "backend error");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ClientResult<T> {
        let response = Self::send(self.request(reqwest::Method::GET, path)).await?;
        Self::decode(Self::check(response, fallback).await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = Self::send(self.request(reqwest::Method::POST, path).json(body)).await?;
        Self::decode(Self::check(response, fallback).await?).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ClientResult<T> {
        let response = Self::send(self.request(reqwest::Method::POST, path)).await?;
        Self::decode(Self::check(response, fallback).await?).await
    }

    /// OTP endpoints report failures in-band; the sign-in flow interprets
    /// the status and envelope itself.
    async fn otp_call<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<OtpReply> {
        let response = Self::send(self.request(reqwest::Method::POST, path).json(body)).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(ClientError::from_reqwest)?;
        Ok(OtpReply::from_body(status, &text))
    }

    // ----- auth -----

    pub async fn send_otp(&self, request: &SendOtpRequest) -> ClientResult<OtpReply> {
        self.otp_call(endpoints::SEND_OTP, request).await
    }

    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> ClientResult<OtpReply> {
        self.otp_call(endpoints::VERIFY_OTP, request).await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        let response = Self::send(self.request(reqwest::Method::POST, endpoints::LOGOUT)).await?;
        Self::check(response, "Logout failed").await?;
        Ok(())
    }

    // ----- profile -----

    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.require_token()?;
        let envelope: ApiEnvelope<UserProfile> =
            self.get_json(endpoints::ME, "Failed to fetch profile").await?;
        envelope
            .data
            .ok_or_else(|| ClientError::Decode("profile missing from response".to_string()))
    }

    pub async fn save_journey(&self, answer: &JourneyAnswer) -> ClientResult<()> {
        self.require_token()?;
        let response =
            Self::send(self.request(reqwest::Method::POST, endpoints::JOURNEY_SAVE).json(answer))
                .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        let detail = ErrorBody::from_text(&text).describe("");
        Err(ClientError::Api {
            status: status.as_u16(),
            message: answer.failure_message(Some(&detail)),
        })
    }

    pub async fn submit_journey(&self) -> ClientResult<ApiEnvelope<Value>> {
        self.require_token()?;
        self.post_empty(endpoints::JOURNEY_SUBMIT, "Failed to submit journey")
            .await
    }

    // ----- dinners -----

    pub async fn upcoming_dinners(&self) -> ClientResult<Vec<Dinner>> {
        self.require_token()?;
        let envelope: ApiEnvelope<ListPayload<Dinner>> = self
            .get_json(endpoints::UPCOMING_DINNERS, "Failed to fetch dinners")
            .await?;
        Ok(list_from_envelope(envelope))
    }

    pub async fn opt_in(&self, request: &OptInRequest) -> ClientResult<ApiEnvelope<Value>> {
        self.require_token()?;
        tracing::info!(dinner_id = %request.dinner_id, dietary = %request.dietary_category, "opting in");
        self.post_json(endpoints::OPT_IN, request, "Failed to opt-in for dinner")
            .await
    }

    pub async fn my_bookings(&self) -> ClientResult<Vec<Booking>> {
        self.require_token()?;
        let envelope: ApiEnvelope<ListPayload<Booking>> = self
            .get_json(endpoints::MY_BOOKINGS, "Failed to fetch bookings")
            .await?;
        Ok(list_from_envelope(envelope))
    }

    pub async fn opted_in_dinners(&self) -> ClientResult<Vec<OptedInDinner>> {
        self.require_token()?;
        let envelope: ApiEnvelope<ListPayload<OptedInDinner>> = self
            .get_json(endpoints::OPTED_IN_DINNERS, "Failed to fetch opted-in dinners")
            .await?;
        Ok(list_from_envelope(envelope))
    }

    // ----- subscription -----

    pub async fn create_checkout_session(&self, price_id: &str) -> ClientResult<CheckoutSession> {
        self.require_token()?;
        self.post_json(
            endpoints::CHECKOUT_SESSION,
            &CheckoutRequest { price_id },
            "Failed to create checkout session",
        )
        .await
    }

    pub async fn session_info(&self, session_id: &str) -> ClientResult<SubscriptionSessionInfo> {
        let path = format!(
            "{}?session_id={}",
            endpoints::SESSION_INFO,
            urlencoding::encode(session_id)
        );
        self.get_json(&path, "Failed to fetch session info").await
    }

    pub async fn cancel_subscription(&self) -> ClientResult<String> {
        self.require_token()?;
        let envelope: ApiEnvelope<Value> = self
            .post_empty(endpoints::CANCEL_SUBSCRIPTION, "Failed to cancel subscription")
            .await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Subscription cancelled".to_string()))
    }

    // ----- admin -----

    pub async fn admin_login(&self, email: &str, password: &str) -> ClientResult<AdminSession> {
        self.post_json(
            endpoints::ADMIN_LOGIN,
            &AdminLoginRequest { email, password },
            "Invalid admin credentials",
        )
        .await
    }

    pub async fn admin_create_dinner(&self, dinner: &NewDinner) -> ClientResult<ApiEnvelope<Value>> {
        self.post_json(endpoints::ADMIN_CREATE_DINNER, dinner, "Failed to create dinner")
            .await
    }

    pub async fn admin_list_dinners(&self) -> ClientResult<Vec<Dinner>> {
        let envelope: ApiEnvelope<ListPayload<Dinner>> = self
            .get_json(endpoints::ADMIN_DINNERS, "Failed to fetch dinners")
            .await?;
        Ok(list_from_envelope(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BichanceClient {
        BichanceClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:1/".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_is_normalized() {
        assert_eq!(client().base_url(), "http://127.0.0.1:1");
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let c = client().with_token(Some(String::new()));
        assert!(!c.has_token());
        let c = c.with_token(Some("t".into()));
        assert!(c.has_token());
    }

    #[tokio::test]
    async fn test_authenticated_calls_need_a_token() {
        let c = client();
        assert!(matches!(c.me().await, Err(ClientError::NotAuthenticated)));
        assert!(matches!(
            c.upcoming_dinners().await,
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        let c = client();
        let result = c
            .send_otp(&SendOtpRequest {
                email: "a@b.co".into(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ClientError::Network(_)) | Err(ClientError::Timeout)
        ));
    }
}
