//! HTTP API Client
//!
//! Functions for talking to the Bichance backend. Every call returns a
//! message string on failure; pages show it as a toast.

use bichance::auth::{OtpReply, SendOtpRequest, VerifyOtpRequest};
use bichance::endpoints;
use bichance::envelope::{list_from_envelope, ApiEnvelope, ErrorBody, ListPayload};
use bichance::models::{
    AdminSession, Booking, CheckoutSession, Dinner, NewDinner, OptedInDinner,
    SubscriptionSessionInfo, UserProfile,
};
use bichance::plans::PriceIds;
use bichance::profile::JourneyAnswer;
use bichance::wizard::OptInRequest;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Production backend, used until `/config.json` says otherwise
pub const DEFAULT_API_BASE: &str = "https://bichance-production-a30f.up.railway.app";

const API_URL_KEY: &str = "bichance_api_url";
const PRICE_IDS_KEY: &str = "bichance_price_ids";

const RATE_LIMITED: &str = "Too many requests. Please wait 60 seconds before trying again.";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Checkout price ids from `/config.json`, or the built-in ones
pub fn price_ids() -> PriceIds {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(PRICE_IDS_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn set_price_ids(ids: &PriceIds) {
    let Ok(raw) = serde_json::to_string(ids) else {
        return;
    };
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(PRICE_IDS_KEY, &raw);
        }
    }
}

#[derive(Debug, Deserialize)]
struct PublicConfig {
    api_url: String,
    #[serde(default)]
    price_ids: PriceIds,
}

/// Pick up the backend URL the web host was configured with
pub async fn load_runtime_config() -> Result<(), String> {
    let response = Request::get("/config.json")
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("config.json returned {}", response.status()));
    }
    let config: PublicConfig = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;
    set_api_base(&config.api_url);
    set_price_ids(&config.price_ids);
    Ok(())
}

// ============ Request Helpers ============

fn url(path: &str) -> String {
    endpoints::url(&get_api_base(), path)
}

/// Accept header plus the bearer token when signed in
fn prepare(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("accept", "application/json");
    match crate::state::session::access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, String> {
    prepare(builder)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))
}

async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, String> {
    prepare(builder)
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))
}

/// Turn a non-2xx response into its message
async fn failure(response: Response, fallback: &str) -> String {
    if response.status() == 429 {
        return RATE_LIMITED.to_string();
    }
    let text = response.text().await.unwrap_or_default();
    ErrorBody::from_text(&text).describe(fallback)
}

async fn read<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(failure(response, fallback).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn read_list<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<Vec<T>, String> {
    let envelope: ApiEnvelope<ListPayload<T>> = read(response, fallback).await?;
    Ok(list_from_envelope(envelope))
}

/// OTP endpoints are judged by the sign-in flow, not here
async fn otp_reply(response: Response) -> Result<OtpReply, String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    Ok(OtpReply::from_body(status, &text))
}

// ============ Auth ============

pub async fn send_otp(request: &SendOtpRequest) -> Result<OtpReply, String> {
    let response = send_json(Request::post(&url(endpoints::SEND_OTP)), request).await?;
    otp_reply(response).await
}

pub async fn verify_otp(request: &VerifyOtpRequest) -> Result<OtpReply, String> {
    let response = send_json(Request::post(&url(endpoints::VERIFY_OTP)), request).await?;
    otp_reply(response).await
}

pub async fn logout() -> Result<(), String> {
    let response = send(Request::post(&url(endpoints::LOGOUT))).await?;
    if response.ok() {
        Ok(())
    } else {
        Err(failure(response, "Logout failed").await)
    }
}

// ============ Profile ============

/// Why `/users/me` failed
#[derive(Debug, Clone)]
pub enum MeError {
    /// The backend answered and refused the token
    Rejected(String),
    /// No answer at all
    Network(String),
    /// The backend accepted the token but the body did not decode
    Unreadable(String),
}

pub async fn fetch_me() -> Result<UserProfile, MeError> {
    let response = send(Request::get(&url(endpoints::ME)))
        .await
        .map_err(MeError::Network)?;
    if !response.ok() {
        return Err(MeError::Rejected(
            failure(response, "Failed to fetch profile").await,
        ));
    }
    let envelope: ApiEnvelope<UserProfile> = response
        .json()
        .await
        .map_err(|e| MeError::Unreadable(format!("Parse error: {}", e)))?;
    envelope
        .data
        .ok_or_else(|| MeError::Unreadable("profile missing from response".to_string()))
}

pub async fn save_journey(answer: &JourneyAnswer) -> Result<(), String> {
    let response = send_json(Request::post(&url(endpoints::JOURNEY_SAVE)), answer).await?;
    if response.ok() {
        return Ok(());
    }
    let text = response.text().await.unwrap_or_default();
    let detail = ErrorBody::from_text(&text).describe("");
    Err(answer.failure_message(Some(&detail)))
}

pub async fn submit_journey() -> Result<(), String> {
    let response = send(Request::post(&url(endpoints::JOURNEY_SUBMIT))).await?;
    let _: ApiEnvelope<Value> = read(response, "Failed to submit journey").await?;
    Ok(())
}

// ============ Dinners ============

pub async fn upcoming_dinners() -> Result<Vec<Dinner>, String> {
    let response = send(Request::get(&url(endpoints::UPCOMING_DINNERS))).await?;
    read_list(response, "Failed to fetch dinners").await
}

pub async fn opt_in(request: &OptInRequest) -> Result<(), String> {
    let response = send_json(Request::post(&url(endpoints::OPT_IN)), request).await?;
    let _: ApiEnvelope<Value> = read(response, "Failed to opt-in for dinner").await?;
    Ok(())
}

pub async fn my_bookings() -> Result<Vec<Booking>, String> {
    let response = send(Request::get(&url(endpoints::MY_BOOKINGS))).await?;
    read_list(response, "Failed to fetch bookings").await
}

pub async fn opted_in_dinners() -> Result<Vec<OptedInDinner>, String> {
    let response = send(Request::get(&url(endpoints::OPTED_IN_DINNERS))).await?;
    read_list(response, "Failed to fetch opted-in dinners").await
}

// ============ Subscription ============

/// Where to send the member to pay, if the backend returned a URL
pub async fn create_checkout_session(price_id: &str) -> Result<Option<String>, String> {
    #[derive(Serialize)]
    struct CheckoutRequest<'a> {
        price_id: &'a str,
    }

    let response = send_json(
        Request::post(&url(endpoints::CHECKOUT_SESSION)),
        &CheckoutRequest { price_id },
    )
    .await?;
    let session: CheckoutSession = read(response, "Failed to create checkout session").await?;
    Ok(session.redirect_url().map(str::to_string))
}

pub async fn session_info(session_id: &str) -> Result<SubscriptionSessionInfo, String> {
    let path = format!(
        "{}?session_id={}",
        endpoints::SESSION_INFO,
        String::from(js_sys::encode_uri_component(session_id))
    );
    let response = send(Request::get(&url(&path))).await?;
    read(response, "Failed to fetch session info").await
}

// ============ Admin ============

pub async fn admin_login(email: &str, password: &str) -> Result<AdminSession, String> {
    #[derive(Serialize)]
    struct AdminLoginRequest<'a> {
        email: &'a str,
        password: &'a str,
    }

    let response = send_json(
        Request::post(&url(endpoints::ADMIN_LOGIN)),
        &AdminLoginRequest { email, password },
    )
    .await?;
    read(response, "Invalid admin credentials").await
}

pub async fn admin_create_dinner(dinner: &NewDinner) -> Result<Option<String>, String> {
    let response = send_json(Request::post(&url(endpoints::ADMIN_CREATE_DINNER)), dinner).await?;
    let envelope: ApiEnvelope<Value> = read(response, "Failed to create dinner").await?;
    Ok(envelope.message)
}

pub async fn admin_list_dinners() -> Result<Vec<Dinner>, String> {
    let response = send(Request::get(&url(endpoints::ADMIN_DINNERS))).await?;
    read_list(response, "Failed to fetch dinners").await
}
