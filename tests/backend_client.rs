//! Client and booking flows against an in-process stand-in for the backend.

#![cfg(feature = "native")]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bichance::auth::{OtpFlow, OtpStep, RATE_LIMIT_COOLDOWN_SECS};
use bichance::booking::BookingService;
use bichance::client::{BichanceClient, ClientError};
use bichance::config::ApiConfig;
use bichance::models::{Dinner, TokenPair};
use bichance::plans::{PlanKey, PriceIds};
use bichance::session::FileSessionStore;
use bichance::wizard::{DashboardTab, MealPreference, OptInRequest};

/// One request as the stub saw it
#[derive(Debug, Clone)]
struct Seen {
    path: &'static str,
    auth: Option<String>,
    body: Value,
}

#[derive(Default)]
struct Backend {
    seen: Mutex<Vec<Seen>>,
    opted_in: Mutex<Vec<String>>,
}

type Shared = Arc<Backend>;

impl Backend {
    fn record(&self, path: &'static str, headers: &HeaderMap, body: Value) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push(Seen { path, auth, body });
    }

    fn seen(&self, path: &str) -> Vec<Seen> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.path == path)
            .cloned()
            .collect()
    }
}

async fn send_otp(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record("send-otp", &headers, body.clone());
    if body["email"] == "busy@example.com" {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"detail": "Too many requests"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "OTP sent to your email"})),
    )
}

async fn verify_otp(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record("verify-otp", &headers, body.clone());
    if body["otp"] != "123456" {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "Invalid OTP"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Login successful",
            "data": {"access_token": "tok-1", "refresh_token": "ref-1"}
        })),
    )
}

async fn me(State(backend): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    backend.record("me", &headers, Value::Null);
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer tok-1") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not authenticated"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "email": "asha@example.com",
                "current_city": "Delhi",
                "country": "India",
                "subscription_status": "active",
                "onboarding_complete": null,
                "personality_answers": ["1", "0"]
            }
        })),
    )
}

async fn upcoming() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {"_id": "d1", "date": "2025-07-09T20:00:00", "city": "Delhi"},
            {"_id": "d2", "date": "2025-07-16T20:00:00", "city": "Delhi"}
        ]
    }))
}

async fn opt_in(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record("opt-in", &headers, body.clone());
    let dinner_id = body["dinner_id"].as_str().unwrap_or_default().to_string();
    if dinner_id == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Already opted in"})),
        );
    }
    if dinner_id == "broken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Dinner is full"})),
        );
    }
    backend.opted_in.lock().unwrap().push(dinner_id);
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "Opted in"})),
    )
}

async fn opted_in(State(backend): State<Shared>) -> Json<Value> {
    let list: Vec<Value> = backend
        .opted_in
        .lock()
        .unwrap()
        .iter()
        .map(|id| json!({"dinner_id": id, "date": "2025-07-09T20:00:00"}))
        .collect();
    Json(json!({"success": true, "data": list}))
}

async fn my_bookings(State(backend): State<Shared>) -> Json<Value> {
    let list: Vec<Value> = backend
        .opted_in
        .lock()
        .unwrap()
        .iter()
        .map(|id| json!({"_id": format!("b-{}", id), "date": "2025-07-09T20:00:00"}))
        .collect();
    Json(json!({"success": true, "data": {"dinners": list}}))
}

async fn journey_save(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record("journey-save", &headers, body.clone());
    if body["question_key"] == "current_country" && body["answer"] == "Atlantis" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": "Unknown country"})),
        );
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn checkout(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.record("checkout", &headers, body);
    Json(json!({"session_url": "https://pay.example/session/cs_1"}))
}

async fn session_info(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("session_id").map(String::as_str) {
        Some("cs_1 a") => (
            StatusCode::OK,
            Json(json!({
                "subscription": {"id": "sub_1", "status": "active", "current_period_end": 0}
            })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Session not found"})),
        ),
    }
}

async fn spawn_backend() -> (String, Shared) {
    let backend: Shared = Arc::new(Backend::default());

    let api = Router::new()
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/users/me", get(me))
        .route("/dinner/upcoming", get(upcoming))
        .route("/dinner/opt-in", post(opt_in))
        .route("/dinner/dinners/user-view", get(opted_in))
        .route("/dinner/my-bookings", get(my_bookings))
        .route("/journey/save", post(journey_save))
        .route("/subscription/create-checkout-session", post(checkout))
        .route("/subscription/session-info", get(session_info));

    let app = Router::new()
        .nest("/api/v1", api)
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

fn client_for(base_url: &str, token: Option<&str>) -> BichanceClient {
    BichanceClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
    .with_token(token.map(str::to_string))
}

#[tokio::test]
async fn test_otp_sign_in_round_trip() {
    let (url, backend) = spawn_backend().await;
    let client = client_for(&url, None);

    let mut flow = OtpFlow::new();
    flow.email = "  asha@example.com ".to_string();

    let request = flow.begin_send().unwrap();
    flow.finish_send(client.send_otp(&request).await.map_err(|e| e.to_string()));
    assert_eq!(flow.step, OtpStep::Otp);
    assert_eq!(flow.success.as_deref(), Some("OTP sent to your email"));

    let sent = backend.seen("send-otp");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, json!({"email": "asha@example.com"}));
    assert!(sent[0].auth.is_none());

    flow.otp = "123456".to_string();
    let request = flow.begin_verify().unwrap();
    let login = flow
        .finish_verify(client.verify_otp(&request).await.map_err(|e| e.to_string()))
        .unwrap();
    assert_eq!(login.email, "asha@example.com");
    assert_eq!(login.tokens.unwrap().access_token, "tok-1");
    assert_eq!(login.redirect_to, "/onboarding");
}

#[tokio::test]
async fn test_wrong_otp_shows_backend_detail() {
    let (url, _backend) = spawn_backend().await;
    let client = client_for(&url, None);

    let mut flow = OtpFlow::new();
    flow.email = "asha@example.com".to_string();
    flow.otp = "000000".to_string();

    let request = flow.begin_verify().unwrap();
    let login = flow.finish_verify(client.verify_otp(&request).await.map_err(|e| e.to_string()));
    assert!(login.is_none());
    assert_eq!(flow.error.as_deref(), Some("Invalid OTP"));
}

#[tokio::test]
async fn test_rate_limited_send_starts_cooldown() {
    let (url, _backend) = spawn_backend().await;
    let client = client_for(&url, None);

    let mut flow = OtpFlow::new();
    flow.email = "busy@example.com".to_string();
    let request = flow.begin_send().unwrap();
    flow.finish_send(client.send_otp(&request).await.map_err(|e| e.to_string()));

    assert_eq!(flow.step, OtpStep::Email);
    assert_eq!(flow.cooldown, RATE_LIMIT_COOLDOWN_SECS);
    assert!(flow.begin_send().is_none());
}

#[tokio::test]
async fn test_profile_uses_bearer_token() {
    let (url, backend) = spawn_backend().await;

    let profile = client_for(&url, Some("tok-1")).me().await.unwrap();
    assert_eq!(profile.email, "asha@example.com");
    assert_eq!(profile.display_city(), Some("Delhi"));
    assert!(profile.has_active_subscription());
    assert!(!profile.onboarding_complete);
    assert_eq!(profile.personality_answer(1).unwrap().answer, "0");
    assert_eq!(backend.seen("me")[0].auth.as_deref(), Some("Bearer tok-1"));

    let err = client_for(&url, Some("stale")).me().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "Not authenticated");
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_rejected_token_is_forgotten() {
    let (url, _backend) = spawn_backend().await;
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = FileSessionStore::open(&path).unwrap();
    let stale = TokenPair {
        access_token: "stale".into(),
        refresh_token: None,
    };
    store.login(stale, "asha@example.com").unwrap();

    let client = client_for(&url, store.token());
    let err = client.me().await.unwrap_err();
    assert!(store.forget_if_rejected(&err).unwrap());
    assert!(!store.is_authenticated());
    assert!(!FileSessionStore::open(&path).unwrap().is_authenticated());
}

#[tokio::test]
async fn test_unreachable_backend_keeps_the_session() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let dir = tempfile::TempDir::new().unwrap();
    let mut store = FileSessionStore::open(dir.path().join("session.json")).unwrap();
    let tokens = TokenPair {
        access_token: "tok-1".into(),
        refresh_token: None,
    };
    store.login(tokens, "asha@example.com").unwrap();

    let err = client_for(&url, store.token()).me().await.unwrap_err();
    assert!(!err.is_auth_failure());
    assert!(!store.forget_if_rejected(&err).unwrap());
    assert_eq!(store.token(), Some("tok-1"));
}

#[tokio::test]
async fn test_signed_out_calls_never_leave_the_process() {
    let (url, backend) = spawn_backend().await;
    let client = client_for(&url, None);

    assert!(matches!(client.me().await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(
        client.opt_in(&OptInRequest::new("d1", MealPreference::Veg)).await,
        Err(ClientError::NotAuthenticated)
    ));
    assert!(backend.seen("me").is_empty());
    assert!(backend.seen("opt-in").is_empty());
}

#[tokio::test]
async fn test_list_shapes() {
    let (url, backend) = spawn_backend().await;
    backend.opted_in.lock().unwrap().push("d9".to_string());
    let client = client_for(&url, Some("tok-1"));

    let dinners = client.upcoming_dinners().await.unwrap();
    assert_eq!(dinners.len(), 2);
    assert_eq!(dinners[0].id, "d1");
    assert_eq!(dinners[0].display_date(), "Wednesday, Jul 9");

    let bookings = client.my_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].display_id(), "b-d9");
    assert_eq!(bookings[0].display_status(), "confirmed");

    let opted_in = client.opted_in_dinners().await.unwrap();
    assert!(opted_in[0].matches("d9"));
}

#[tokio::test]
async fn test_booking_a_dinner_end_to_end() {
    let (url, backend) = spawn_backend().await;
    let service = BookingService::new(client_for(&url, Some("tok-1")), PriceIds::default());

    let dinner = Dinner {
        id: "d1".to_string(),
        ..Dinner::default()
    };
    let report = service
        .book(dinner.clone(), MealPreference::NonVeg, true)
        .await
        .unwrap();

    assert!(report.succeeded());
    assert_eq!(report.feedback.notice.message(), "Dinner booked successfully!");
    let refreshed = report.refreshed.unwrap();
    assert_eq!(refreshed.bookings.len(), 1);
    assert!(refreshed.opted_in[0].matches("d1"));

    let opt_ins = backend.seen("opt-in");
    assert_eq!(
        opt_ins[0].body,
        json!({"dinner_id": "d1", "budget_category": "standard", "dietary_category": "non-veg"})
    );
    assert_eq!(opt_ins[0].auth.as_deref(), Some("Bearer tok-1"));

    // Second attempt is stopped before reaching the backend
    let err = service
        .book(dinner, MealPreference::Veg, true)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You have already booked this dinner.");
    assert_eq!(backend.seen("opt-in").len(), 1);
}

#[tokio::test]
async fn test_backend_already_opted_in_switches_to_bookings() {
    let (url, _backend) = spawn_backend().await;
    let service = BookingService::new(client_for(&url, Some("tok-1")), PriceIds::default());

    let dinner = Dinner {
        id: "taken".to_string(),
        ..Dinner::default()
    };
    let report = service.book(dinner, MealPreference::Veg, true).await.unwrap();

    assert!(!report.succeeded());
    assert_eq!(
        report.feedback.notice.message(),
        "You have already booked this dinner."
    );
    assert_eq!(report.feedback.switch_to, Some(DashboardTab::Bookings));
    assert!(report.refreshed.is_none());
}

#[tokio::test]
async fn test_other_opt_in_failures_are_reported() {
    let (url, _backend) = spawn_backend().await;
    let client = client_for(&url, Some("tok-1"));

    let err = client
        .opt_in(&OptInRequest::new("broken", MealPreference::Veg))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "Dinner is full");

    let service = BookingService::new(client, PriceIds::default());
    let dinner = Dinner {
        id: "broken".to_string(),
        ..Dinner::default()
    };
    let report = service.book(dinner, MealPreference::Veg, true).await.unwrap();
    assert_eq!(
        report.feedback.notice.message(),
        "Failed to book dinner: Dinner is full"
    );
}

#[tokio::test]
async fn test_checkout_sends_plan_price_id() {
    let (url, backend) = spawn_backend().await;
    let prices = PriceIds::default();
    let service = BookingService::new(client_for(&url, Some("tok-1")), prices.clone());

    let redirect = service.start_checkout(PlanKey::Quarterly).await.unwrap();
    assert_eq!(redirect, "https://pay.example/session/cs_1");

    let calls = backend.seen("checkout");
    assert_eq!(
        calls[0].body,
        json!({"price_id": prices.resolve(PlanKey::Quarterly).unwrap()})
    );
}

#[tokio::test]
async fn test_session_info_encodes_session_id() {
    let (url, _backend) = spawn_backend().await;
    let client = client_for(&url, None);

    let info = client.session_info("cs_1 a").await.unwrap();
    assert!(info.is_active());
    assert_eq!(info.subscription.id, "sub_1");

    let err = client.session_info("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Session not found");
}

#[tokio::test]
async fn test_location_update_saves_city_then_country() {
    let (url, backend) = spawn_backend().await;
    let service = BookingService::new(client_for(&url, Some("tok-1")), PriceIds::default());

    let notice = service.update_location(" Mumbai ", "India").await;
    assert!(!notice.is_error());
    assert_eq!(notice.message(), "Location updated!");

    let saves = backend.seen("journey-save");
    assert_eq!(saves.len(), 2);
    assert_eq!(
        saves[0].body,
        json!({"question_key": "current_city", "answer": "Mumbai", "question": "Current City"})
    );
    assert_eq!(saves[1].body["question_key"], "current_country");

    let notice = service.update_location("Nowhere", "Atlantis").await;
    assert!(notice.is_error());
    assert_eq!(
        notice.message(),
        "Failed to update location: Failed to update current_country: Unknown country"
    );
}
