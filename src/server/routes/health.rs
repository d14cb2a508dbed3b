//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (frontend build is present)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Not ready until there is a frontend to serve.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.frontend_present() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let frontend_ok = state.frontend_present();

    Json(HealthResponse {
        status: if frontend_ok { "healthy" } else { "degraded" }.to_string(),
        frontend: if frontend_ok { "ok" } else { "missing" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_frontend_is_degraded() {
        let state = Arc::new(AppState::new("http://api", "/nonexistent/bichance-dist"));
        assert_eq!(
            readiness(State(state.clone())).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.frontend, "missing");
    }
}
