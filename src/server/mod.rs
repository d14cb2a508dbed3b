//! Bichance Web Host
//!
//! Serves the compiled frontend and the public JSON it reads, built with Axum.
//!
//! # Endpoints
//!
//! ## Content
//! - `GET /content/blog` - Blog posts
//! - `GET /content/blog/:id` - One blog post
//! - `GET /content/faq` - FAQ
//! - `GET /content/about` - About page
//! - `GET /content/plans` - Membership plans
//! - `GET /config.json` - Runtime config for the browser bundle
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Everything else is a static file from the frontend build, falling back
//! to `index.html` so client-side routes like `/dashboard` resolve.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// CORS policy: permissive unless origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let content_routes = Router::new()
        .route("/blog", get(routes::content::list_posts))
        .route("/blog/:id", get(routes::content::get_post))
        .route("/faq", get(routes::content::faq))
        .route("/about", get(routes::content::about))
        .route("/plans", get(routes::content::plans));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let spa = ServeDir::new(&state.static_dir).fallback(ServeFile::new(state.index_file()));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/content", content_routes)
        .nest("/health", health_routes)
        .route("/config.json", get(routes::content::public_config))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(shared_state)
}

/// Start the web host
pub async fn serve(state: AppState, addr: &str, cors_origins: &[String]) -> Result<(), ServerError> {
    if !state.frontend_present() {
        tracing::warn!(
            "No frontend build at {:?}; only JSON routes will answer",
            state.static_dir
        );
    }

    let router = build_router(state, cors_origins);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Bichance web host listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Bichance web host shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    use crate::config::Config;
    use crate::plans::PriceIds;

    fn create_test_app() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "<html><body>bichance-app</body></html>",
        )
        .unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();

        let state = AppState::new("https://backend.example", dir.path());
        (build_router(state, &[]), dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let (status, _) = get(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_with_frontend() {
        let (app, _dir) = create_test_app();
        let (status, _) = get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: dto::HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_blog_list_and_detail() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app.clone(), "/content/blog").await;
        assert_eq!(status, StatusCode::OK);
        let posts: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(posts.as_array().unwrap().len(), 4);

        let (status, body) = get(app, "/content/blog/3").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Finding community"));
    }

    #[tokio::test]
    async fn test_unknown_blog_post_is_json_404() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/content/blog/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(err["error"]["code"], "NOT_FOUND");
        assert!(err["request_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_non_numeric_blog_id_is_rejected() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/content/blog/latest").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_plans_and_faq() {
        let (app, _dir) = create_test_app();
        let (_, body) = get(app.clone(), "/content/plans").await;
        let plans: Vec<dto::PlanResponse> = serde_json::from_str(&body).unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[2].display_price, "₹ 10550");

        let (status, body) = get(app, "/content/faq").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("How does Bichance work?"));
    }

    #[tokio::test]
    async fn test_public_config() {
        let (app, _dir) = create_test_app();
        let (_, body) = get(app, "/config.json").await;
        let config: dto::PublicConfig = serde_json::from_str(&body).unwrap();
        assert_eq!(config.api_url, "https://backend.example");
        assert_eq!(config.price_ids, PriceIds::default());
    }

    #[tokio::test]
    async fn test_public_config_carries_configured_price_ids() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.api.base_url = "https://backend.example".to_string();
        config.server.static_dir = dir.path().to_string_lossy().to_string();
        config.plans.yearly = "price_yearly_override".to_string();

        let app = build_router(AppState::from_config(&config), &[]);
        let (status, body) = get(app, "/config.json").await;
        assert_eq!(status, StatusCode::OK);

        let public: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(public["price_ids"]["yearly"], "price_yearly_override");
        assert_eq!(public["price_ids"]["monthly"], PriceIds::default().monthly);
        assert_eq!(public["api_url"], "https://backend.example");
    }

    #[tokio::test]
    async fn test_static_files_and_spa_fallback() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app.clone(), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("console.log"));

        let (status, body) = get(app, "/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("bichance-app"));
    }
}
