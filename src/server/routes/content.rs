//! Content Routes
//!
//! Marketing content and runtime config as JSON.
//!
//! - GET /content/blog - All blog posts
//! - GET /content/blog/:id - One blog post
//! - GET /content/faq - FAQ entries
//! - GET /content/about - About page sections
//! - GET /content/plans - Membership plans
//! - GET /config.json - Public runtime config

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::content::{self, BlogPost, FaqEntry};
use crate::plans::PLANS;
use crate::server::dto::{PlanResponse, PublicConfig};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

pub async fn list_posts() -> Json<&'static [BlogPost]> {
    Json(&content::BLOG_POSTS)
}

pub async fn get_post(Path(id): Path<String>) -> ServerResult<Json<&'static BlogPost>> {
    let number: u32 = id
        .trim()
        .parse()
        .map_err(|_| ServerError::Validation(format!("blog id must be a number, got '{}'", id)))?;
    content::blog_post(number)
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("blog post '{}'", id)))
}

pub async fn faq() -> Json<&'static [FaqEntry]> {
    Json(&content::FAQ)
}

pub async fn about() -> Json<Value> {
    Json(json!({
        "headline": content::ABOUT_HEADLINE,
        "intro": content::ABOUT_INTRO,
        "values": content::VALUES,
        "how_it_works": content::HOW_IT_WORKS,
        "support_email": content::SUPPORT_EMAIL,
    }))
}

pub async fn plans() -> Json<Vec<PlanResponse>> {
    Json(PLANS.iter().map(PlanResponse::from).collect())
}

pub async fn public_config(State(state): State<Arc<AppState>>) -> Json<PublicConfig> {
    Json(PublicConfig {
        api_url: state.api_url.clone(),
        price_ids: state.price_ids.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
