//! Response bodies served by the web host.

use serde::{Deserialize, Serialize};

use crate::plans::{MembershipPlan, PlanKey, PriceIds};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub frontend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Runtime settings the browser bundle reads at startup
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicConfig {
    pub api_url: String,
    pub price_ids: PriceIds,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub key: PlanKey,
    pub name: String,
    pub price: u32,
    pub display_price: String,
    pub description: String,
    pub perks: Vec<String>,
    pub image: String,
}

impl From<&MembershipPlan> for PlanResponse {
    fn from(plan: &MembershipPlan) -> Self {
        Self {
            key: plan.key,
            name: plan.name.to_string(),
            price: plan.price,
            display_price: plan.display_price(),
            description: plan.description.to_string(),
            perks: plan.perks.iter().map(|p| p.to_string()).collect(),
            image: plan.image.to_string(),
        }
    }
}
