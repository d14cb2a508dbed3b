//! Membership Plans
//!
//! The one catalog of subscription plans. Pricing and price IDs used to be
//! copied into several screens; everything now reads from here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription plan identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKey {
    Monthly,
    Quarterly,
    Yearly,
}

impl PlanKey {
    pub const ALL: [PlanKey; 3] = [PlanKey::Monthly, PlanKey::Quarterly, PlanKey::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKey::Monthly => "monthly",
            PlanKey::Quarterly => "quarterly",
            PlanKey::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanKey {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "1m" => Ok(PlanKey::Monthly),
            "quarterly" | "3m" => Ok(PlanKey::Quarterly),
            "yearly" | "12m" | "6m" => Ok(PlanKey::Yearly),
            other => Err(PlanError::UnknownPlan(other.to_string())),
        }
    }
}

/// A plan shown on the pricing page and in the booking wizard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipPlan {
    pub key: PlanKey,
    pub name: &'static str,
    /// Price in whole rupees
    pub price: u32,
    pub description: &'static str,
    pub perks: &'static [&'static str],
    pub image: &'static str,
}

impl MembershipPlan {
    pub fn display_price(&self) -> String {
        format!("₹ {}", self.price)
    }
}

const PERKS: &[&str] = &[
    "Access to exclusive dinners",
    "Personalized matches",
    "Member-only offers",
];

pub static PLANS: [MembershipPlan; 3] = [
    MembershipPlan {
        key: PlanKey::Monthly,
        name: "1 Month",
        price: 1099,
        description: "Perfect for trying out Bichance. Attend all events for a month.",
        perks: PERKS,
        image: "/l1.png",
    },
    MembershipPlan {
        key: PlanKey::Quarterly,
        name: "3 Months",
        price: 2999,
        description: "Best value! Unlimited dinners for 3 months. Meet more people, more often.",
        perks: PERKS,
        image: "/4.jpg",
    },
    MembershipPlan {
        key: PlanKey::Yearly,
        name: "12 Months",
        price: 10550,
        description: "For the true connector. Premium access to all events for a full year.",
        perks: PERKS,
        image: "/5.jpg",
    },
];

pub fn plan(key: PlanKey) -> &'static MembershipPlan {
    match key {
        PlanKey::Monthly => &PLANS[0],
        PlanKey::Quarterly => &PLANS[1],
        PlanKey::Yearly => &PLANS[2],
    }
}

/// Payment-processor price IDs, one per plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceIds {
    pub monthly: String,
    pub quarterly: String,
    pub yearly: String,
}

impl Default for PriceIds {
    fn default() -> Self {
        Self {
            monthly: "price_1RisNDSGp7YEjcqZBloeFYAC".to_string(),
            quarterly: "price_1RisNXSGp7YEjcqZHzL4zJCP".to_string(),
            yearly: "price_1RisO2SGp7YEjcqZDDccoJsl".to_string(),
        }
    }
}

impl PriceIds {
    /// Price ID for a plan. An empty ID means checkout cannot start.
    pub fn resolve(&self, key: PlanKey) -> Result<&str, PlanError> {
        let id = match key {
            PlanKey::Monthly => &self.monthly,
            PlanKey::Quarterly => &self.quarterly,
            PlanKey::Yearly => &self.yearly,
        };
        if id.trim().is_empty() {
            Err(PlanError::MissingPriceId)
        } else {
            Ok(id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("No price_id found for this plan. Please contact support.")]
    MissingPriceId,
}
