//! # Bichance
//!
//! Bichance Tables: a social-dining service that seats six strangers,
//! matched by personality, at a restaurant in their city.
//!
//! This crate holds the rules the website and the tools share, plus the
//! native pieces that talk to the remote backend.
//!
//! ## Modules
//!
//! Always available (also compiled into the browser frontend):
//! - [`models`]: Backend records (dinners, bookings, profiles)
//! - [`envelope`]: The `{success, message, data}` response wrapper
//! - [`plans`]: Membership plan catalog and price IDs
//! - [`auth`]: Email/OTP sign-in flow
//! - [`wizard`]: Dashboard booking wizard
//! - [`profile`]: Profile edits and the onboarding journey
//! - [`content`]: Marketing copy
//! - [`endpoints`]: Backend route table
//! - [`session`]: Token storage
//!
//! With the `native` feature:
//! - [`config`]: TOML + environment configuration
//! - [`telemetry`]: Logging setup
//! - [`client`]: HTTP client for the backend
//! - [`booking`]: Booking, checkout and profile orchestration
//! - [`server`]: Web host for the built frontend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bichance::client::BichanceClient;
//! use bichance::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = BichanceClient::new(&config.api)?;
//!
//!     for dinner in client.upcoming_dinners().await? {
//!         println!("{} at {}", dinner.display_date(), dinner.display_time());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod content;
pub mod endpoints;
pub mod envelope;
pub mod models;
pub mod plans;
pub mod profile;
pub mod session;
pub mod wizard;

#[cfg(feature = "native")]
pub mod booking;
#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod server;
#[cfg(feature = "native")]
pub mod telemetry;

// Re-export top-level types for convenience
pub use auth::{OtpFlow, OtpReply, OtpStep, SendOtpRequest, VerifiedLogin, VerifyOtpRequest};
pub use envelope::{ApiEnvelope, ErrorBody};
pub use models::{
    Booking, CheckoutSession, Dinner, OptedInDinner, SubscriptionSessionInfo, TokenPair,
    UserProfile,
};
pub use plans::{MembershipPlan, PlanError, PlanKey, PriceIds, PLANS};
pub use profile::{Journey, JourneyAnswer};
pub use session::Session;
pub use wizard::{
    BookingStep, BookingWizard, DashboardTab, Feedback, MealPreference, Notice, OptInRequest,
    Rejection, WizardOutcome,
};

#[cfg(feature = "native")]
pub use booking::{BookingError, BookingService, DinnerApi};
#[cfg(feature = "native")]
pub use client::{BichanceClient, ClientError, ClientResult};
#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
#[cfg(feature = "native")]
pub use server::{build_router, serve, AppState, ServerError};
