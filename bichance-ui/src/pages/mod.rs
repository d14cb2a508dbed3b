//! Pages
//!
//! Top-level page components for each route.

pub mod about;
pub mod admin;
pub mod auth;
pub mod blog;
pub mod booking;
pub mod contact;
pub mod dashboard;
pub mod faq;
pub mod landing;
pub mod not_found;
pub mod onboarding;
pub mod pricing;
pub mod profile;
pub mod subscription;

pub use about::About;
pub use admin::AdminLogin;
pub use auth::Auth;
pub use blog::{BlogDetail, BlogList};
pub use contact::Contact;
pub use dashboard::Dashboard;
pub use faq::Faq;
pub use landing::Landing;
pub use not_found::NotFound;
pub use onboarding::Onboarding;
pub use pricing::Pricing;
pub use subscription::SubscriptionSuccess;
