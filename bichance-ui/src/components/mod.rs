//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod footer;
pub mod layout;
pub mod loading;
pub mod nav;
pub mod toast;

pub use footer::Footer;
pub use layout::PublicPage;
pub use loading::{InlineLoading, Loading, Splash};
pub use nav::Nav;
pub use toast::Toast;
