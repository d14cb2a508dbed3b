//! Global Application State
//!
//! Reactive state management using Leptos signals. Holds the copy of the
//! session every page reads its token from.

use bichance::models::{TokenPair, UserProfile};
use bichance::session::Session;
use leptos::*;

use crate::api;
use crate::state::session;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Token pair and email, mirrored from `localStorage`
    pub session: RwSignal<Session>,
    /// Last profile fetched from the backend
    pub profile: RwSignal<Option<UserProfile>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(session::load()),
        profile: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    /// Persist a fresh token pair
    pub fn login(&self, tokens: TokenPair, email: &str) {
        if let Err(e) = session::store_login(&tokens, email) {
            web_sys::console::warn_1(&e.into());
        }
        self.session.update(|s| s.login(tokens, email));
    }

    /// Drop the token, the profile and everything in storage
    pub fn logout(&self) {
        session::clear();
        self.session.update(Session::logout);
        self.profile.set(None);
    }

    /// Fetch `/users/me`. A rejected token signs the member out; a network
    /// failure keeps the session.
    pub async fn refresh_profile(&self) -> Option<UserProfile> {
        if !self.is_authenticated() {
            return None;
        }
        match api::fetch_me().await {
            Ok(profile) => {
                self.profile.set(Some(profile.clone()));
                Some(profile)
            }
            Err(api::MeError::Rejected(message)) => {
                web_sys::console::warn_1(&format!("Session rejected: {}", message).into());
                self.logout();
                None
            }
            Err(api::MeError::Network(message)) | Err(api::MeError::Unreadable(message)) => {
                web_sys::console::error_1(&format!("Failed to fetch profile: {}", message).into());
                None
            }
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }

    /// Toast for a booking or profile notice
    pub fn show_notice(&self, notice: &bichance::wizard::Notice) {
        if notice.is_error() {
            self.show_error(notice.message());
        } else {
            self.show_success(notice.message());
        }
    }
}
