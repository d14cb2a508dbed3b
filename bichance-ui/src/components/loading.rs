//! Loading Component
//!
//! Spinners and the dashboard splash screen.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12">
            <div class="loading-spinner w-10 h-10 mb-4" />
            <p class="text-red-800">{label}</p>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

/// Welcome screen shown while the dashboard loads
#[component]
pub fn Splash() -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 bg-red-600 flex flex-col items-center justify-center text-white">
            <img src="/l1.png" alt="bichance logo" class="h-24 mb-6" />
            <h1 class="text-3xl font-bold">"Welcome to Bichance Tables"</h1>
        </div>
    }
}
