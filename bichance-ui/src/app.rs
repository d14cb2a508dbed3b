//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::Toast;
use crate::pages::{
    About, AdminLogin, Auth, BlogDetail, BlogList, Contact, Dashboard, Faq, Landing, NotFound,
    Onboarding, Pricing, SubscriptionSuccess,
};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    // The web host tells us which backend to use
    spawn_local(async {
        if let Err(e) = api::load_runtime_config().await {
            web_sys::console::warn_1(&format!("Using default backend: {}", e).into());
        }
    });

    view! {
        <Router>
            <div class="min-h-screen bg-white text-gray-900 flex flex-col">
                <Routes>
                    <Route path="/" view=Landing />
                    <Route path="/about" view=About />
                    <Route path="/blog" view=BlogList />
                    <Route path="/blog/:id" view=BlogDetail />
                    <Route path="/pricing" view=Pricing />
                    <Route path="/faq" view=Faq />
                    <Route path="/contact-us" view=Contact />
                    <Route path="/auth" view=Auth />
                    <Route path="/onboarding" view=Onboarding />
                    <Route path="/dashboard" view=Dashboard />
                    <Route path="/subscription/success" view=SubscriptionSuccess />
                    <Route path="/admin/login" view=AdminLogin />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}
