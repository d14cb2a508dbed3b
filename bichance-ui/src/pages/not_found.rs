//! 404 Not Found page

use leptos::*;
use leptos_router::*;

use crate::components::PublicPage;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <PublicPage>
            <NotFoundContent />
        </PublicPage>
    }
}

/// Body of the not-found page, reused for unknown blog posts
#[component]
pub fn NotFoundContent() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🍽️"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-red-600 hover:bg-red-700 text-white rounded-full font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
