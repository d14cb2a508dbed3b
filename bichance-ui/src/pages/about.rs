//! About Page

use bichance::content::{ABOUT_HEADLINE, ABOUT_INTRO, VALUES};
use leptos::*;

use crate::components::PublicPage;

#[component]
pub fn About() -> impl IntoView {
    view! {
        <PublicPage>
            <section class="container mx-auto px-4 py-16 max-w-4xl">
                <h1 class="text-4xl font-bold text-red-600 mb-6">{ABOUT_HEADLINE}</h1>
                <p class="text-lg text-gray-700 mb-12">{ABOUT_INTRO}</p>

                <h2 class="text-2xl font-semibold mb-6">"Our values"</h2>
                <div class="grid md:grid-cols-2 gap-6">
                    {VALUES.iter().map(|value| view! {
                        <div class="bg-red-50 rounded-xl p-6">
                            <h3 class="font-semibold text-red-600 mb-2">{value.title}</h3>
                            <p class="text-gray-700">{value.text}</p>
                        </div>
                    }).collect_view()}
                </div>
            </section>
        </PublicPage>
    }
}
