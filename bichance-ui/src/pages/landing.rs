//! Landing Page

use bichance::content::{BLOG_POSTS, HOW_IT_WORKS};
use bichance::plans::PLANS;
use leptos::*;
use leptos_router::*;

use crate::components::PublicPage;
use crate::state::GlobalState;

#[component]
pub fn Landing() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let cta = move || if state.is_authenticated() { "/dashboard".to_string() } else { "/auth".to_string() };

    view! {
        <PublicPage>
            // Hero
            <section class="relative bg-cover bg-center text-white" style="background-image: url('/hero.jpg')">
                <div class="bg-black/50">
                    <div class="container mx-auto px-4 py-32 text-center">
                        <h1 class="text-5xl font-bold mb-4">"Take a chance, have a seat."</h1>
                        <p class="text-xl mb-8">"Dinner with five strangers, matched by personality."</p>
                        <A href=cta class="px-8 py-4 bg-red-600 hover:bg-red-700 rounded-full text-lg font-semibold">
                            "Book your seat"
                        </A>
                    </div>
                </div>
            </section>

            // How it works
            <section class="container mx-auto px-4 py-16">
                <h2 class="text-3xl font-bold text-center text-red-600 mb-12">"How it works"</h2>
                <div class="grid md:grid-cols-5 gap-6">
                    {HOW_IT_WORKS.iter().enumerate().map(|(idx, step)| view! {
                        <div class="text-center">
                            <div class="w-12 h-12 mx-auto mb-4 rounded-full bg-red-600 text-white flex items-center justify-center font-bold">
                                {idx + 1}
                            </div>
                            <h3 class="font-semibold mb-2">{step.title}</h3>
                            <p class="text-gray-600 text-sm">{step.text}</p>
                        </div>
                    }).collect_view()}
                </div>
            </section>

            // Plans teaser
            <section class="bg-red-50 py-16">
                <div class="container mx-auto px-4 text-center">
                    <h2 class="text-3xl font-bold text-red-600 mb-8">"Memberships"</h2>
                    <div class="grid md:grid-cols-3 gap-6 mb-8">
                        {PLANS.iter().map(|plan| view! {
                            <div class="bg-white rounded-2xl shadow p-6">
                                <h3 class="text-xl font-semibold">{plan.name}</h3>
                                <p class="text-3xl font-bold text-red-600 my-2">{plan.display_price()}</p>
                            </div>
                        }).collect_view()}
                    </div>
                    <A href="/pricing" class="text-red-600 font-semibold underline">"See all plan details"</A>
                </div>
            </section>

            // Stories
            <section class="container mx-auto px-4 py-16">
                <h2 class="text-3xl font-bold text-center text-red-600 mb-8">"Stories from the table"</h2>
                <div class="grid md:grid-cols-4 gap-6">
                    {BLOG_POSTS.iter().map(|post| view! {
                        <A href=format!("/blog/{}", post.id) class="block rounded-xl overflow-hidden shadow hover:shadow-lg">
                            <img src=post.image alt=post.title class="h-40 w-full object-cover" />
                            <div class="p-4 font-semibold">{post.title}</div>
                        </A>
                    }).collect_view()}
                </div>
            </section>
        </PublicPage>
    }
}
