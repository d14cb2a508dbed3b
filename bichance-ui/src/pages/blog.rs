//! Blog Pages
//!
//! Post list and post detail. Unknown ids render the not-found view.

use bichance::content::{self, BLOG_POSTS};
use leptos::*;
use leptos_router::*;

use crate::components::PublicPage;
use crate::pages::not_found::NotFoundContent;

#[component]
pub fn BlogList() -> impl IntoView {
    view! {
        <PublicPage>
            <section class="container mx-auto px-4 py-16">
                <h1 class="text-4xl font-bold text-red-600 text-center mb-12">"Blog"</h1>
                <div class="grid md:grid-cols-2 gap-8">
                    {BLOG_POSTS.iter().map(|post| view! {
                        <A href=format!("/blog/{}", post.id) class="block rounded-2xl overflow-hidden shadow hover:shadow-lg transition-shadow">
                            <img src=post.image alt=post.title class="h-56 w-full object-cover" />
                            <div class="p-6">
                                <h2 class="text-xl font-semibold mb-2">{post.title}</h2>
                                <p class="text-gray-600">{post.excerpt}</p>
                            </div>
                        </A>
                    }).collect_view()}
                </div>
            </section>
        </PublicPage>
    }
}

#[component]
pub fn BlogDetail() -> impl IntoView {
    let params = use_params_map();
    let post = move || params.with(|p| p.get("id").and_then(|id| content::blog_post_by_slug(id)));

    view! {
        <PublicPage>
            {move || match post() {
                Some(post) => view! {
                    <article class="container mx-auto px-4 py-16 max-w-3xl">
                        <A href="/blog" class="text-red-600 text-sm">"← All posts"</A>
                        <h1 class="text-4xl font-bold my-6">{post.title}</h1>
                        <img src=post.image alt=post.title class="w-full rounded-2xl mb-8" />
                        <p class="text-lg text-gray-700 leading-relaxed">{post.body}</p>
                    </article>
                }.into_view(),
                None => view! { <NotFoundContent /> }.into_view(),
            }}
        </PublicPage>
    }
}
