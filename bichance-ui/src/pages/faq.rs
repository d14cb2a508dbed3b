//! FAQ Page

use bichance::content::FAQ;
use leptos::*;

use crate::components::PublicPage;

#[component]
pub fn Faq() -> impl IntoView {
    let (open, set_open) = create_signal(None::<usize>);

    view! {
        <PublicPage>
            <section class="container mx-auto px-4 py-16 max-w-3xl">
                <h1 class="text-4xl font-bold text-red-600 text-center mb-12">"Frequently asked questions"</h1>
                <div class="space-y-4">
                    {FAQ.iter().enumerate().map(|(idx, entry)| view! {
                        <div class="border border-red-100 rounded-xl">
                            <button
                                class="w-full text-left px-6 py-4 font-semibold flex justify-between"
                                on:click=move |_| set_open.update(|o| {
                                    *o = if *o == Some(idx) { None } else { Some(idx) };
                                })
                            >
                                {entry.question}
                                <span>{move || if open.get() == Some(idx) { "−" } else { "+" }}</span>
                            </button>
                            <Show when=move || open.get() == Some(idx)>
                                <p class="px-6 pb-4 text-gray-700">{entry.answer}</p>
                            </Show>
                        </div>
                    }).collect_view()}
                </div>
            </section>
        </PublicPage>
    }
}
