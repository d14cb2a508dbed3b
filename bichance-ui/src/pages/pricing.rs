//! Pricing Page

use bichance::plans::PLANS;
use leptos::*;
use leptos_router::*;

use crate::components::PublicPage;
use crate::state::GlobalState;

#[component]
pub fn Pricing() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let target = move || if state.is_authenticated() { "/dashboard".to_string() } else { "/auth".to_string() };

    view! {
        <PublicPage>
            <section class="container mx-auto px-4 py-16">
                <h1 class="text-4xl font-bold text-red-600 text-center mb-4">"Choose your membership"</h1>
                <p class="text-center text-gray-600 mb-12">"Every plan includes access to all dinners in your city."</p>

                <div class="grid md:grid-cols-3 gap-8">
                    {PLANS.iter().map(|plan| {
                        view! {
                            <div class="rounded-2xl shadow-lg overflow-hidden flex flex-col">
                                <img src=plan.image alt=plan.name class="h-40 w-full object-cover" />
                                <div class="p-6 flex-1 flex flex-col">
                                    <h2 class="text-2xl font-semibold">{plan.name}</h2>
                                    <p class="text-4xl font-bold text-red-600 my-4">{plan.display_price()}</p>
                                    <p class="text-gray-600 mb-4">{plan.description}</p>
                                    <ul class="space-y-2 mb-6 flex-1">
                                        {plan.perks.iter().map(|perk| view! {
                                            <li class="text-sm">"✓ " {*perk}</li>
                                        }).collect_view()}
                                    </ul>
                                    <A href=target class="block text-center px-6 py-3 bg-red-600 hover:bg-red-700 text-white rounded-full font-semibold">
                                        "Get started"
                                    </A>
                                </div>
                            </div>
                        }
                    }).collect_view()}
                </div>
            </section>
        </PublicPage>
    }
}
