//! Checkout Return Page
//!
//! The payment processor redirects here with `?session_id=`.

use bichance::models::SubscriptionSessionInfo;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::session;

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Loading,
    Loaded(SubscriptionSessionInfo),
    Failed,
}

#[component]
pub fn SubscriptionSuccess() -> impl IntoView {
    let query = use_query_map();
    let status = create_rw_signal(Status::Loading);

    let session_id = query.with_untracked(|q| q.get("session_id").cloned());
    match session_id {
        Some(id) if !id.is_empty() => spawn_local(async move {
            match api::session_info(&id).await {
                Ok(info) => {
                    if info.is_active() {
                        if let Some(dinner) = session::take_pending_dinner() {
                            logging::log!("Checkout finished for dinner {}", dinner);
                        }
                    }
                    status.set(Status::Loaded(info));
                }
                Err(e) => {
                    logging::error!("Failed to fetch session info: {}", e);
                    status.set(Status::Failed);
                }
            }
        }),
        _ => status.set(Status::Failed),
    }

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-green-50 px-4">
            <h1 class="text-3xl font-bold text-green-700 mb-4">"Subscription Status"</h1>
            {move || match status.get() {
                Status::Loading => view! {
                    <p class="text-blue-600">"Loading payment status..."</p>
                }.into_view(),
                Status::Loaded(info) => {
                    let headline = if info.is_active() {
                        view! { <p class="text-green-700 font-semibold">"Payment successful! Thank you."</p> }
                    } else {
                        view! { <p class="text-red-600 font-semibold">"Payment failed or not completed."</p> }
                    };
                    view! {
                        {headline}
                        <div class="mt-4 text-sm text-gray-700">
                            <div>"Subscription ID: " {info.subscription.id.clone()}</div>
                            <div>"Status: " {info.subscription.status.clone()}</div>
                            <div>"Current Period End: " {info.period_end().unwrap_or_default()}</div>
                        </div>
                    }.into_view()
                }
                Status::Failed => view! {
                    <p class="text-red-600 font-semibold">"Payment failed or not completed."</p>
                }.into_view(),
            }}
            <A href="/dashboard" class="mt-6 px-6 py-2 bg-green-600 text-white rounded shadow hover:bg-green-700 transition">
                "Go to Dashboard"
            </A>
        </div>
    }
}
