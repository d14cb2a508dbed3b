//! Toast Component
//!
//! Top-right notices for booking, profile and sign-in results. Each one
//! clears itself (see `GlobalState::show_success`) or on click.

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm">
            {move || state.success.get().map(|message| view! {
                <Notice message=message tone="bg-green-600" mark="✓" slot=state.success />
            })}
            {move || state.error.get().map(|message| view! {
                <Notice message=message tone="bg-red-700" mark="!" slot=state.error />
            })}
        </div>
    }
}

#[component]
fn Notice(
    message: String,
    tone: &'static str,
    mark: &'static str,
    slot: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div
            role="status"
            class=format!("{} text-white rounded-xl shadow-lg px-4 py-3 flex items-start gap-3", tone)
        >
            <span class="font-bold">{mark}</span>
            <span class="flex-1 text-sm">{message}</span>
            <button
                aria-label="Dismiss"
                class="text-white/80 hover:text-white"
                on:click=move |_| slot.set(None)
            >
                "×"
            </button>
        </div>
    }
}
