//! Onboarding Journey
//!
//! Identity fields plus the fifteen agree/disagree statements. Every answer
//! is saved on its own, then the journey is submitted.

use bichance::profile::{Journey, PERSONALITY_QUESTIONS};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::InlineLoading;
use crate::state::GlobalState;

#[component]
pub fn Onboarding() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let journey = create_rw_signal(Journey::default());
    let (saving, set_saving) = create_signal(false);

    {
        let navigate = navigate.clone();
        spawn_local(async move {
            if !state.is_authenticated() {
                navigate("/auth", Default::default());
                return;
            }
            if let Some(profile) = state.refresh_profile().await {
                if profile.onboarding_complete {
                    navigate("/dashboard", Default::default());
                }
            }
        });
    }

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let current = journey.get_untracked();
        if !current.is_complete() {
            state.show_error(&format!(
                "Please add your city and country and answer all questions ({} left).",
                current.unanswered()
            ));
            return;
        }

        set_saving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            for answer in current.answers() {
                if let Err(e) = api::save_journey(&answer).await {
                    state.show_error(&e);
                    set_saving.set(false);
                    return;
                }
            }
            if let Err(e) = api::submit_journey().await {
                state.show_error(&e);
                set_saving.set(false);
                return;
            }
            state.refresh_profile().await;
            set_saving.set(false);
            state.show_success("Welcome aboard!");
            navigate("/dashboard", Default::default());
        });
    };

    view! {
        <div class="min-h-screen bg-red-50 py-12 px-4">
            <form on:submit=on_submit class="max-w-2xl mx-auto bg-white rounded-2xl shadow-xl p-8 space-y-8">
                <div>
                    <h1 class="text-3xl font-bold text-red-600">"Tell us more about you"</h1>
                    <p class="text-gray-600">"We use your answers to match you with the right table."</p>
                </div>

                <div class="grid md:grid-cols-2 gap-4">
                    <div>
                        <label class="block text-sm font-medium mb-1">"Current City"</label>
                        <input
                            type="text"
                            prop:value=move || journey.with(|j| j.city.clone())
                            on:input=move |ev| journey.update(|j| j.city = event_target_value(&ev))
                            class="w-full border border-gray-300 rounded px-3 py-2"
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Current Country"</label>
                        <input
                            type="text"
                            prop:value=move || journey.with(|j| j.country.clone())
                            on:input=move |ev| journey.update(|j| j.country = event_target_value(&ev))
                            class="w-full border border-gray-300 rounded px-3 py-2"
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Date of Birth"</label>
                        <input
                            type="date"
                            prop:value=move || journey.with(|j| j.dob.clone())
                            on:input=move |ev| journey.update(|j| j.dob = event_target_value(&ev))
                            class="w-full border border-gray-300 rounded px-3 py-2"
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Gender"</label>
                        <select
                            on:change=move |ev| journey.update(|j| j.gender = event_target_value(&ev))
                            class="w-full border border-gray-300 rounded px-3 py-2"
                        >
                            <option value="">"Select"</option>
                            <option value="female">"Female"</option>
                            <option value="male">"Male"</option>
                            <option value="other">"Other"</option>
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Relationship Status"</label>
                        <select
                            on:change=move |ev| journey.update(|j| j.relationship_status = event_target_value(&ev))
                            class="w-full border border-gray-300 rounded px-3 py-2"
                        >
                            <option value="">"Select"</option>
                            <option value="single">"Single"</option>
                            <option value="in_relationship">"In a relationship"</option>
                            <option value="married">"Married"</option>
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Profession"</label>
                        <input
                            type="text"
                            prop:value=move || journey.with(|j| j.profession.clone())
                            on:input=move |ev| journey.update(|j| j.profession = event_target_value(&ev))
                            class="w-full border border-gray-300 rounded px-3 py-2"
                        />
                    </div>
                    <div class="md:col-span-2">
                        <label class="block text-sm font-medium mb-1">"Do you have children?"</label>
                        <div class="flex gap-3">
                            <ChoiceButton
                                label="Yes"
                                active=Signal::derive(move || journey.with(|j| j.children == Some(true)))
                                on_pick=move || journey.update(|j| j.children = Some(true))
                            />
                            <ChoiceButton
                                label="No"
                                active=Signal::derive(move || journey.with(|j| j.children == Some(false)))
                                on_pick=move || journey.update(|j| j.children = Some(false))
                            />
                        </div>
                    </div>
                </div>

                <div class="space-y-4">
                    <h2 class="text-xl font-semibold">"About your personality"</h2>
                    {PERSONALITY_QUESTIONS.iter().enumerate().map(|(idx, question)| view! {
                        <div class="border border-red-100 rounded-xl p-4">
                            <p class="mb-3">{idx + 1} ". " {*question}</p>
                            <div class="flex gap-3">
                                <ChoiceButton
                                    label="Agree"
                                    active=Signal::derive(move || journey.with(|j| j.personality[idx] == Some(true)))
                                    on_pick=move || journey.update(|j| j.set_personality(idx, true))
                                />
                                <ChoiceButton
                                    label="Disagree"
                                    active=Signal::derive(move || journey.with(|j| j.personality[idx] == Some(false)))
                                    on_pick=move || journey.update(|j| j.set_personality(idx, false))
                                />
                            </div>
                        </div>
                    }).collect_view()}
                </div>

                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="w-full py-3 bg-red-600 hover:bg-red-700 disabled:opacity-50 text-white rounded-lg font-semibold flex items-center justify-center gap-2"
                >
                    <Show when=move || saving.get()>
                        <InlineLoading />
                    </Show>
                    {move || if saving.get() { "Saving..." } else { "Finish" }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn ChoiceButton(
    label: &'static str,
    #[prop(into)] active: Signal<bool>,
    on_pick: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=move |_| on_pick()
            class=move || if active.get() {
                "px-4 py-2 rounded-full bg-red-600 text-white"
            } else {
                "px-4 py-2 rounded-full border border-red-300 text-red-600"
            }
        >
            {label}
        </button>
    }
}
