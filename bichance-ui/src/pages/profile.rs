//! Profile Tab
//!
//! Member card, profile editing, help and account actions.

use bichance::content::{HOW_IT_WORKS, SUPPORT_EMAIL};
use bichance::models::{Booking, UserProfile};
use bichance::profile;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::Loading;
use crate::state::GlobalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Overview,
    Edit,
    Help,
    Guide,
    Delete,
}

#[component]
pub fn ProfileTab<F>(bookings: RwSignal<Vec<Booking>>, on_bookings: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let panel = create_rw_signal(Panel::Overview);

    let sign_out = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                web_sys::console::warn_1(&format!("Logout request failed: {}", e).into());
            }
            state.logout();
            navigate("/", Default::default());
        });
    };

    view! {
        {move || match state.profile.get() {
            None => view! { <Loading label="Loading profile..." /> }.into_view(),
            Some(member) => view! { <ProfileCard member=member /> }.into_view(),
        }}

        {move || match panel.get() {
            Panel::Overview => ().into_view(),
            Panel::Edit => view! { <EditProfile panel=panel /> }.into_view(),
            Panel::Help => view! {
                <div class="bg-white rounded-xl shadow p-6 mb-4">
                    <h3 class="font-semibold mb-2">"Help"</h3>
                    <p class="text-gray-600">
                        "Questions about a dinner or your membership? Write to "
                        <a href=format!("mailto:{}", SUPPORT_EMAIL) class="text-red-600 underline">{SUPPORT_EMAIL}</a>
                        "."
                    </p>
                </div>
            }.into_view(),
            Panel::Guide => view! {
                <div class="bg-white rounded-xl shadow p-6 mb-4 space-y-3">
                    <h3 class="font-semibold">"Guide"</h3>
                    {HOW_IT_WORKS.iter().map(|step| view! {
                        <div>
                            <div class="font-medium">{step.title}</div>
                            <div class="text-sm text-gray-600">{step.text}</div>
                        </div>
                    }).collect_view()}
                </div>
            }.into_view(),
            Panel::Delete => view! { <DeleteAccount panel=panel /> }.into_view(),
        }}

        <div class="bg-white rounded-xl shadow divide-y">
            <MenuRow label="Edit profile" on_pick=move || panel.set(Panel::Edit) />
            <MenuRow
                label=Signal::derive(move || format!("My bookings ({})", bookings.with(Vec::len)))
                on_pick=on_bookings
            />
            <MenuRow label="Help" on_pick=move || panel.set(Panel::Help) />
            <MenuRow label="Guide" on_pick=move || panel.set(Panel::Guide) />
            <MenuRow label="Delete account" on_pick=move || panel.set(Panel::Delete) />
            <button on:click=sign_out class="w-full text-left px-6 py-4 text-red-600 font-semibold">
                "Logout"
            </button>
        </div>
    }
}

#[component]
fn ProfileCard(member: UserProfile) -> impl IntoView {
    let image = profile::city_image(member.display_city());
    let location = profile::location_label(&member);
    let subscription = if member.has_active_subscription() {
        "Active membership"
    } else {
        "No active membership"
    };

    view! {
        <div class="bg-white rounded-2xl shadow overflow-hidden mb-4">
            <img src=image alt="City" class="h-32 w-full object-cover" />
            <div class="p-6">
                <div class="text-xl font-semibold">{member.name.clone().unwrap_or_else(|| member.email.clone())}</div>
                <div class="text-sm text-gray-500">{member.email.clone()}</div>
                <div class="text-sm text-gray-500 mt-1">{location}</div>
                <div class="mt-3 inline-block text-xs px-3 py-1 rounded-full bg-red-100 text-red-700">
                    {subscription}
                </div>
            </div>
        </div>
    }
}

#[component]
fn MenuRow<F>(#[prop(into)] label: MaybeSignal<String>, on_pick: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button on:click=move |_| on_pick() class="w-full flex justify-between px-6 py-4 hover:bg-red-50">
            <span>{move || label.get()}</span>
            <span class="text-gray-400">"›"</span>
        </button>
    }
}

/// Edits a copy of the profile and saves only what changed
#[component]
fn EditProfile(panel: RwSignal<Panel>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let draft = create_rw_signal(state.profile.get_untracked().unwrap_or_default());
    let (saving, set_saving) = create_signal(false);

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(original) = state.profile.get_untracked() else {
            return;
        };
        let edited = draft.get_untracked();
        let answers = profile::diff(&original, &edited);
        if answers.is_empty() {
            panel.set(Panel::Overview);
            return;
        }

        set_saving.set(true);
        spawn_local(async move {
            let mut failure = None;
            for answer in &answers {
                if let Err(e) = api::save_journey(answer).await {
                    failure = Some(e);
                    break;
                }
            }
            set_saving.set(false);
            match failure {
                None => {
                    state.profile.set(Some(edited));
                    panel.set(Panel::Overview);
                    state.show_success("Profile updated successfully!");
                }
                Some(e) => state.show_error(&format!("Failed to update profile: {}", e)),
            }
        });
    };

    let text_input = move |label: &'static str, get: fn(&UserProfile) -> Option<String>, set: fn(&mut UserProfile, String)| {
        view! {
            <div>
                <label class="block text-sm font-medium mb-1">{label}</label>
                <input
                    type="text"
                    prop:value=move || draft.with(|p| get(p).unwrap_or_default())
                    on:input=move |ev| draft.update(|p| set(p, event_target_value(&ev)))
                    class="w-full border border-gray-300 rounded px-3 py-2"
                />
            </div>
        }
    };

    view! {
        <form on:submit=save class="bg-white rounded-xl shadow p-6 mb-4 space-y-4">
            <h3 class="font-semibold">"Edit profile"</h3>
            {text_input("City", |p| p.city.clone(), |p, v| p.city = Some(v))}
            {text_input("Country", |p| p.country.clone(), |p, v| p.country = Some(v))}
            {text_input("Date of Birth", |p| p.dob.clone(), |p, v| p.dob = Some(v))}
            {text_input("Gender", |p| p.gender.clone(), |p, v| p.gender = Some(v))}
            {text_input("Relationship Status", |p| p.relationship_status.clone(), |p, v| p.relationship_status = Some(v))}
            {text_input("Profession", |p| p.profession.clone(), |p, v| p.profession = Some(v))}
            <label class="flex items-center gap-2">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|p| p.children.unwrap_or(false))
                    on:change=move |ev| draft.update(|p| p.children = Some(event_target_checked(&ev)))
                />
                "I have children"
            </label>
            <div class="flex gap-3 justify-end">
                <button type="button" on:click=move |_| panel.set(Panel::Overview) class="px-4 py-2 text-gray-600">
                    "Cancel"
                </button>
                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="px-4 py-2 bg-red-600 text-white rounded disabled:opacity-50"
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </form>
    }
}

/// Deleting only signs out locally; the backend has no delete endpoint
#[component]
fn DeleteAccount(panel: RwSignal<Panel>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let confirm = move |_| {
        state.logout();
        state.show_success("Your account data was removed from this device.");
        navigate("/", Default::default());
    };

    view! {
        <div class="bg-white rounded-xl shadow p-6 mb-4">
            <h3 class="font-semibold text-red-600 mb-2">"Delete account"</h3>
            <p class="text-gray-600 mb-4">"This signs you out and removes your data from this device."</p>
            <div class="flex gap-3 justify-end">
                <button on:click=move |_| panel.set(Panel::Overview) class="px-4 py-2 text-gray-600">"Cancel"</button>
                <button on:click=confirm class="px-4 py-2 bg-red-600 text-white rounded">"Delete"</button>
            </div>
        </div>
    }
}
