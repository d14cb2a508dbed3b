//! Admin Page
//!
//! Password sign-in, then the dinner list and a form to schedule new
//! dinners.

use bichance::models::{Dinner, NewDinner, TokenPair};
use leptos::*;

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::state::GlobalState;

#[component]
pub fn AdminLogin() -> impl IntoView {
    let (signed_in, set_signed_in) = create_signal(false);

    view! {
        <div class="min-h-screen bg-red-50 py-12 px-4">
            {move || if signed_in.get() {
                view! { <AdminPanel /> }.into_view()
            } else {
                view! { <AdminSignIn on_success=move || set_signed_in.set(true) /> }.into_view()
            }}
        </div>
    }
}

#[component]
fn AdminSignIn<F>(on_success: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (busy, set_busy) = create_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        if email.trim().is_empty() || password.is_empty() {
            state.show_error("Please enter email and password.");
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::admin_login(email.trim(), &password).await {
                Ok(session) => match session.access_token {
                    Some(token) => {
                        state.login(
                            TokenPair {
                                access_token: token,
                                refresh_token: None,
                            },
                            email.trim(),
                        );
                        state.show_success("Signed in as admin.");
                        on_success();
                    }
                    None => state.show_error(
                        session.message.as_deref().unwrap_or("Login failed"),
                    ),
                },
                Err(e) => state.show_error(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form on:submit=submit class="max-w-md mx-auto bg-white rounded-2xl shadow-xl p-8 space-y-4">
            <h1 class="text-2xl font-bold text-red-600">"Admin Login"</h1>
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
                class="w-full border border-gray-300 rounded px-4 py-2"
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
                class="w-full border border-gray-300 rounded px-4 py-2"
            />
            <button
                type="submit"
                disabled=move || busy.get()
                class="w-full py-3 bg-red-600 hover:bg-red-700 disabled:opacity-50 text-white rounded font-semibold flex items-center justify-center gap-2"
            >
                <Show when=move || busy.get()>
                    <InlineLoading />
                </Show>
                "Sign In"
            </button>
        </form>
    }
}

#[component]
fn AdminPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let dinners = create_rw_signal(Vec::<Dinner>::new());
    let (loading, set_loading) = create_signal(true);
    let (date, set_date) = create_signal(String::new());
    let (city, set_city) = create_signal(String::new());
    let (country, set_country) = create_signal(String::new());

    let reload = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::admin_list_dinners().await {
                Ok(list) => dinners.set(list),
                Err(e) => state.show_error(&e),
            }
            set_loading.set(false);
        });
    };
    reload();

    let create = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let dinner = NewDinner {
            date: date.get_untracked(),
            city: city.get_untracked().trim().to_string(),
            country: country.get_untracked().trim().to_string(),
        };
        if dinner.date.is_empty() || dinner.city.is_empty() || dinner.country.is_empty() {
            state.show_error("Date, city and country are required.");
            return;
        }
        spawn_local(async move {
            match api::admin_create_dinner(&dinner).await {
                Ok(message) => {
                    state.show_success(message.as_deref().unwrap_or("Dinner created."));
                    set_date.set(String::new());
                    reload();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            <form on:submit=create class="bg-white rounded-2xl shadow p-6 grid md:grid-cols-4 gap-3 items-end">
                <h2 class="md:col-span-4 text-xl font-semibold">"Schedule a dinner"</h2>
                <input
                    type="datetime-local"
                    prop:value=move || date.get()
                    on:input=move |ev| set_date.set(event_target_value(&ev))
                    class="border border-gray-300 rounded px-3 py-2"
                />
                <input
                    type="text"
                    placeholder="City"
                    prop:value=move || city.get()
                    on:input=move |ev| set_city.set(event_target_value(&ev))
                    class="border border-gray-300 rounded px-3 py-2"
                />
                <input
                    type="text"
                    placeholder="Country"
                    prop:value=move || country.get()
                    on:input=move |ev| set_country.set(event_target_value(&ev))
                    class="border border-gray-300 rounded px-3 py-2"
                />
                <button type="submit" class="py-2 bg-red-600 hover:bg-red-700 text-white rounded font-semibold">
                    "Create"
                </button>
            </form>

            <div class="bg-white rounded-2xl shadow p-6">
                <h2 class="text-xl font-semibold mb-4">"All dinners"</h2>
                {move || {
                    if loading.get() {
                        return view! { <Loading label="Loading dinners..." /> }.into_view();
                    }
                    let list = dinners.get();
                    if list.is_empty() {
                        return view! { <p class="text-gray-500">"No dinners scheduled."</p> }.into_view();
                    }
                    view! {
                        <table class="w-full text-sm">
                            <thead>
                                <tr class="text-left text-gray-500">
                                    <th class="py-2">"Date"</th>
                                    <th>"City"</th>
                                    <th>"Country"</th>
                                    <th>"ID"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|dinner| view! {
                                    <tr class="border-t">
                                        <td class="py-2">{dinner.display_date()}</td>
                                        <td>{dinner.city.clone().unwrap_or_default()}</td>
                                        <td>{dinner.country.clone().unwrap_or_default()}</td>
                                        <td class="text-gray-400">{dinner.id.clone()}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view()
                }}
            </div>
        </div>
    }
}
