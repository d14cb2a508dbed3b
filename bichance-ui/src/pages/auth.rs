//! Sign-in Page
//!
//! Two-step email OTP. The flow rules live in `bichance::auth::OtpFlow`;
//! this page only renders it and runs the requests.

use bichance::auth::{OtpFlow, OtpStep, DASHBOARD_PATH};
use gloo_timers::callback::Interval;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::GlobalState;

#[component]
pub fn Auth() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let flow = create_rw_signal(OtpFlow::new());

    {
        let navigate = navigate.clone();
        create_effect(move |_| {
            if state.is_authenticated() {
                navigate(DASHBOARD_PATH, Default::default());
            }
        });
    }

    // Rate-limit countdown
    let ticker = Interval::new(1000, move || {
        if flow.with_untracked(|f| f.cooldown > 0) {
            flow.update(|f| {
                f.tick();
            });
        }
    });
    on_cleanup(move || drop(ticker));

    let on_send = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = flow.try_update(|f| f.begin_send()).flatten() else {
            return;
        };
        spawn_local(async move {
            let reply = api::send_otp(&request).await;
            flow.update(|f| f.finish_send(reply));
        });
    };

    let on_verify = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = flow.try_update(|f| f.begin_verify()).flatten() else {
            return;
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            let reply = api::verify_otp(&request).await;
            let Some(login) = flow.try_update(|f| f.finish_verify(reply)).flatten() else {
                return;
            };
            match login.tokens {
                Some(tokens) => state.login(tokens, &login.email),
                None => web_sys::console::warn_1(&"Login response carried no access token".into()),
            }
            navigate(login.redirect_to, Default::default());
        });
    };

    let step = move || flow.with(|f| f.step);
    let loading = move || flow.with(|f| f.loading);

    view! {
        <div class="min-h-screen flex items-center justify-center bg-red-50 px-4">
            <div class="w-full max-w-md bg-white rounded-2xl shadow-xl p-8">
                <A href="/" class="block text-center text-2xl font-bold text-red-600 mb-2">"bichance"</A>
                <h1 class="text-xl font-semibold text-center mb-6">
                    {move || match step() {
                        OtpStep::Email => "Sign in or create an account",
                        OtpStep::Otp => "Enter the code we emailed you",
                    }}
                </h1>

                {move || flow.with(|f| f.error.clone()).map(|msg| view! {
                    <div class="mb-4 p-3 rounded bg-red-100 text-red-700 text-sm">{msg}</div>
                })}
                {move || flow.with(|f| f.success.clone()).map(|msg| view! {
                    <div class="mb-4 p-3 rounded bg-green-100 text-green-700 text-sm">{msg}</div>
                })}

                {move || match step() {
                    OtpStep::Email => view! {
                        <form on:submit=on_send class="space-y-4">
                            <input
                                type="email"
                                placeholder="you@example.com"
                                prop:value=move || flow.with(|f| f.email.clone())
                                on:input=move |ev| flow.update(|f| f.email = event_target_value(&ev))
                                class="w-full border border-gray-300 rounded-lg px-4 py-3"
                            />
                            <button
                                type="submit"
                                disabled=move || loading() || flow.with(|f| f.cooldown > 0)
                                class="w-full py-3 bg-red-600 hover:bg-red-700 disabled:opacity-50 text-white rounded-lg font-semibold"
                            >
                                {move || flow.with(OtpFlow::send_label)}
                            </button>
                        </form>
                    }.into_view(),
                    OtpStep::Otp => view! {
                        <form on:submit=on_verify.clone() class="space-y-4">
                            <p class="text-sm text-gray-600 text-center">
                                {move || flow.with(|f| f.email.clone())}
                            </p>
                            <input
                                type="text"
                                inputmode="numeric"
                                maxlength="6"
                                placeholder="123456"
                                prop:value=move || flow.with(|f| f.otp.clone())
                                on:input=move |ev| flow.update(|f| f.otp = event_target_value(&ev))
                                class="w-full border border-gray-300 rounded-lg px-4 py-3 text-center tracking-widest text-lg"
                            />
                            <button
                                type="submit"
                                disabled=loading
                                class="w-full py-3 bg-red-600 hover:bg-red-700 disabled:opacity-50 text-white rounded-lg font-semibold"
                            >
                                {move || flow.with(OtpFlow::verify_label)}
                            </button>
                            <button
                                type="button"
                                on:click=move |_| flow.update(OtpFlow::change_email)
                                class="w-full text-sm text-red-600 underline"
                            >
                                "Change Email"
                            </button>
                        </form>
                    }.into_view(),
                }}
            </div>
        </div>
    }
}
