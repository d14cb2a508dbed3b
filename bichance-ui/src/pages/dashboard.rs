//! Member Dashboard
//!
//! Splash, then four tabs: the booking wizard, bookings, notifications and
//! the profile. Leaving the Home tab resets the wizard.

use bichance::models::{Booking, Dinner};
use bichance::wizard::{BookingWizard, DashboardTab};
use gloo_timers::callback::Timeout;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Loading, Splash};
use crate::pages::booking::BookingHome;
use crate::pages::profile::ProfileTab;
use crate::state::GlobalState;

const SPLASH_MS: u32 = 2000;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let tab = create_rw_signal(DashboardTab::Home);
    let wizard = create_rw_signal(BookingWizard::default());
    let dinners = create_rw_signal(Vec::<Dinner>::new());
    let bookings = create_rw_signal(Vec::<Booking>::new());
    let (dinners_loading, set_dinners_loading) = create_signal(true);
    let (bookings_loading, set_bookings_loading) = create_signal(false);
    let (splash, set_splash) = create_signal(true);

    Timeout::new(SPLASH_MS, move || set_splash.set(false)).forget();

    // Signed out (or token rejected) means back to sign-in
    create_effect(move |_| {
        if !state.is_authenticated() {
            navigate("/auth", Default::default());
        }
    });

    spawn_local(async move {
        if let Some(profile) = state.refresh_profile().await {
            wizard.update(|w| w.set_active_subscription(profile.has_active_subscription()));
        }
    });

    spawn_local(async move {
        match api::opted_in_dinners().await {
            Ok(list) => wizard.update(|w| w.load_opted_in(list)),
            Err(e) => web_sys::console::warn_1(&format!("Failed to fetch opted-in dinners: {}", e).into()),
        }
    });

    spawn_local(async move {
        match api::upcoming_dinners().await {
            Ok(list) => dinners.set(list),
            Err(e) => state.show_error(&e),
        }
        set_dinners_loading.set(false);
    });

    // Bookings load whenever their tab opens
    create_effect(move |_| {
        if tab.get() != DashboardTab::Bookings {
            return;
        }
        set_bookings_loading.set(true);
        spawn_local(async move {
            match api::my_bookings().await {
                Ok(list) => bookings.set(list),
                Err(e) => state.show_error(&e),
            }
            set_bookings_loading.set(false);
        });
    });

    let switch_tab = move |next: DashboardTab| {
        wizard.update(|w| w.tab_changed(next));
        tab.set(next);
    };

    view! {
        <Show when=move || splash.get()>
            <Splash />
        </Show>

        <div class="min-h-screen bg-red-50 pb-24">
            <header class="bg-white shadow-sm">
                <div class="container mx-auto px-4 h-16 flex items-center justify-between">
                    <A href="/">
                        <img src="/l1.png" alt="bichance logo" class="h-10" />
                    </A>
                    <span class="text-sm text-gray-600">
                        {move || state.session.with(|s| s.email.clone().unwrap_or_default())}
                    </span>
                </div>
            </header>

            <main class="container mx-auto px-4 py-6">
                {move || match tab.get() {
                    DashboardTab::Home => view! {
                        <BookingHome wizard=wizard tab=tab dinners=dinners loading=dinners_loading />
                    }.into_view(),
                    DashboardTab::Bookings => view! {
                        <BookingsTab bookings=bookings loading=bookings_loading />
                    }.into_view(),
                    DashboardTab::Notifications => view! {
                        <p class="text-center text-gray-500 py-16">"No notifications yet."</p>
                    }.into_view(),
                    DashboardTab::Profile => view! {
                        <ProfileTab bookings=bookings on_bookings=move || switch_tab(DashboardTab::Bookings) />
                    }.into_view(),
                }}
            </main>

            <nav class="fixed bottom-0 inset-x-0 bg-white border-t border-red-100">
                <div class="flex justify-around h-16">
                    {DashboardTab::ALL.into_iter().map(|item| view! {
                        <button
                            class=move || if tab.get() == item {
                                "flex-1 text-red-600 font-semibold"
                            } else {
                                "flex-1 text-gray-500"
                            }
                            on:click=move |_| switch_tab(item)
                        >
                            {item.label()}
                        </button>
                    }).collect_view()}
                </div>
            </nav>
        </div>
    }
}

#[component]
fn BookingsTab(bookings: RwSignal<Vec<Booking>>, loading: ReadSignal<bool>) -> impl IntoView {
    view! {
        <h2 class="text-2xl font-bold mb-4">"My bookings"</h2>
        {move || {
            if loading.get() {
                return view! { <Loading label="Loading bookings..." /> }.into_view();
            }
            let list = bookings.get();
            if list.is_empty() {
                return view! {
                    <p class="text-center text-gray-500 py-8">"No bookings yet."</p>
                }.into_view();
            }
            list.into_iter().map(|booking| view! {
                <div class="bg-white rounded-xl shadow p-4 mb-3 flex justify-between items-center">
                    <div>
                        <div class="font-semibold">{booking.display_date()}</div>
                        <div class="text-xs text-gray-400">"#" {booking.display_id().to_string()}</div>
                    </div>
                    <span class="text-xs px-3 py-1 rounded-full bg-red-100 text-red-700 capitalize">
                        {booking.display_status().to_string()}
                    </span>
                </div>
            }).collect_view()
        }}
    }
}
