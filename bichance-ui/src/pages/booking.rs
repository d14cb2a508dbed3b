//! Booking Wizard View
//!
//! Home tab of the dashboard. Renders whatever step the shared
//! `BookingWizard` is on and performs the opt-in and checkout requests it
//! asks for.

use bichance::models::Dinner;
use bichance::plans::{PlanKey, PLANS};
use bichance::profile;
use bichance::wizard::{
    BookingStep, BookingWizard, DashboardTab, MealPreference, WizardOutcome, SUCCESS_SCREEN_MS,
};
use gloo_timers::callback::Timeout;
use leptos::*;

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::state::{session, GlobalState};

/// Apply what a wizard transition asked for
fn handle(
    state: GlobalState,
    wizard: RwSignal<BookingWizard>,
    tab: RwSignal<DashboardTab>,
    timer: StoredValue<Option<Timeout>>,
    outcome: WizardOutcome,
) {
    match outcome {
        WizardOutcome::Moved(BookingStep::Success) => schedule_success(wizard, timer),
        WizardOutcome::Moved(_) | WizardOutcome::Ignored => {}
        WizardOutcome::Rejected(reason) => state.show_error(&reason.to_string()),
        WizardOutcome::Command(request) => {
            spawn_local(async move {
                let result = api::opt_in(&request).await;
                let Some(feedback) = wizard.try_update(|w| match &result {
                    Ok(()) => w.opt_in_succeeded(),
                    Err(message) => w.opt_in_failed(message),
                }) else {
                    return;
                };
                state.show_notice(&feedback.notice);

                if let Some(next) = feedback.switch_to {
                    wizard.update(|w| w.tab_changed(next));
                    tab.set(next);
                } else if wizard.with_untracked(|w| w.step == BookingStep::Success) {
                    schedule_success(wizard, timer);
                }

                if result.is_ok() {
                    match api::opted_in_dinners().await {
                        Ok(list) => wizard.update(|w| w.opted_in = list),
                        Err(e) => web_sys::console::warn_1(&e.into()),
                    }
                }
            });
        }
    }
}

/// Success screen moves on to Manage after a short pause. Replacing or
/// dropping the stored handle cancels the pending move.
fn schedule_success(wizard: RwSignal<BookingWizard>, timer: StoredValue<Option<Timeout>>) {
    let pending = Timeout::new(SUCCESS_SCREEN_MS, move || {
        wizard.update(|w| {
            w.success_elapsed();
        });
    });
    timer.set_value(Some(pending));
}

#[component]
pub fn BookingHome(
    wizard: RwSignal<BookingWizard>,
    tab: RwSignal<DashboardTab>,
    dinners: RwSignal<Vec<Dinner>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let step = create_memo(move |_| wizard.with(|w| w.step));
    let timer = store_value(None::<Timeout>);
    create_effect(move |_| {
        if step.get() != BookingStep::Success {
            timer.set_value(None);
        }
    });
    let run = move |outcome: WizardOutcome| handle(state, wizard, tab, timer, outcome);

    view! {
        <div class="max-w-2xl mx-auto">
            <Show when=move || !matches!(step.get(), BookingStep::Dinner | BookingStep::Manage)>
                <button
                    class="mb-4 text-red-600 font-semibold"
                    on:click=move |_| run(wizard.try_update(|w| w.back()).unwrap_or(WizardOutcome::Ignored))
                >
                    "← Back"
                </button>
            </Show>

            {move || match step.get() {
                BookingStep::Dinner => view! { <DinnerStep wizard=wizard dinners=dinners loading=loading run=run /> }.into_view(),
                BookingStep::Plan => view! { <PlanStep wizard=wizard /> }.into_view(),
                BookingStep::Meal => view! { <MealStep wizard=wizard run=run /> }.into_view(),
                BookingStep::Membership => view! { <MembershipStep wizard=wizard run=run /> }.into_view(),
                BookingStep::Payment => view! { <PaymentStep wizard=wizard run=run /> }.into_view(),
                BookingStep::Success => view! { <SuccessStep /> }.into_view(),
                BookingStep::Manage => view! { <ManageStep wizard=wizard run=run /> }.into_view(),
                BookingStep::Confirmed => view! { <ConfirmedStep wizard=wizard run=run /> }.into_view(),
            }}
        </div>
    }
}

// ============ Dinner ============

#[component]
fn DinnerStep<F>(
    wizard: RwSignal<BookingWizard>,
    dinners: RwSignal<Vec<Dinner>>,
    loading: Signal<bool>,
    run: F,
) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
{
    view! {
        <LocationCard />
        <h2 class="text-2xl font-bold mb-4">"Pick your dining date"</h2>
        {move || {
            if loading.get() {
                return view! { <Loading label="Loading dinners..." /> }.into_view();
            }
            let list = dinners.get();
            if list.is_empty() {
                return view! {
                    <p class="text-gray-500 text-center py-8">"No upcoming dinners in your city yet."</p>
                }.into_view();
            }
            list.into_iter().map(|dinner| {
                let booked = wizard.with(|w| w.is_opted_in(&dinner.id));
                let date = dinner.display_date();
                let time = dinner.display_time().to_string();
                let city = dinner.city.clone().unwrap_or_default();
                view! {
                    <button
                        class="w-full flex justify-between items-center bg-white rounded-xl shadow p-4 mb-3 hover:shadow-lg text-left"
                        on:click=move |_| {
                            let dinner = dinner.clone();
                            run(wizard.try_update(|w| w.select_dinner(dinner)).unwrap_or(WizardOutcome::Ignored));
                        }
                    >
                        <div>
                            <div class="font-semibold">{date}</div>
                            <div class="text-sm text-gray-500">{time} " · " {city}</div>
                        </div>
                        {if booked {
                            view! { <span class="text-xs px-3 py-1 rounded-full bg-green-100 text-green-700">"Booked"</span> }.into_view()
                        } else {
                            view! { <span class="text-red-600">"›"</span> }.into_view()
                        }}
                    </button>
                }
            }).collect_view()
        }}
    }
}

/// Current location with a change dialog
#[component]
fn LocationCard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (editing, set_editing) = create_signal(false);
    let (city, set_city) = create_signal(String::new());
    let (country, set_country) = create_signal(String::new());
    let (saving, set_saving) = create_signal(false);

    let open = move |_| {
        state.profile.with_untracked(|p| {
            set_city.set(p.as_ref().and_then(|p| p.display_city()).unwrap_or_default().to_string());
            set_country.set(p.as_ref().and_then(|p| p.display_country()).unwrap_or_default().to_string());
        });
        set_editing.set(true);
    };

    let save = move |_| {
        let (new_city, new_country) = (city.get_untracked(), country.get_untracked());
        if new_city.trim().is_empty() || new_country.trim().is_empty() {
            state.show_error("Please enter both city and country.");
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            let mut result = Ok(());
            for answer in profile::location_update(&new_city, &new_country) {
                if let Err(e) = api::save_journey(&answer).await {
                    result = Err(e);
                    break;
                }
            }
            set_saving.set(false);
            match result {
                Ok(()) => {
                    state.profile.update(|p| {
                        if let Some(p) = p {
                            profile::apply_location(p, &new_city, &new_country);
                        }
                    });
                    set_editing.set(false);
                    state.show_success("Location updated!");
                }
                Err(e) => state.show_error(&format!("Failed to update location: {}", e)),
            }
        });
    };

    view! {
        <div class="relative rounded-2xl overflow-hidden shadow mb-6">
            <img
                src=move || state.profile.with(|p| profile::city_image(p.as_ref().and_then(|p| p.display_city())))
                alt="Location"
                class="h-40 w-full object-cover"
            />
            <div class="absolute inset-0 bg-black/40 flex items-end justify-between p-4 text-white">
                <div>
                    <div class="text-2xl font-bold">
                        {move || state.profile.with(|p| {
                            p.as_ref().and_then(|p| p.display_city()).unwrap_or("CITY").to_uppercase()
                        })}
                    </div>
                    <div class="text-sm">
                        {move || state.profile.with(|p| p.as_ref().map(profile::location_label).unwrap_or_else(|| "COUNTRY".into()))}
                    </div>
                </div>
                <button on:click=open class="text-sm underline">"Change"</button>
            </div>
        </div>

        <Show when=move || editing.get()>
            <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 px-4">
                <div class="bg-white rounded-2xl p-6 w-full max-w-sm space-y-3">
                    <h3 class="text-lg font-semibold">"Change location"</h3>
                    <input
                        type="text"
                        placeholder="City"
                        prop:value=move || city.get()
                        on:input=move |ev| set_city.set(event_target_value(&ev))
                        class="w-full border border-gray-300 rounded px-3 py-2"
                    />
                    <input
                        type="text"
                        placeholder="Country"
                        prop:value=move || country.get()
                        on:input=move |ev| set_country.set(event_target_value(&ev))
                        class="w-full border border-gray-300 rounded px-3 py-2"
                    />
                    <div class="flex gap-3 justify-end">
                        <button on:click=move |_| set_editing.set(false) class="px-4 py-2 text-gray-600">"Cancel"</button>
                        <button
                            on:click=save
                            disabled=move || saving.get()
                            class="px-4 py-2 bg-red-600 text-white rounded disabled:opacity-50"
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

// ============ Plan (checkout) ============

#[component]
fn PlanStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (busy, set_busy) = create_signal(false);

    let checkout = move |_| {
        let intent = match wizard.with_untracked(|w| w.begin_checkout(&api::price_ids())) {
            Ok(intent) => intent,
            Err(block) => {
                state.show_error(&block.to_string());
                return;
            }
        };
        if let Err(e) = session::set_pending_dinner(&intent.dinner_id) {
            web_sys::console::warn_1(&e.into());
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::create_checkout_session(&intent.price_id).await {
                Ok(Some(url)) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&url);
                    }
                }
                Ok(None) => state.show_error("No checkout URL returned."),
                Err(e) => {
                    web_sys::console::error_1(&e.into());
                    state.show_error("Failed to start checkout. Please try again.");
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <h2 class="text-2xl font-bold mb-4">"Choose your plan"</h2>
        <PlanPicker
            selected=Signal::derive(move || wizard.with(|w| w.selected_plan))
            on_pick=move |key: PlanKey| wizard.update(|w| w.choose_plan(key))
        />
        <button
            class="w-full mt-4 py-3 rounded-full bg-red-600 hover:bg-red-700 text-white font-bold disabled:opacity-60"
            disabled=move || busy.get() || wizard.with(|w| w.selected_plan.is_none())
            on:click=checkout
        >
            {move || if busy.get() { "Booking..." } else { "Book My Seat" }}
        </button>
    }
}

#[component]
fn PlanPicker<F>(selected: Signal<Option<PlanKey>>, on_pick: F) -> impl IntoView
where
    F: Fn(PlanKey) + Copy + 'static,
{
    view! {
        <div class="space-y-3">
            {PLANS.iter().map(|plan| {
                let key = plan.key;
                view! {
                    <button
                        class=move || if selected.get() == Some(key) {
                            "w-full flex justify-between p-4 rounded-xl border-2 border-red-600 bg-red-50"
                        } else {
                            "w-full flex justify-between p-4 rounded-xl border border-gray-200 bg-white"
                        }
                        on:click=move |_| on_pick(key)
                    >
                        <span class="font-semibold">{plan.name}</span>
                        <span class="font-bold text-red-600">{plan.display_price()}</span>
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

// ============ Meal ============

#[component]
fn MealStep<F>(wizard: RwSignal<BookingWizard>, run: F) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
{
    let meal = move || wizard.with(|w| w.meal);
    let busy = move || wizard.with(|w| w.opting_in);

    view! {
        <h2 class="text-2xl font-bold mb-4">"Meal preference"</h2>
        <div class="grid grid-cols-2 gap-4 mb-6">
            {[MealPreference::Veg, MealPreference::NonVeg].into_iter().map(|choice| view! {
                <button
                    class=move || if meal() == Some(choice) {
                        "p-6 rounded-xl border-2 border-red-600 bg-red-50 font-semibold"
                    } else {
                        "p-6 rounded-xl border border-gray-200 bg-white font-semibold"
                    }
                    on:click=move |_| wizard.update(|w| w.choose_meal(choice))
                >
                    {choice.label()}
                </button>
            }).collect_view()}
        </div>
        <StepButtons
            wizard=wizard
            run=run
            next_label=Signal::derive(move || if busy() { "Booking...".to_string() } else { "Next".to_string() })
            disabled=Signal::derive(move || meal().is_none() || busy())
            on_next=move || wizard.try_update(|w| w.submit_meal()).unwrap_or(WizardOutcome::Ignored)
        />
    }
}

// ============ Membership / Payment ============

#[component]
fn MembershipStep<F>(wizard: RwSignal<BookingWizard>, run: F) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
{
    view! {
        <h2 class="text-2xl font-bold mb-4">"Choose a membership"</h2>
        <PlanPicker
            selected=Signal::derive(move || wizard.with(|w| w.selected_membership))
            on_pick=move |key: PlanKey| wizard.update(|w| w.choose_membership(key))
        />
        <div class="mt-4">
            <StepButtons
                wizard=wizard
                run=run
                next_label=Signal::derive(|| "Continue to payment".to_string())
                disabled=Signal::derive(move || wizard.with(|w| w.selected_membership.is_none()))
                on_next=move || wizard.try_update(|w| w.to_payment()).unwrap_or(WizardOutcome::Ignored)
            />
        </div>
    }
}

#[component]
fn PaymentStep<F>(wizard: RwSignal<BookingWizard>, run: F) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
{
    let total = move || {
        wizard.with(|w| w.selected_membership.map(|key| bichance::plans::plan(key).display_price()))
    };

    view! {
        <h2 class="text-2xl font-bold mb-2">"Payment"</h2>
        <p class="text-gray-600 mb-4">"Total: " {move || total().unwrap_or_default()}</p>
        <div class="space-y-3 mb-6">
            <input
                type="text"
                placeholder="Card Number"
                prop:value=move || wizard.with(|w| w.card.number.clone())
                on:input=move |ev| wizard.update(|w| w.card.number = event_target_value(&ev))
                class="w-full border border-gray-300 rounded px-3 py-2"
            />
            <div class="grid grid-cols-2 gap-3">
                <input
                    type="text"
                    placeholder="MM/YY"
                    prop:value=move || wizard.with(|w| w.card.expiry.clone())
                    on:input=move |ev| wizard.update(|w| w.card.expiry = event_target_value(&ev))
                    class="w-full border border-gray-300 rounded px-3 py-2"
                />
                <input
                    type="password"
                    placeholder="CVV"
                    prop:value=move || wizard.with(|w| w.card.cvv.clone())
                    on:input=move |ev| wizard.update(|w| w.card.cvv = event_target_value(&ev))
                    class="w-full border border-gray-300 rounded px-3 py-2"
                />
            </div>
            <input
                type="text"
                placeholder="Name on Card"
                prop:value=move || wizard.with(|w| w.card.name.clone())
                on:input=move |ev| wizard.update(|w| w.card.name = event_target_value(&ev))
                class="w-full border border-gray-300 rounded px-3 py-2"
            />
        </div>
        <StepButtons
            wizard=wizard
            run=run
            next_label=Signal::derive(|| "Pay".to_string())
            disabled=Signal::derive(move || wizard.with(|w| w.processing))
            on_next=move || wizard.try_update(|w| w.pay()).unwrap_or(WizardOutcome::Ignored)
        />
    }
}

/// Per-step back and next buttons
#[component]
fn StepButtons<F, N>(
    wizard: RwSignal<BookingWizard>,
    run: F,
    next_label: Signal<String>,
    disabled: Signal<bool>,
    on_next: N,
) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
    N: Fn() -> WizardOutcome + 'static,
{
    view! {
        <div class="flex gap-3">
            <button
                class="flex-1 py-3 rounded-full border border-red-600 text-red-600 font-semibold"
                on:click=move |_| run(wizard.try_update(|w| w.step_back()).unwrap_or(WizardOutcome::Ignored))
            >
                "Back"
            </button>
            <button
                class="flex-1 py-3 rounded-full bg-red-600 hover:bg-red-700 text-white font-semibold disabled:opacity-60 flex items-center justify-center gap-2"
                disabled=move || disabled.get()
                on:click=move |_| run(on_next())
            >
                {move || next_label.get()}
            </button>
        </div>
    }
}

// ============ Success / Manage / Confirmed ============

#[component]
fn SuccessStep() -> impl IntoView {
    view! {
        <div class="text-center py-16">
            <div class="text-6xl mb-4">"🎉"</div>
            <h2 class="text-2xl font-extrabold mb-2">"Booking Confirmed!"</h2>
            <p class="text-gray-600 mb-6">"Your dinner is scheduled and payment is successful."</p>
            <div class="flex items-center justify-center gap-2 text-gray-500">
                <InlineLoading />
                "Redirecting to your dashboard..."
            </div>
        </div>
    }
}

#[component]
fn ManageStep<F>(wizard: RwSignal<BookingWizard>, run: F) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
{
    let reservation = move || {
        wizard.with(|w| {
            let id = w.selected_dinner.as_ref().map(|d| d.id.clone()).unwrap_or_default();
            w.opted_in.iter().find(|o| o.matches(&id)).cloned()
        })
    };

    view! {
        <h2 class="text-2xl font-bold mb-4">"Your booked dinners"</h2>
        {move || match reservation() {
            Some(dinner) => view! {
                <div class="bg-white rounded-2xl shadow p-6 space-y-2">
                    <div class="font-semibold text-lg">{dinner.display_date()}</div>
                    <div>"Restaurant: " {dinner.restaurant_name().to_string()}</div>
                    <div>"Address: " {dinner.restaurant_address().to_string()}</div>
                    <div>"Table: " {dinner.table_name().to_string()}</div>
                </div>
            }.into_view(),
            None => view! {
                <p class="text-gray-500">"Your booking details will appear here once matching is done."</p>
            }.into_view(),
        }}
        <div class="flex gap-3 mt-6">
            <button
                class="flex-1 py-3 rounded-full border border-red-600 text-red-600 font-semibold"
                on:click=move |_| run(wizard.try_update(|w| w.return_to_dashboard()).unwrap_or(WizardOutcome::Ignored))
            >
                "Book another dinner"
            </button>
            <button
                class="flex-1 py-3 rounded-full bg-red-600 hover:bg-red-700 text-white font-semibold"
                on:click=move |_| run(wizard.try_update(|w| w.confirm_presence()).unwrap_or(WizardOutcome::Ignored))
            >
                "Confirm my presence"
            </button>
        </div>
    }
}

#[component]
fn ConfirmedStep<F>(wizard: RwSignal<BookingWizard>, run: F) -> impl IntoView
where
    F: Fn(WizardOutcome) + Copy + 'static,
{
    let busy = move || wizard.with(|w| w.opting_in);

    view! {
        <div class="text-center py-12">
            <div class="text-6xl mb-4">"✅"</div>
            <h2 class="text-2xl font-extrabold mb-2">"You are booked successfully"</h2>
            <p class="text-gray-600 mb-8">"Your presence is confirmed for the dinner event."</p>
            <button
                class="px-8 py-3 rounded-full bg-red-600 hover:bg-red-700 text-white font-semibold disabled:opacity-60"
                disabled=busy
                on:click=move |_| run(wizard.try_update(|w| w.confirm_booking()).unwrap_or(WizardOutcome::Ignored))
            >
                {move || if busy() { "Booking..." } else { "Next step" }}
            </button>
        </div>
    }
}
