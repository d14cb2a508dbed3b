//! Contact Page
//!
//! The form is not wired to any endpoint; members are pointed at the
//! support address.

use bichance::content::SUPPORT_EMAIL;
use leptos::*;

use crate::components::PublicPage;
use crate::state::GlobalState;

#[component]
pub fn Contact() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (message, set_message) = create_signal(String::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if name.get().trim().is_empty() || !email.get().contains('@') || message.get().trim().is_empty() {
            state.show_error("Please fill in your name, email and message.");
            return;
        }
        state.show_success(&format!("Thanks! We'll reply from {}.", SUPPORT_EMAIL));
        set_name.set(String::new());
        set_email.set(String::new());
        set_message.set(String::new());
    };

    view! {
        <PublicPage>
            <section class="container mx-auto px-4 py-16 max-w-2xl">
                <h1 class="text-4xl font-bold text-red-600 mb-8">"Contact Us"</h1>
                <h2 class="text-xl font-semibold mb-2 text-red-500">"Get in Touch"</h2>
                <p class="text-gray-700 mb-8">
                    "We'd love to hear from you! Fill out the form below or email us at "
                    <a href=format!("mailto:{}", SUPPORT_EMAIL) class="text-red-600 underline">{SUPPORT_EMAIL}</a>
                    "."
                </p>

                <form class="space-y-4" on:submit=submit>
                    <input
                        type="text"
                        placeholder="Your Name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        class="w-full border border-gray-300 rounded px-4 py-2"
                    />
                    <input
                        type="email"
                        placeholder="Your Email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full border border-gray-300 rounded px-4 py-2"
                    />
                    <textarea
                        placeholder="Your Message"
                        rows=4
                        prop:value=move || message.get()
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                        class="w-full border border-gray-300 rounded px-4 py-2"
                    />
                    <button type="submit" class="bg-red-500 hover:bg-red-600 text-white font-bold px-6 py-2 rounded">
                        "Send Message"
                    </button>
                </form>
            </section>
        </PublicPage>
    }
}
