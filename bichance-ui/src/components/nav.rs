//! Navigation Component
//!
//! Header bar with logo, public links and the sign-in / dashboard button.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="bg-white border-b border-red-100 sticky top-0 z-40">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <img src="/l1.png" alt="bichance logo" class="h-10" />
                    </A>

                    <div class="hidden md:flex items-center space-x-1">
                        <NavLink href="/about" label="About" />
                        <NavLink href="/blog" label="Blog" />
                        <NavLink href="/pricing" label="Pricing" />
                        <NavLink href="/faq" label="FAQ" />
                    </div>

                    {move || {
                        if state.is_authenticated() {
                            view! {
                                <A href="/dashboard" class="px-5 py-2 bg-red-600 hover:bg-red-700 text-white rounded-full font-medium">
                                    "Dashboard"
                                </A>
                            }.into_view()
                        } else {
                            view! {
                                <A href="/auth" class="px-5 py-2 bg-red-600 hover:bg-red-700 text-white rounded-full font-medium">
                                    "Sign In"
                                </A>
                            }.into_view()
                        }
                    }}
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-700 hover:text-red-600 transition-colors"
            active_class="text-red-600 font-semibold"
        >
            {label}
        </A>
    }
}
