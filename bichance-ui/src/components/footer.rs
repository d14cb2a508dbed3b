//! Footer Component

use bichance::content::{FOOTER_LINKS, SUPPORT_EMAIL};
use leptos::*;
use leptos_router::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-black text-white pt-12 pb-6 mt-12">
            <div class="container mx-auto px-4 flex flex-col items-center">
                <img src="/l1.png" alt="bichance logo" class="h-16 mb-6" />

                <div class="flex flex-wrap justify-center gap-6 mb-6 border-t border-b border-gray-800 py-6 w-full">
                    {FOOTER_LINKS.iter().map(|link| view! {
                        <A href=link.path class="text-gray-300 hover:text-white text-sm">
                            {link.label}
                        </A>
                    }).collect_view()}
                </div>

                <a href=format!("mailto:{}", SUPPORT_EMAIL) class="text-gray-400 hover:text-white text-sm mb-4">
                    {SUPPORT_EMAIL}
                </a>

                <p class="text-gray-500 text-xs">"© 2025 All rights reserved. bichance"</p>
            </div>
        </footer>
    }
}
