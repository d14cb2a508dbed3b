//! Public page frame: header, content, footer

use leptos::*;

use crate::components::{Footer, Nav};

#[component]
pub fn PublicPage(children: Children) -> impl IntoView {
    view! {
        <Nav />
        <main class="flex-1">
            {children()}
        </main>
        <Footer />
    }
}
