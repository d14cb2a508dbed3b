//! Bichance Tables Website
//!
//! Public pages, OTP sign-in and the member dashboard, built with Leptos
//! (WASM).
//!
//! # Architecture
//!
//! Client-side rendered (CSR) app compiled to WebAssembly and served by the
//! `bichance` web host. Every rule (plans, sign-in flow, booking wizard,
//! profile edits) comes from the shared `bichance` crate; this crate only
//! renders it and talks HTTP to the backend.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
