//! CareScan Web App
//!
//! Breast-health screening front end built with Leptos (WASM).
//!
//! # Features
//!
//! - Landing page with login and registration
//! - Image upload for AI-assisted analysis
//! - Risk assessment questionnaire, pre-filled from saved history
//! - History of past analyses with risk badges
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. View state comes from the `carescan` library; this crate only
//! renders it and talks to the screening API through `fetch`.

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
