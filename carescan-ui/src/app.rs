//! App Root Component
//!
//! Provides the global state and mounts the landing page or the dashboard
//! depending on whether a session exists.

use chrono::Datelike;
use leptos::*;

use crate::components::{Nav, Toast};
use crate::pages::{DashboardPage, Landing};
use crate::state::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_global_state();

    view! {
        <div class="min-h-screen bg-slate-50 text-slate-900 flex flex-col">
            <Nav />

            <main class="flex-1">
                // A new session mounts a fresh dashboard; logout drops it
                {move || match state.current_session() {
                    Some(session) => view! { <DashboardPage session=session /> }.into_view(),
                    None => view! { <Landing /> }.into_view(),
                }}
            </main>

            <Footer />

            <Toast />
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().year();

    view! {
        <footer class="border-t border-slate-200 bg-white py-6">
            <div class="container mx-auto px-4 text-center text-sm text-slate-500 space-y-1">
                <p>{format!("© {} CareScan", year)}</p>
                <p>
                    "CareScan provides screening support only and is not a substitute "
                    "for professional medical advice."
                </p>
            </div>
        </footer>
    }
}
