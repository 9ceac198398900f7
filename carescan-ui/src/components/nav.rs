//! Navigation Component
//!
//! Header bar with the brand and, when signed in, the user and a logout button.

use leptos::*;

use crate::state::use_global_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();

    let logout = move |_| state.sign_out();

    view! {
        <nav class="bg-white border-b border-slate-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🩺"</span>
                        <span class="text-xl font-bold text-pink-600">"CareScan"</span>
                    </div>

                    {move || {
                        state.current_session().map(|session| view! {
                            <div class="flex items-center space-x-4">
                                <span class="text-sm text-slate-600">
                                    {format!("Welcome, {}", session.user.full_name)}
                                </span>
                                <button
                                    on:click=logout
                                    class="px-4 py-2 rounded-lg text-sm font-medium text-slate-700
                                           bg-slate-100 hover:bg-slate-200 transition-colors"
                                >
                                    "Logout"
                                </button>
                            </div>
                        })
                    }}
                </div>
            </div>
        </nav>
    }
}
