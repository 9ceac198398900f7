//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Block spinner for panels that are fetching
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12 text-pink-600">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Inline loading spinner for buttons
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
