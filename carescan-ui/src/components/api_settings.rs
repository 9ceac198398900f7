//! API Settings Component
//!
//! Lets the user point the app at another API server. The URL is kept in
//! local storage and read on every request.

use leptos::*;

use carescan::client::Backend;

use crate::api;
use crate::state::use_global_state;

#[component]
pub fn ApiSettings() -> impl IntoView {
    let state = use_global_state();

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_api_base(&api_url.get());

        spawn_local(async move {
            match state.backend().service_info().await {
                Ok(_) => {
                    set_test_result.set(Some(true));
                    state.show_success("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        set_api_url.set(api::get_api_base());
        state.show_success("API URL saved");
    };

    view! {
        <details class="text-sm text-slate-500">
            <summary class="cursor-pointer">"API settings"</summary>

            <div class="mt-3 space-y-2">
                <label class="block">"CareScan API URL"</label>
                <div class="flex space-x-2">
                    <input
                        type="text"
                        prop:value=move || api_url.get()
                        on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        class="flex-1 bg-white rounded-lg px-3 py-2 border border-slate-300
                               focus:border-pink-500 focus:outline-none"
                    />
                    <button
                        on:click=test_connection
                        disabled=move || testing.get()
                        class="px-3 py-2 bg-slate-200 hover:bg-slate-300 disabled:opacity-50
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if testing.get() { "Testing..." } else { "Test" }}
                    </button>
                    <button
                        on:click=save_url
                        class="px-3 py-2 bg-pink-600 hover:bg-pink-700 text-white
                               rounded-lg font-medium transition-colors"
                    >
                        "Save"
                    </button>
                </div>

                {move || match test_result.get() {
                    Some(true) => view! { <span class="text-green-600">"✓ Connected"</span> }.into_view(),
                    Some(false) => view! { <span class="text-red-600">"✕ Unreachable"</span> }.into_view(),
                    None => view! {}.into_view(),
                }}
            </div>
        </details>
    }
}
