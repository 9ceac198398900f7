//! Landing Page
//!
//! Marketing hero that opens into the login/register panel.

use leptos::*;

use carescan::views::{authenticate, AuthTab, LandingView};

use crate::components::{ApiSettings, InlineLoading};
use crate::state::use_global_state;

#[component]
pub fn Landing() -> impl IntoView {
    let landing = create_rw_signal(LandingView::new());

    view! {
        <div class="container mx-auto px-4 py-12">
            {move || {
                if landing.with(|l| l.is_auth()) {
                    view! { <AuthPanelView landing=landing /> }.into_view()
                } else {
                    view! { <Hero landing=landing /> }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn Hero(landing: RwSignal<LandingView>) -> impl IntoView {
    view! {
        <div class="space-y-16">
            <section class="text-center max-w-3xl mx-auto space-y-6">
                <h1 class="text-4xl md:text-5xl font-bold">
                    "Early detection, "
                    <span class="text-pink-600">"made simple"</span>
                </h1>
                <p class="text-lg text-slate-600">
                    "Upload a breast image for AI-assisted analysis, answer a short "
                    "questionnaire to understand your risk, and keep every result in one place."
                </p>
                <div class="flex justify-center space-x-4">
                    <button
                        on:click=move |_| landing.update(|l| l.open_auth(AuthTab::Register))
                        class="px-6 py-3 bg-pink-600 hover:bg-pink-700 text-white rounded-lg
                               font-semibold transition-colors"
                    >
                        "Get Started"
                    </button>
                    <button
                        on:click=move |_| landing.update(|l| l.open_auth(AuthTab::Login))
                        class="px-6 py-3 bg-white border border-slate-300 hover:bg-slate-100
                               rounded-lg font-semibold transition-colors"
                    >
                        "Sign In"
                    </button>
                </div>
            </section>

            <section class="grid md:grid-cols-3 gap-6">
                <FeatureCard
                    icon="🔬"
                    title="Image Analysis"
                    text="Upload a mammogram or ultrasound image and receive a risk level with recommendations."
                />
                <FeatureCard
                    icon="📋"
                    title="Risk Assessment"
                    text="Answer questions about your age, family history and health to estimate your risk."
                />
                <FeatureCard
                    icon="📈"
                    title="Track History"
                    text="Every analysis and assessment is saved so you can follow changes over time."
                />
            </section>

            <section class="max-w-md mx-auto">
                <ApiSettings />
            </section>
        </div>
    }
}

#[component]
fn FeatureCard(icon: &'static str, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white border border-slate-200 rounded-xl p-6 shadow-sm">
            <div class="text-3xl mb-3">{icon}</div>
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            <p class="text-slate-600 text-sm">{text}</p>
        </div>
    }
}

/// Login and register forms
#[component]
fn AuthPanelView(landing: RwSignal<LandingView>) -> impl IntoView {
    let state = use_global_state();

    let tab = move || landing.with(|l| l.panel.tab);
    let loading = move || landing.with(|l| l.panel.loading);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let request = match landing.try_update(|l| l.panel.begin_submit()) {
            Some(Ok(request)) => request,
            _ => return,
        };

        let backend = state.backend();
        spawn_local(async move {
            let outcome = authenticate(&backend, &request).await;
            // The panel is gone once a session exists, so finish before signing in
            let session = landing
                .try_update(|l| l.panel.finish_submit(request.action(), outcome))
                .flatten();
            if let Some(session) = session {
                state.sign_in(session);
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-white border border-slate-200 rounded-xl p-8 shadow-sm">
            <div class="flex mb-6 border-b border-slate-200">
                {[AuthTab::Login, AuthTab::Register].into_iter().map(|t| view! {
                    <button
                        type="button"
                        on:click=move |_| landing.update(|l| l.panel.select_tab(t))
                        class=move || {
                            let base = "flex-1 py-2 font-medium transition-colors";
                            if tab() == t {
                                format!("{} text-pink-600 border-b-2 border-pink-600", base)
                            } else {
                                format!("{} text-slate-500 hover:text-slate-800", base)
                            }
                        }
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </div>

            <form on:submit=on_submit class="space-y-4">
                {move || (tab() == AuthTab::Register).then(|| view! {
                    <Field
                        label="Full Name"
                        input_type="text"
                        value=Signal::derive(move || landing.with(|l| l.panel.register.full_name.clone()))
                        on_input=move |v| landing.update(|l| l.panel.register.full_name = v)
                    />
                })}

                <Field
                    label="Email"
                    input_type="email"
                    value=Signal::derive(move || landing.with(|l| match l.panel.tab {
                        AuthTab::Login => l.panel.login.email.clone(),
                        AuthTab::Register => l.panel.register.email.clone(),
                    }))
                    on_input=move |v| landing.update(|l| match l.panel.tab {
                        AuthTab::Login => l.panel.login.email = v,
                        AuthTab::Register => l.panel.register.email = v,
                    })
                />

                <Field
                    label="Password"
                    input_type="password"
                    value=Signal::derive(move || landing.with(|l| match l.panel.tab {
                        AuthTab::Login => l.panel.login.password.clone(),
                        AuthTab::Register => l.panel.register.password.clone(),
                    }))
                    on_input=move |v| landing.update(|l| match l.panel.tab {
                        AuthTab::Login => l.panel.login.password = v,
                        AuthTab::Register => l.panel.register.password = v,
                    })
                />

                {move || landing.with(|l| l.panel.error.clone()).map(|err| view! {
                    <p class="text-sm text-red-600 bg-red-50 border border-red-200 rounded-lg px-3 py-2">
                        {err}
                    </p>
                })}

                <button
                    type="submit"
                    disabled=loading
                    class="w-full bg-pink-600 hover:bg-pink-700 disabled:bg-slate-400
                           disabled:cursor-not-allowed text-white rounded-lg py-3 font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || if loading() {
                        view! {
                            <InlineLoading />
                            <span>"Please wait..."</span>
                        }.into_view()
                    } else {
                        view! { <span>{tab().label()}</span> }.into_view()
                    }}
                </button>
            </form>
        </div>
    }
}

/// Labelled text input bound to a slice of the panel state
#[component]
fn Field(
    label: &'static str,
    input_type: &'static str,
    #[prop(into)]
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-slate-600 mb-1">{label}</label>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
                class="w-full bg-white rounded-lg px-4 py-3 border border-slate-300
                       focus:border-pink-500 focus:outline-none"
            />
        </div>
    }
}
