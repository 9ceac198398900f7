//! Dashboard Page
//!
//! Signed-in view with image analysis, risk assessment and history tabs.
//! All state lives in one `carescan::views::Dashboard` behind a signal; each
//! submission runs `begin_*` synchronously and `finish_*` when the request
//! resolves.

use futures_util::future::join;
use leptos::*;

use carescan::client::Backend;
use carescan::forms::check_upload_size;
use carescan::models::BreastDensity;
use carescan::session::Session;
use carescan::views::{Dashboard, DashboardTab, HistoryView, Notice};

use crate::api::{self, BrowserBackend};
use crate::components::{InlineLoading, Loading, ResultCard, RiskBadgeView};
use crate::state::{use_global_state, GlobalState};

/// Shared handles every tab needs
#[derive(Clone, Copy)]
struct Ctx {
    dash: RwSignal<Dashboard>,
    session: StoredValue<Session>,
    state: GlobalState,
}

impl Ctx {
    fn token(&self) -> String {
        self.session.with_value(|s| s.token.clone())
    }

    fn backend(&self) -> BrowserBackend {
        self.state.backend()
    }

    fn notify(&self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            self.state.notify(&notice);
        }
    }

    async fn refresh_analyses(self, backend: &BrowserBackend, token: &str) {
        let outcome = backend.analyses(token).await;
        self.notify(self.dash.try_update(|d| d.apply_analyses(outcome)).flatten());
    }

    async fn refresh_medical_history(self, backend: &BrowserBackend, token: &str) {
        let outcome = backend.medical_history(token).await;
        self.notify(
            self.dash
                .try_update(|d| d.apply_medical_history(outcome))
                .flatten(),
        );
    }
}

#[component]
pub fn DashboardPage(session: Session) -> impl IntoView {
    let state = use_global_state();
    let ctx = Ctx {
        dash: create_rw_signal(Dashboard::new()),
        session: store_value(session),
        state,
    };
    let (mounting, set_mounting) = create_signal(true);

    // Initial load: analyses and medical history in parallel
    spawn_local(async move {
        let backend = ctx.backend();
        let token = ctx.token();
        let (analyses, history) = join(
            backend.analyses(&token),
            backend.medical_history(&token),
        )
        .await;

        let notices: Vec<Notice> = ctx
            .dash
            .try_update(|d| {
                [d.apply_analyses(analyses), d.apply_medical_history(history)]
                    .into_iter()
                    .flatten()
                    .collect()
            })
            .unwrap_or_default();
        state.notify_all(&notices);
        let _ = set_mounting.try_set(false);
    });

    let tab = move || ctx.dash.with(|d| d.tab);

    view! {
        <div class="container mx-auto px-4 py-8 space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Your Dashboard"</h1>
                <p class="text-slate-500 mt-1">"Analyze images, assess your risk and review your history"</p>
            </div>

            <div class="flex space-x-2 border-b border-slate-200">
                {DashboardTab::ALL.into_iter().map(|t| view! {
                    <button
                        on:click=move |_| ctx.dash.update(|d| d.select_tab(t))
                        class=move || {
                            let base = "px-4 py-2 font-medium transition-colors";
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

            {move || {
                if mounting.get() {
                    return view! { <Loading /> }.into_view();
                }
                match tab() {
                    DashboardTab::ImageAnalysis => view! { <ImageTabView ctx=ctx /> }.into_view(),
                    DashboardTab::RiskAssessment => view! { <RiskTabView ctx=ctx /> }.into_view(),
                    DashboardTab::History => view! { <HistoryTabView ctx=ctx /> }.into_view(),
                }
            }}
        </div>
    }
}

// ============================================
// Image analysis
// ============================================

#[component]
fn ImageTabView(ctx: Ctx) -> impl IntoView {
    let dash = ctx.dash;
    let loading = move || dash.with(|d| d.image.loading);
    let has_file = move || dash.with(|d| d.image.selected.is_some());

    let on_file = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        // Rejected before the bytes are read; the previous pick stays
        if let Err(e) = check_upload_size(file.size() as u64) {
            ctx.state.show_error(&e.to_string());
            input.set_value("");
            return;
        }

        spawn_local(async move {
            match api::client::read_file(&file).await {
                Ok(upload) => {
                    if let Some(Err(notice)) = dash.try_update(|d| d.select_image(upload)) {
                        ctx.state.notify(&notice);
                    }
                }
                Err(e) => ctx.state.show_error(&e),
            }
        });
    };

    let on_analyze = move |_| {
        let upload = match dash.try_update(|d| d.begin_image()) {
            Some(Ok(upload)) => upload,
            Some(Err(notice)) => return ctx.state.notify(&notice),
            None => return,
        };

        spawn_local(async move {
            let backend = ctx.backend();
            let token = ctx.token();

            let outcome = backend.analyze_image(&token, &upload).await;
            let succeeded = outcome.is_ok();
            ctx.notify(dash.try_update(|d| d.finish_image(outcome)));

            if succeeded {
                ctx.refresh_analyses(&backend, &token).await;
            }
        });
    };

    view! {
        <section class="grid md:grid-cols-2 gap-6">
            <div class="bg-white border border-slate-200 rounded-xl p-6 shadow-sm space-y-4">
                <h2 class="text-xl font-semibold">"Upload Image"</h2>
                <p class="text-sm text-slate-500">"Mammogram or ultrasound image, up to 10MB."</p>

                <input
                    type="file"
                    accept="image/*"
                    on:change=on_file
                    class="block w-full text-sm text-slate-600 file:mr-4 file:py-2 file:px-4
                           file:rounded-lg file:border-0 file:bg-pink-50 file:text-pink-700"
                />

                {move || dash.with(|d| d.image.selected.as_ref().map(|f| {
                    format!("{} ({:.1} KB)", f.file_name, f.size() as f64 / 1024.0)
                })).map(|label| view! {
                    <p class="text-sm text-slate-600">{label}</p>
                })}

                <button
                    on:click=on_analyze
                    disabled=move || loading() || !has_file()
                    class="w-full bg-pink-600 hover:bg-pink-700 disabled:bg-slate-400
                           disabled:cursor-not-allowed text-white rounded-lg py-3 font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || loading().then(|| view! { <InlineLoading /> })}
                    <span>{move || dash.with(|d| d.image.submit_label())}</span>
                </button>
            </div>

            <div>
                {move || match dash.with(|d| d.image_result().cloned()) {
                    Some(result) => view! { <ResultCard result=result /> }.into_view(),
                    None => view! {
                        <Placeholder text="Upload an image to see the analysis here." />
                    }.into_view(),
                }}
            </div>
        </section>
    }
}

// ============================================
// Risk assessment
// ============================================

#[component]
fn RiskTabView(ctx: Ctx) -> impl IntoView {
    let dash = ctx.dash;
    let calculating = move || dash.with(|d| d.risk.calculating);
    let saving = move || dash.with(|d| d.risk.saving);

    let on_calculate = move |_| {
        let body = match dash.try_update(|d| d.begin_assessment()) {
            Some(Ok(body)) => body,
            Some(Err(notice)) => return ctx.state.notify(&notice),
            None => return,
        };

        spawn_local(async move {
            let backend = ctx.backend();
            let token = ctx.token();

            let outcome = backend.assess_risk(&token, &body).await;
            let succeeded = outcome.is_ok();
            ctx.notify(dash.try_update(|d| d.finish_assessment(outcome)));

            if succeeded {
                ctx.refresh_analyses(&backend, &token).await;
            }
        });
    };

    let on_save = move |_| {
        let body = match dash.try_update(|d| d.begin_save_history()) {
            Some(Ok(body)) => body,
            Some(Err(notice)) => return ctx.state.notify(&notice),
            None => return,
        };

        spawn_local(async move {
            let backend = ctx.backend();
            let token = ctx.token();

            let outcome = backend.save_medical_history(&token, &body).await;
            let succeeded = outcome.is_ok();
            ctx.notify(dash.try_update(|d| d.finish_save_history(outcome)));

            if succeeded {
                ctx.refresh_medical_history(&backend, &token).await;
            }
        });
    };

    view! {
        <section class="grid md:grid-cols-2 gap-6">
            <div class="bg-white border border-slate-200 rounded-xl p-6 shadow-sm space-y-4">
                <h2 class="text-xl font-semibold">"Risk Questionnaire"</h2>

                <NumberField
                    label="Age"
                    value=Signal::derive(move || dash.with(|d| d.risk.form.age.clone()))
                    on_input=move |v| dash.update(|d| d.risk.form.age = v)
                />

                <CheckField
                    label="Family history of breast cancer"
                    checked=Signal::derive(move || dash.with(|d| d.risk.form.family_history))
                    on_toggle=move |v| dash.update(|d| d.risk.form.family_history = v)
                />
                <CheckField
                    label="Previous breast biopsies"
                    checked=Signal::derive(move || dash.with(|d| d.risk.form.previous_biopsies))
                    on_toggle=move |v| dash.update(|d| d.risk.form.previous_biopsies = v)
                />
                <CheckField
                    label="Currently on hormone therapy"
                    checked=Signal::derive(move || dash.with(|d| d.risk.form.hormone_therapy))
                    on_toggle=move |v| dash.update(|d| d.risk.form.hormone_therapy = v)
                />

                <div class="grid grid-cols-2 gap-4">
                    <NumberField
                        label="Age at first pregnancy (optional)"
                        value=Signal::derive(move || dash.with(|d| d.risk.form.first_pregnancy_age.clone()))
                        on_input=move |v| dash.update(|d| d.risk.form.first_pregnancy_age = v)
                    />
                    <NumberField
                        label="Age at first menstruation (optional)"
                        value=Signal::derive(move || dash.with(|d| d.risk.form.menstruation_age.clone()))
                        on_input=move |v| dash.update(|d| d.risk.form.menstruation_age = v)
                    />
                </div>

                <div>
                    <label class="block text-sm text-slate-600 mb-1">"Breast density"</label>
                    <select
                        on:change=move |ev| {
                            if let Some(density) = BreastDensity::parse(&event_target_value(&ev)) {
                                dash.update(|d| d.risk.form.breast_density = density);
                            }
                        }
                        class="w-full bg-white rounded-lg px-4 py-3 border border-slate-300
                               focus:border-pink-500 focus:outline-none"
                    >
                        {BreastDensity::ALL.into_iter().map(|density| view! {
                            <option
                                value=density.as_str()
                                selected=move || dash.with(|d| d.risk.form.breast_density == density)
                            >
                                {density.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                <div class="flex space-x-3 pt-2">
                    <button
                        on:click=on_calculate
                        disabled=calculating
                        class="flex-1 bg-pink-600 hover:bg-pink-700 disabled:bg-slate-400
                               disabled:cursor-not-allowed text-white rounded-lg py-3 font-semibold
                               transition-colors"
                    >
                        {move || dash.with(|d| d.risk.calculate_label())}
                    </button>
                    <button
                        on:click=on_save
                        disabled=saving
                        class="flex-1 bg-white border border-slate-300 hover:bg-slate-100
                               disabled:opacity-50 disabled:cursor-not-allowed rounded-lg py-3
                               font-semibold transition-colors"
                    >
                        {move || dash.with(|d| d.risk.save_label())}
                    </button>
                </div>
            </div>

            <div>
                {move || match dash.with(|d| d.risk_result().cloned()) {
                    Some(result) => view! { <ResultCard result=result /> }.into_view(),
                    None => view! {
                        <Placeholder text="Complete the questionnaire and calculate your risk." />
                    }.into_view(),
                }}
            </div>
        </section>
    }
}

#[component]
fn NumberField(
    label: &'static str,
    #[prop(into)]
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-slate-600 mb-1">{label}</label>
            <input
                type="number"
                min="0"
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
                class="w-full bg-white rounded-lg px-4 py-3 border border-slate-300
                       focus:border-pink-500 focus:outline-none"
            />
        </div>
    }
}

#[component]
fn CheckField(
    label: &'static str,
    #[prop(into)]
    checked: Signal<bool>,
    on_toggle: impl Fn(bool) + 'static,
) -> impl IntoView {
    view! {
        <label class="flex items-center space-x-3 text-slate-700">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle(event_target_checked(&ev))
                class="w-4 h-4 accent-pink-600"
            />
            <span>{label}</span>
        </label>
    }
}

// ============================================
// History
// ============================================

#[component]
fn HistoryTabView(ctx: Ctx) -> impl IntoView {
    let dash = ctx.dash;

    view! {
        <section class="space-y-4">
            {move || match dash.with(|d| d.history_view()) {
                HistoryView::Empty(message) => view! { <Placeholder text=message /> }.into_view(),
                HistoryView::Cards(cards) => cards.into_iter().map(|card| view! {
                    <div class="bg-white border border-slate-200 rounded-xl p-5 shadow-sm space-y-2">
                        <div class="flex items-center justify-between">
                            <h3 class="font-semibold">{card.title}</h3>
                            <RiskBadgeView badge=card.badge />
                        </div>
                        <p class="text-slate-700 text-sm">{card.result}</p>
                        <p class="text-xs text-slate-400">{card.created_at}</p>
                    </div>
                }).collect_view(),
            }}
        </section>
    }
}

#[component]
fn Placeholder(text: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white border border-dashed border-slate-300 rounded-xl p-10 text-center text-slate-500">
            {text}
        </div>
    }
}
