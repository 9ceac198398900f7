//! Result Card Component
//!
//! Renders an image analysis or risk assessment result.

use leptos::*;

use carescan::models::AnalysisResult;
use carescan::views::RiskBadge;

use super::RiskBadgeView;

#[component]
pub fn ResultCard(result: AnalysisResult) -> impl IntoView {
    let title = result.analysis_type.title();
    let badge = RiskBadge::for_level(result.risk_level.as_str());
    let AnalysisResult {
        result: text,
        recommendations,
        ..
    } = result;

    view! {
        <div class="bg-white border border-slate-200 rounded-xl p-6 space-y-4 shadow-sm">
            <div class="flex items-center justify-between">
                <h3 class="text-lg font-semibold">{format!("{} Result", title)}</h3>
                <RiskBadgeView badge=badge />
            </div>

            <p class="text-slate-700 whitespace-pre-line">{text}</p>

            {(!recommendations.is_empty()).then(|| view! {
                <div>
                    <h4 class="font-semibold mb-2">"Recommendations"</h4>
                    <ul class="list-disc list-inside space-y-1 text-slate-700">
                        {recommendations.into_iter().map(|rec| view! {
                            <li>{rec}</li>
                        }).collect_view()}
                    </ul>
                </div>
            })}
        </div>
    }
}
