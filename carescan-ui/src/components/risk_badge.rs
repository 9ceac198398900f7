//! Risk Badge Component

use leptos::*;

use carescan::views::RiskBadge;

/// Colored pill for a risk level
#[component]
pub fn RiskBadgeView(badge: RiskBadge) -> impl IntoView {
    view! {
        <span class=format!(
            "inline-flex items-center space-x-1 px-3 py-1 rounded-full border text-xs font-semibold {}",
            badge.class()
        )>
            <span>{badge.icon.glyph()}</span>
            <span>{badge.label}</span>
        </span>
    }
}
