//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod api_settings;
pub mod loading;
pub mod nav;
pub mod result_card;
pub mod risk_badge;
pub mod toast;

pub use api_settings::ApiSettings;
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use result_card::ResultCard;
pub use risk_badge::RiskBadgeView;
pub use toast::Toast;
