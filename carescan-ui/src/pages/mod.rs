//! Pages
//!
//! The app shows exactly one of these, depending on the session.

pub mod dashboard;
pub mod landing;

pub use dashboard::DashboardPage;
pub use landing::Landing;
