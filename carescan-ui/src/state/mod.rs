//! State Management
//!
//! Session context and toast notifications.

pub mod global;

pub use global::{provide_global_state, use_global_state, GlobalState};
