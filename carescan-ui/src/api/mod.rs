//! API Access
//!
//! Browser implementation of the screening API client.

pub mod client;

pub use client::{get_api_base, set_api_base, BrowserBackend};
