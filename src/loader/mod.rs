//! Loader layer - fetch lifecycle with stale-result protection
//!
//! The loader runs caller-supplied fetches and exposes a `LoadState`
//! that only ever reflects the most recently started cycle.

pub mod controller;
pub mod error;
pub mod state;

pub use controller::AsyncListLoader;
pub use error::ErrorInfo;
pub use state::{LoadState, RequestToken};
