//! # List Loader
//!
//! A race-free loader for asynchronously fetched lists, plus a small
//! terminal user list that drives it.
//!
//! ## Features
//! - Fetch cycles with `Idle` / `Loading` / `Success` / `Failure` states
//! - Stale results dropped by request token (last started wins)
//! - Explicit `dispose` (and drop) discards pending results
//! - Failures and panics normalized into a non-empty error message
//! - Observable state through a `tokio::sync::watch` channel
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine over the loader)
//! - Loader (Tokio tasks, one per fetch cycle)

pub mod constants;
pub mod config;
pub mod loader;
pub mod models;
pub mod network;
pub mod messages;
pub mod app;
pub mod ui;

// Re-export commonly used types
pub use config::{AppConfig, LoaderConfig};
pub use loader::{AsyncListLoader, ErrorInfo, LoadState, RequestToken};
pub use models::User;
