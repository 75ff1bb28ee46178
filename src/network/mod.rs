//! Network layer - HTTP fetch of the user list
//!
//! Provides the fetch function the user list hands to the loader.

pub mod client;

pub use client::{create_client, fetch_users};
