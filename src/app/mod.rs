//! App layer - central state management and event processing
//!
//! The App actor receives UI events and loader state changes,
//! updates state, and emits render state.

pub mod state;
pub mod actor;

pub use state::AppState;
pub use actor::AppActor;
