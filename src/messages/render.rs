//! Render state - data structure sent from App layer to UI for rendering

use crate::loader::{LoadState, RequestToken};
use crate::models::User;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub users: LoadState<Vec<User>>,
    pub selected: usize,
    pub show_help: bool,
    /// Token of the cycle the view is waiting on or showing
    pub token: Option<RequestToken>,
    pub source_url: String,
}
