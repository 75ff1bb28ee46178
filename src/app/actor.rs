//! App actor - message loop processing UI events and loader state changes

use tokio::sync::{mpsc, watch};

use crate::app::state::AppState;
use crate::loader::LoadState;
use crate::messages::{RenderState, UiEvent};
use crate::models::User;

/// App actor that processes UI events and loader updates
pub struct AppActor {
    state: AppState,
    loader_rx: watch::Receiver<LoadState<Vec<User>>>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(state: AppState, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        let loader_rx = state.loader.subscribe();
        AppActor {
            state,
            loader_rx,
            render_tx,
        }
    }

    /// Run the actor message loop. Returns the final state once quit is
    /// requested or the UI side hangs up; the loader is disposed either way.
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) -> AppState {
        // The initial render already reflects the current loader state
        self.loader_rx.borrow_and_update();
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    let Some(event) = event else { break };
                    if self.state.handle_event(event) {
                        break;
                    }
                }
                changed = self.loader_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let status = self.loader_rx.borrow_and_update().label();
                    tracing::debug!(status, "Loader state changed");
                    self.state.clamp_selection();
                }
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }

        self.state.loader.dispose();
        self.state
    }
}
