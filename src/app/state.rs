//! App state - the user list view bound to its loader

use crate::loader::AsyncListLoader;
use crate::messages::{RenderState, UiEvent};
use crate::models::User;

/// Main application state
pub struct AppState {
    pub loader: AsyncListLoader<User>,
    pub selected: usize,
    pub show_help: bool,
    pub source_url: String,
}

impl AppState {
    pub fn new(loader: AsyncListLoader<User>, source_url: impl Into<String>) -> Self {
        AppState {
            loader,
            selected: 0,
            show_help: false,
            source_url: source_url.into(),
        }
    }

    /// Apply a UI event, returns true if quit was requested
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Reload => self.reload(),
            UiEvent::SelectPrev => self.select_prev(),
            UiEvent::SelectNext => self.select_next(),
            UiEvent::ToggleHelp => self.show_help = !self.show_help,
            UiEvent::CloseHelp => self.show_help = false,
            UiEvent::Quit => {
                self.loader.dispose();
                return true;
            }
        }
        false
    }

    pub fn reload(&mut self) {
        if self.loader.reload().is_some() {
            self.selected = 0;
        }
    }

    fn user_count(&self) -> usize {
        self.loader
            .with_state(|state| state.data().map_or(0, Vec::len))
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let count = self.user_count();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the current list after a state change
    pub fn clamp_selection(&mut self) {
        let count = self.user_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            users: self.loader.state(),
            selected: self.selected,
            show_help: self.show_help,
            token: self.loader.current_token(),
            source_url: self.source_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use std::time::Duration;

    fn users(n: u64) -> Vec<User> {
        (1..=n)
            .map(|id| User {
                id,
                name: format!("User {}", id),
                username: None,
                email: format!("user{}@example.com", id),
            })
            .collect()
    }

    async fn loaded_state(n: u64) -> AppState {
        let loader = AsyncListLoader::with_fetch(LoaderConfig::default(), move || async move {
            Ok::<_, String>(users(n))
        });
        let mut rx = loader.subscribe();
        rx.wait_for(|state| state.is_settled()).await.unwrap();
        drop(rx);
        AppState::new(loader, "http://test/users")
    }

    #[tokio::test]
    async fn test_selection_stays_in_bounds() {
        let mut state = loaded_state(2).await;
        state.handle_event(UiEvent::SelectPrev);
        assert_eq!(state.selected, 0);
        state.handle_event(UiEvent::SelectNext);
        state.handle_event(UiEvent::SelectNext);
        assert_eq!(state.selected, 1);
    }

    #[tokio::test]
    async fn test_selection_on_empty_list() {
        let mut state = loaded_state(0).await;
        state.handle_event(UiEvent::SelectNext);
        state.clamp_selection();
        assert_eq!(state.selected, 0);
        assert_eq!(state.to_render_state().users.data().map(Vec::len), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_resets_selection_and_shows_loading() {
        let mut state = loaded_state(3).await;
        state.selected = 2;
        let before = state.loader.current_token();

        state.handle_event(UiEvent::Reload);
        let render = state.to_render_state();
        assert!(render.users.is_loading());
        assert_eq!(render.selected, 0);
        assert!(render.token > before);

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(state.to_render_state().users.data().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_quit_disposes_loader() {
        let mut state = loaded_state(1).await;
        assert!(!state.handle_event(UiEvent::ToggleHelp));
        assert!(state.show_help);
        assert!(!state.handle_event(UiEvent::CloseHelp));
        assert!(!state.show_help);

        assert!(state.handle_event(UiEvent::Quit));
        assert!(state.loader.is_disposed());
    }
}
