//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Start a new fetch cycle with the same source
    Reload,
    SelectPrev,
    SelectNext,
    ToggleHelp,
    CloseHelp,
    Quit,
}

/// Convert a key event to a UI event
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Any key closes the help popup
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Reload),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_bindings() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), false), Some(UiEvent::Reload));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('q')), false), Some(UiEvent::Quit));
        assert_eq!(key_to_ui_event(press(KeyCode::Down), false), Some(UiEvent::SelectNext));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('k')), false), Some(UiEvent::SelectPrev));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('x')), false), None);
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), true), Some(UiEvent::CloseHelp));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, true), Some(UiEvent::Quit));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_to_ui_event(release, false), None);
    }
}
