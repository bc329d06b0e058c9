//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level views
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum View {
    #[default]
    Catalog,
    Submit,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // View navigation
    SwitchView(View),
    Back,

    // Wallet
    ConnectWallet,
    DisconnectWallet,

    // Catalog
    CycleCategory,
    CycleAudience,
    ClearFilters,
    SelectNext,
    SelectPrev,
    NextPage,
    PrevPage,
    Refresh,

    // Submission form
    NextField,
    PrevField,
    EditField,
    CycleNext,
    CyclePrev,
    Approve,
    Submit,

    // Input editing
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    view: View,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if input_mode == InputMode::Editing {
        return handle_editing_keys(key);
    }

    // Global keys in normal mode
    match key.code {
        KeyCode::Char('1') => return Some(UiEvent::SwitchView(View::Catalog)),
        KeyCode::Char('2') => return Some(UiEvent::SwitchView(View::Submit)),
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('w') => return Some(UiEvent::ConnectWallet),
        KeyCode::Char('d') => return Some(UiEvent::DisconnectWallet),
        KeyCode::Char('r') => return Some(UiEvent::Refresh),
        _ => {}
    }

    match view {
        View::Catalog => handle_catalog_keys(key),
        View::Submit => handle_submit_keys(key),
    }
}

fn handle_catalog_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('c') => Some(UiEvent::CycleCategory),
        KeyCode::Char('a') => Some(UiEvent::CycleAudience),
        KeyCode::Char('x') => Some(UiEvent::ClearFilters),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Char('n') => Some(UiEvent::NextPage),
        KeyCode::Char('p') => Some(UiEvent::PrevPage),
        KeyCode::Char('s') => Some(UiEvent::SwitchView(View::Submit)),
        _ => None,
    }
}

fn handle_submit_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditField),
        KeyCode::Right => Some(UiEvent::CycleNext),
        KeyCode::Left => Some(UiEvent::CyclePrev),
        KeyCode::Char('a') => Some(UiEvent::Approve),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('b') | KeyCode::Esc => Some(UiEvent::Back),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_editing_swallows_shortcuts() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), View::Submit, InputMode::Editing, false);
        assert_eq!(event, Some(UiEvent::CharInput('q')));

        let event = key_to_ui_event(press(KeyCode::Char('q')), View::Submit, InputMode::Normal, false);
        assert_eq!(event, Some(UiEvent::Quit));
    }

    #[test]
    fn test_view_specific_bindings() {
        let a = press(KeyCode::Char('a'));
        assert_eq!(key_to_ui_event(a, View::Catalog, InputMode::Normal, false), Some(UiEvent::CycleAudience));
        assert_eq!(key_to_ui_event(a, View::Submit, InputMode::Normal, false), Some(UiEvent::Approve));

        let s = press(KeyCode::Char('s'));
        assert_eq!(
            key_to_ui_event(s, View::Catalog, InputMode::Normal, false),
            Some(UiEvent::SwitchView(View::Submit))
        );
        assert_eq!(key_to_ui_event(s, View::Submit, InputMode::Normal, false), Some(UiEvent::Submit));
    }

    #[test]
    fn test_help_popup_closes_on_any_key() {
        let event = key_to_ui_event(press(KeyCode::Char('w')), View::Catalog, InputMode::Normal, true);
        assert_eq!(event, Some(UiEvent::CloseHelp));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, View::Catalog, InputMode::Normal, true), Some(UiEvent::Quit));
    }
}
