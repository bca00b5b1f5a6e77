//! Event handling for keyboard and mouse input

use crate::{LookupError, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Event handler for TUI input
pub struct EventHandler;

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self
    }

    /// Poll for the next event with timeout
    pub fn next_event(&self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)
            .map_err(|e| LookupError::TuiError(format!("Event polling failed: {}", e)))?
        {
            let event = event::read()
                .map_err(|e| LookupError::TuiError(format!("Event reading failed: {}", e)))?;
            Ok(Some(event))
        } else {
            Ok(None)
        }
    }

    /// Handle a mouse event and return the action to take
    pub fn handle_mouse_event(&self, event: MouseEvent) -> MouseAction {
        match event.kind {
            MouseEventKind::ScrollUp => MouseAction::ScrollUp,
            MouseEventKind::ScrollDown => MouseAction::ScrollDown,
            _ => MouseAction::None,
        }
    }

    /// Handle a key event and return the action to take
    pub fn handle_key_event(&self, event: KeyEvent) -> KeyAction {
        // Windows reports releases too
        if event.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        match event {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => KeyAction::Quit,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => KeyAction::Quit,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => KeyAction::Submit,
            KeyEvent {
                code: KeyCode::Char('u'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => KeyAction::ClearInput,
            KeyEvent {
                code: KeyCode::Up, ..
            } => KeyAction::ScrollUp,
            KeyEvent {
                code: KeyCode::Down,
                ..
            } => KeyAction::ScrollDown,
            KeyEvent {
                code: KeyCode::PageUp,
                ..
            } => KeyAction::PageUp,
            KeyEvent {
                code: KeyCode::PageDown,
                ..
            } => KeyAction::PageDown,
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => KeyAction::InputChar(c),
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => KeyAction::DeleteChar,
            _ => KeyAction::None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq)]
pub enum KeyAction {
    Quit,
    Submit,
    ClearInput,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    InputChar(char),
    DeleteChar,
    None,
}

#[derive(Debug, PartialEq)]
pub enum MouseAction {
    None,
    ScrollUp,
    ScrollDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_key_action(key_code: KeyCode, modifiers: KeyModifiers, expected: KeyAction) {
        let handler = EventHandler::new();
        let event = KeyEvent::new(key_code, modifiers);
        assert_eq!(handler.handle_key_event(event), expected);
    }

    fn create_mouse_event(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_mappings_data_driven() {
        let test_cases = [
            (KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit),
            (KeyCode::Enter, KeyModifiers::NONE, KeyAction::Submit),
            (KeyCode::Char('s'), KeyModifiers::CONTROL, KeyAction::Submit),
            (KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::ClearInput),
            (KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp),
            (KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown),
            (KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp),
            (KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown),
            (KeyCode::Backspace, KeyModifiers::NONE, KeyAction::DeleteChar),
            (KeyCode::Char('A'), KeyModifiers::SHIFT, KeyAction::InputChar('A')),
            (KeyCode::F(1), KeyModifiers::NONE, KeyAction::None),
            (KeyCode::Char('a'), KeyModifiers::ALT, KeyAction::None),
        ];

        for (key_code, modifiers, expected) in test_cases {
            assert_key_action(key_code, modifiers, expected);
        }

        let chars = ['a', 'é', 'ç', '1', '-', ' ', '\''];
        for c in chars {
            assert_key_action(KeyCode::Char(c), KeyModifiers::NONE, KeyAction::InputChar(c));
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let handler = EventHandler::new();
        let mut event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key_event(event), KeyAction::None);
    }

    #[test]
    fn test_mouse_event_handler() {
        let handler = EventHandler::new();
        assert_eq!(
            handler.handle_mouse_event(create_mouse_event(MouseEventKind::ScrollUp)),
            MouseAction::ScrollUp
        );
        assert_eq!(
            handler.handle_mouse_event(create_mouse_event(MouseEventKind::ScrollDown)),
            MouseAction::ScrollDown
        );
        assert_eq!(
            handler.handle_mouse_event(create_mouse_event(MouseEventKind::Moved)),
            MouseAction::None
        );
    }
}
