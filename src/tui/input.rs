//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages.

use super::messages::AppMsg;

/// Maps a key event to an application message.
///
/// Printable characters edit the review, so every command uses a
/// non-printable key or the Control modifier. Returns `None` for
/// unrecognised key events, allowing them to be ignored.
#[must_use]
#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
pub fn map_key_to_message(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    use crossterm::event::{KeyCode, KeyModifiers};

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.key {
        KeyCode::Char('c') if control => Some(AppMsg::Quit),
        KeyCode::Char('u') if control => Some(AppMsg::ClearInput),
        KeyCode::Char(character) if !control => Some(AppMsg::InsertChar(character)),
        KeyCode::Backspace => Some(AppMsg::Backspace),
        KeyCode::Enter => Some(AppMsg::AnalyzeRequested),
        KeyCode::Tab => Some(AppMsg::ToggleRawOutput),
        KeyCode::F(1) => Some(AppMsg::ToggleHelp),
        KeyCode::Esc => Some(AppMsg::Quit),
        _ => None,
    }
}
