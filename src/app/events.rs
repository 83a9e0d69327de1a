// ABOUTME: Event handling for keyboard input in the toast playground
// Maps keys to app events and applies them to the application state

use crate::app::AppState;
use crate::notify::ToastKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    ShowToast(ToastKind),
    ShowPersistentToast,
    ShowStatusMessage,
    ClearStatusMessage,
    RemoveOldestToast,
    ClearToasts,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('i') => Some(AppEvent::ShowToast(ToastKind::Info)),
            KeyCode::Char('s') => Some(AppEvent::ShowToast(ToastKind::Success)),
            KeyCode::Char('w') => Some(AppEvent::ShowToast(ToastKind::Warning)),
            KeyCode::Char('e') => Some(AppEvent::ShowToast(ToastKind::Error)),
            KeyCode::Char('p') => Some(AppEvent::ShowPersistentToast),
            KeyCode::Char('m') => Some(AppEvent::ShowStatusMessage),
            KeyCode::Char('M') => Some(AppEvent::ClearStatusMessage),
            KeyCode::Char('x') => Some(AppEvent::RemoveOldestToast),
            KeyCode::Char('c') => Some(AppEvent::ClearToasts),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::ShowToast(kind) => state.show_toast(kind),
            AppEvent::ShowPersistentToast => state.show_persistent_toast(),
            AppEvent::ShowStatusMessage => state.show_status_message(),
            AppEvent::ClearStatusMessage => {
                state.store.clear_message();
                state.mark_dirty();
            }
            AppEvent::RemoveOldestToast => {
                if let Err(e) = state.remove_oldest_toast() {
                    warn!("Failed to remove toast: {}", e);
                }
            }
            AppEvent::ClearToasts => {
                if let Err(e) = state.clear_toasts() {
                    warn!("Failed to clear toasts: {}", e);
                }
            }
        }
    }
}
