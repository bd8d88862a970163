use crossterm::event::KeyEvent;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextCard,
    PrevCard,
    FirstCard,
    LastCard,
    PendingG, // First 'g' press, waiting for the second
    ToggleLooping,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Any key closes the help overlay
    if app.mode == Mode::Help {
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    // Second half of a "gg" sequence
    if app.pending_key == Some('g') {
        if keymap.is_g_prefix(&binding) {
            if let Some(action) = keymap.pending_g_action() {
                return *action;
            }
        }
        // Any other key abandons the sequence and is handled normally below
    } else if keymap.is_g_prefix(&binding) {
        return Action::PendingG;
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}
