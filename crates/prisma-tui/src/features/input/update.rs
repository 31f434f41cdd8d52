//! Line-editing keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::InputState;

/// Applies an editing key to the input. Returns false if the key is not an
/// editing key, leaving it for the caller.
pub fn handle_edit_key(input: &mut InputState, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('a') if ctrl => input.move_home(),
        KeyCode::Char('e') if ctrl => input.move_end(),
        KeyCode::Char('u') if ctrl => input.kill_to_start(),
        KeyCode::Char(c) if !ctrl && !alt => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}
