use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::audio::Speed;

use super::model::Action;

/// Map a key press to an [`Action`].
///
/// `1`..`8` pick a speed directly, in selector order (25% .. 200%).
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') | KeyCode::Enter => Action::Play,
        KeyCode::Char('s') => Action::Pause,
        KeyCode::Char(' ') => Action::TogglePlayPause,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('h') | KeyCode::Left => Action::Previous,
        KeyCode::Char('l') | KeyCode::Right => Action::Next,
        KeyCode::Char(']') => Action::SpeedUp,
        KeyCode::Char('[') => Action::SpeedDown,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::VolumeUp,
        KeyCode::Char('-') | KeyCode::Down => Action::VolumeDown,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char(c @ '1'..='8') => {
            let idx = c as usize - '1' as usize;
            Action::SelectSpeed(Speed::ALL[idx])
        }
        _ => return None,
    };
    Some(action)
}
