//! Key mapping

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::ViewKind;
use crate::api::Choice;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,

    // Selection
    Select,
    Back,

    // View actions
    TakeQuiz,
    Speak,
    Choose(Choice),
    ClearAnswer,
    Submit,
    Reload,

    // Modes
    Command,
    Help,
    Quit,
}

/// Map a key press to an action for the given view
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, view: ViewKind) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('b') => Some(Action::PageUp),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    if view == ViewKind::Quiz {
        if let Some(action) = quiz_key_to_action(key) {
            return Some(action);
        }
    }

    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Some(Action::Select),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
            Some(Action::Back)
        }
        KeyCode::Char('m') => Some(Action::TakeQuiz),
        KeyCode::Char('s') => Some(Action::Speak),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Quiz-only keys: option letters take precedence over navigation
fn quiz_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(c @ ('a' | 'b' | 'c' | 'd' | 'A' | 'B' | 'C' | 'D')) => {
            Choice::from_letter(c).map(Action::Choose)
        }
        KeyCode::Char(c @ '1'..='4') => {
            Choice::from_index(c as usize - '1' as usize).map(Action::Choose)
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => Some(Action::ClearAnswer),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab => Some(Action::Down),
        KeyCode::BackTab => Some(Action::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: KeyCode, view: ViewKind) -> Option<Action> {
        key_to_action(key, KeyModifiers::NONE, view)
    }

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(plain(KeyCode::Char('j'), ViewKind::Units), Some(Action::Down));
    }

    #[test]
    fn vim_k_maps_to_up() {
        assert_eq!(plain(KeyCode::Char('k'), ViewKind::Chapter), Some(Action::Up));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(plain(KeyCode::Char('z'), ViewKind::Units), None);
    }

    #[test]
    fn letters_choose_in_quiz() {
        assert_eq!(plain(KeyCode::Char('b'), ViewKind::Quiz), Some(Action::Choose(Choice::B)));
        assert_eq!(plain(KeyCode::Char('D'), ViewKind::Quiz), Some(Action::Choose(Choice::D)));
        assert_eq!(plain(KeyCode::Char('3'), ViewKind::Quiz), Some(Action::Choose(Choice::C)));
    }

    #[test]
    fn letters_do_not_choose_outside_quiz() {
        assert_eq!(plain(KeyCode::Char('a'), ViewKind::Chapter), None);
        assert_eq!(plain(KeyCode::Char('1'), ViewKind::Units), None);
    }

    #[test]
    fn enter_submits_in_quiz_and_selects_elsewhere() {
        assert_eq!(plain(KeyCode::Enter, ViewKind::Quiz), Some(Action::Submit));
        assert_eq!(plain(KeyCode::Enter, ViewKind::Units), Some(Action::Select));
    }

    #[test]
    fn escape_goes_back_everywhere() {
        for view in [ViewKind::Units, ViewKind::Chapter, ViewKind::Quiz] {
            assert_eq!(plain(KeyCode::Esc, view), Some(Action::Back));
        }
    }

    #[test]
    fn chapter_actions() {
        assert_eq!(plain(KeyCode::Char('m'), ViewKind::Chapter), Some(Action::TakeQuiz));
        assert_eq!(plain(KeyCode::Char('s'), ViewKind::Chapter), Some(Action::Speak));
    }

    #[test]
    fn ctrl_d_half_page_down() {
        assert_eq!(
            key_to_action(KeyCode::Char('d'), KeyModifiers::CONTROL, ViewKind::Quiz),
            Some(Action::HalfPageDown)
        );
    }
}
