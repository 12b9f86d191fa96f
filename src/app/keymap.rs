//! Keyboard events and the normal-mode keymap.
//!
//! [`KeyInput`] is the library's own key type; the plugin shim converts
//! Zellij's `KeyWithModifier` into it so the state machine can be driven
//! without a running host.

use crate::layout::Direction;
use crate::windows::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    PageUp,
    PageDown,
    Tab,
    /// Any key the controller does not act on.
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyInput {
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers {
                ctrl: false,
                alt: false,
            },
        }
    }

    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: Modifiers {
                ctrl: true,
                alt: false,
            },
        }
    }

    /// The character to append to a prompt, if this is a plain printable key.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt && !c.is_control() => {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Which way a resize moves the focused side of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeSign {
    Grow,
    Shrink,
}

/// Which way a zoom key changes the viewer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    In,
    Out,
    Reset,
}

/// What a key means in normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalCommand {
    FocusWindow(WindowId),
    OpenExplorer,
    Back,
    EnterCommand,
    EnterSearch,
    /// Move the explorer cursor or scroll the viewer by rows.
    Move(isize),
    /// Move by one pane height; positive is down.
    Page(isize),
    Resize(Direction, ResizeSign),
    Zoom(ZoomChange),
    Open,
    OpenInEditor,
}

/// Looks up a key in the normal-mode keymap.
#[must_use]
pub fn normal_command(key: &KeyInput) -> Option<NormalCommand> {
    let Modifiers { ctrl, alt } = key.modifiers;
    if alt {
        return None;
    }

    let command = match (key.code, ctrl) {
        (KeyCode::Char(c @ '1'..='9'), true) => {
            NormalCommand::FocusWindow(c.to_digit(10).unwrap_or_default())
        }
        (KeyCode::Char('n'), true) => NormalCommand::OpenExplorer,
        (KeyCode::Char('b'), true) => NormalCommand::Back,
        (_, true) => return None,

        (KeyCode::Char(':'), false) => NormalCommand::EnterCommand,
        (KeyCode::Char('/'), false) => NormalCommand::EnterSearch,
        (KeyCode::Char('j') | KeyCode::Down, false) => NormalCommand::Move(1),
        (KeyCode::Char('k') | KeyCode::Up, false) => NormalCommand::Move(-1),
        (KeyCode::PageDown, false) => NormalCommand::Page(1),
        (KeyCode::PageUp, false) => NormalCommand::Page(-1),
        (KeyCode::Char('H'), false) => NormalCommand::Resize(Direction::Vertical, ResizeSign::Shrink),
        (KeyCode::Char('L'), false) => NormalCommand::Resize(Direction::Vertical, ResizeSign::Grow),
        (KeyCode::Char('J'), false) => {
            NormalCommand::Resize(Direction::Horizontal, ResizeSign::Shrink)
        }
        (KeyCode::Char('K'), false) => NormalCommand::Resize(Direction::Horizontal, ResizeSign::Grow),
        (KeyCode::Char('+'), false) => NormalCommand::Zoom(ZoomChange::In),
        (KeyCode::Char('-'), false) => NormalCommand::Zoom(ZoomChange::Out),
        (KeyCode::Char('='), false) => NormalCommand::Zoom(ZoomChange::Reset),
        (KeyCode::Enter, false) => NormalCommand::Open,
        (KeyCode::Char('e'), false) => NormalCommand::OpenInEditor,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_digits_focus_windows() {
        assert_eq!(
            normal_command(&KeyInput::ctrl('3')),
            Some(NormalCommand::FocusWindow(3))
        );
        assert_eq!(normal_command(&KeyInput::ctrl('0')), None);
        assert_eq!(normal_command(&KeyInput::char('3')), None);
    }

    #[test]
    fn letters_and_arrows_share_bindings() {
        assert_eq!(normal_command(&KeyInput::char('j')), Some(NormalCommand::Move(1)));
        assert_eq!(
            normal_command(&KeyInput::plain(KeyCode::Down)),
            Some(NormalCommand::Move(1))
        );
        assert_eq!(
            normal_command(&KeyInput::plain(KeyCode::Up)),
            Some(NormalCommand::Move(-1))
        );
    }

    #[test]
    fn resize_keys_are_case_sensitive() {
        assert_eq!(
            normal_command(&KeyInput::char('H')),
            Some(NormalCommand::Resize(Direction::Vertical, ResizeSign::Shrink))
        );
        assert_eq!(
            normal_command(&KeyInput::char('K')),
            Some(NormalCommand::Resize(Direction::Horizontal, ResizeSign::Grow))
        );
        assert_eq!(normal_command(&KeyInput::char('h')), None);
    }

    #[test]
    fn alt_chords_are_unbound() {
        let key = KeyInput {
            code: KeyCode::Char('j'),
            modifiers: Modifiers { ctrl: false, alt: true },
        };
        assert_eq!(normal_command(&key), None);
        assert_eq!(key.printable(), None);
    }

    #[test]
    fn printable_rejects_ctrl() {
        assert_eq!(KeyInput::char('x').printable(), Some('x'));
        assert_eq!(KeyInput::ctrl('x').printable(), None);
        assert_eq!(KeyInput::plain(KeyCode::Enter).printable(), None);
    }
}
