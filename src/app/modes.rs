//! Input mode and prompt state.
//!
//! The controller is always in exactly one [`InputMode`]. `Command` and
//! `Search` collect characters into a [`Prompt`] until Enter or Escape.
//!
//! ```text
//!            ':'                       '/' (explorer focused)
//!   Normal ───────▶ Command    Normal ───────────────────────▶ Search
//!     ▲               │          ▲                               │
//!     └─ Enter / Esc ─┘          └────────── Enter / Esc ────────┘
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are window commands from the normal-mode keymap.
    #[default]
    Normal,
    /// Keys edit an editor command line.
    Command,
    /// Keys edit a recursive search query.
    Search,
}

impl InputMode {
    /// Glyph shown in front of the prompt buffer.
    #[must_use]
    pub const fn prompt_glyph(self) -> Option<char> {
        match self {
            Self::Normal => None,
            Self::Command => Some(':'),
            Self::Search => Some('/'),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Command => "COMMAND",
            Self::Search => "SEARCH",
        }
    }
}

/// Text typed in command or search mode, plus the last command error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    pub buffer: String,
    pub error: Option<String>,
}

impl Prompt {
    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Drops the last character; no-op when empty.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.error = None;
    }

    /// Returns the buffer and leaves it empty. The error is kept.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
