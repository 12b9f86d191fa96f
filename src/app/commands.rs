//! Editor command line grammar.

use crate::layout::Direction;
use thiserror::Error;

/// A parsed `:` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// `q`: close the focused window.
    Quit,
    /// `spl` / `vspl`: split the focused window.
    Split(Direction),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("E492: Not an editor command: {0}")]
    NotAnEditorCommand(String),
}

impl EditorCommand {
    /// Parses a command line. Surrounding whitespace is ignored; an empty line
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotAnEditorCommand`] for anything other than
    /// `q`, `spl` or `vspl`.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        match input.trim() {
            "" => Ok(None),
            "q" => Ok(Some(Self::Quit)),
            "spl" => Ok(Some(Self::Split(Direction::Horizontal))),
            "vspl" => Ok(Some(Self::Split(Direction::Vertical))),
            other => Err(CommandError::NotAnEditorCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(EditorCommand::parse("q"), Ok(Some(EditorCommand::Quit)));
        assert_eq!(
            EditorCommand::parse(" spl "),
            Ok(Some(EditorCommand::Split(Direction::Horizontal)))
        );
        assert_eq!(
            EditorCommand::parse("vspl"),
            Ok(Some(EditorCommand::Split(Direction::Vertical)))
        );
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert_eq!(EditorCommand::parse(""), Ok(None));
        assert_eq!(EditorCommand::parse("   "), Ok(None));
    }

    #[test]
    fn unknown_command_reports_e492() {
        let err = EditorCommand::parse("xyz").unwrap_err();
        assert_eq!(err.to_string(), "E492: Not an editor command: xyz");
        assert!(EditorCommand::parse("Q").is_err());
        assert!(EditorCommand::parse("q!").is_err());
    }
}
