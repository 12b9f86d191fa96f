//! Composable UI component renderers.
//!
//! - `pane`: Title row and body dispatch for one window
//! - `explorer`: Directory listing and search result rows
//! - `viewer`: Text, hex and document summary lines
//! - `empty`: Placeholder for empty windows and single-line messages
//! - `status`: Global status bar with mode, prompt and hint
//!
//! Every component draws inside the rectangle it is given and pads each
//! row to the full width, so a frame never shows stale cells.

mod empty;
mod explorer;
mod pane;
mod status;
mod viewer;

pub use pane::render_pane;
pub use status::render_status_bar;

use crate::layout::Separator;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

pub fn render_separators(separators: &[Separator], theme: &Theme) {
    print!("{}", Theme::fg(&theme.colors.border));
    for separator in separators {
        for row in separator.y..separator.y + separator.height {
            position_cursor(row + 1, separator.x + 1);
            print!("│");
        }
    }
    print!("{}", Theme::reset());
}
