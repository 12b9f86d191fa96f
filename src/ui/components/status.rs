//! Global status bar: mode label, then the prompt, the command error or the
//! current hint, and the focused window on the right.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusBar;

pub fn render_status_bar(status: &StatusBar, theme: &Theme, cols: usize) {
    position_cursor(status.row + 1, 1);

    let label = format!(" {} ", status.mode);
    let label_len = label.chars().count().min(cols);
    print!("{}", Theme::bold());
    print!("{}{}", Theme::fg(&theme.colors.mode_fg), Theme::bg(&theme.colors.mode_bg));
    print!("{}", fit(&label, label_len));
    print!("{}", Theme::reset());

    let position = format!(" {} ", status.position);
    let remaining = cols - label_len;
    let position_len = position.chars().count();
    let (middle_width, show_position) = if remaining > position_len + 8 {
        (remaining - position_len, true)
    } else {
        (remaining, false)
    };

    if let Some(prompt) = &status.prompt {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(&format!(" {}{}█", prompt.glyph, prompt.buffer), middle_width));
    } else if let Some(error) = &status.error {
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("{}", fit(&format!(" {error}"), middle_width));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", fit(&format!(" {}", status.hint), middle_width));
    }
    print!("{}", Theme::reset());

    if show_position {
        print!("{}{position}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }
}
