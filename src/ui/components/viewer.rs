//! Viewer lines, already scrolled and windowed by the view model.

use crate::layout::Rect;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;

pub fn render_lines(rect: Rect, lines: &[String], theme: &Theme) {
    print!("{}", Theme::fg(&theme.colors.text_normal));
    for offset in 0..rect.height {
        position_cursor(rect.y + offset + 1, rect.x + 1);
        let line = lines.get(offset).map_or("", String::as_str);
        print!("{}", fit(line, rect.width));
    }
    print!("{}", Theme::reset());
}
