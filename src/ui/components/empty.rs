//! Centred placeholder text.

use crate::layout::Rect;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

pub fn render_empty_state(rect: Rect, empty: &EmptyState, theme: &Theme) {
    let middle = rect.height / 2;
    for offset in 0..rect.height {
        position_cursor(rect.y + offset + 1, rect.x + 1);
        if offset + 1 == middle {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
            print!("{}", centred(&empty.message, rect.width));
        } else if offset == middle {
            print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
            print!("{}", centred(&empty.subtitle, rect.width));
        } else {
            print!("{}", " ".repeat(rect.width));
        }
        print!("{}", Theme::reset());
    }
}

pub fn render_message(rect: Rect, text: &str, is_error: bool, theme: &Theme) {
    let color = if is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_dim
    };

    let lines: Vec<&str> = text.lines().collect();
    for offset in 0..rect.height {
        position_cursor(rect.y + offset + 1, rect.x + 1);
        match offset.checked_sub(1).and_then(|i| lines.get(i)) {
            Some(line) => {
                print!("{}", Theme::fg(color));
                print!("{}", fit(&format!(" {line}"), rect.width));
                print!("{}", Theme::reset());
            }
            None => print!("{}", " ".repeat(rect.width)),
        }
    }
}

fn centred(text: &str, width: usize) -> String {
    let len = text.chars().count().min(width);
    let padding = (width - len) / 2;
    fit(&format!("{}{text}", " ".repeat(padding)), width)
}
