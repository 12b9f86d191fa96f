//! Explorer rows: one entry per line, directories suffixed with `/`.

use crate::layout::Rect;
use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

pub fn render_entries(rect: Rect, items: &[DisplayItem], theme: &Theme) {
    for offset in 0..rect.height {
        position_cursor(rect.y + offset + 1, rect.x + 1);
        match items.get(offset) {
            Some(item) => render_entry(item, theme, rect.width),
            None => print!("{}", " ".repeat(rect.width)),
        }
    }
}

fn render_entry(item: &DisplayItem, theme: &Theme, width: usize) {
    let style = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else if item.is_dir {
        Theme::fg(&theme.colors.directory_fg)
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{style}");

    let marker: String = if item.is_selected { "> " } else { "  " }
        .chars()
        .take(width)
        .collect();
    print!("{marker}");
    let mut used = marker.len();

    used += helpers::render_highlighted_text(
        &item.name,
        &item.highlight_ranges,
        theme,
        &style,
        width - used,
    );
    if item.is_dir && used < width {
        print!("/");
        used += 1;
    }

    if !item.detail.is_empty() && used + 2 < width {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", fit(&format!("  {}", item.detail), width - used));
        used = width;
    }

    print!("{}", " ".repeat(width - used));
    print!("{}", Theme::reset());
}
