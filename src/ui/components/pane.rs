//! One window: a title row followed by its body.

use super::{empty, explorer, viewer};
use crate::layout::Rect;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PaneBody, PaneTitle, PaneView};

pub fn render_pane(pane: &PaneView, theme: &Theme) {
    if pane.rect.is_empty() {
        return;
    }

    render_title(pane.rect, &pane.title, pane.focused, theme);

    let body = Rect::new(
        pane.rect.x,
        pane.rect.y + 1,
        pane.rect.width,
        pane.rect.height - 1,
    );
    match &pane.body {
        PaneBody::Empty(state) => empty::render_empty_state(body, state, theme),
        PaneBody::Message { text, is_error } => {
            empty::render_message(body, text, *is_error, theme);
        }
        PaneBody::Entries(items) => explorer::render_entries(body, items, theme),
        PaneBody::Lines(lines) => viewer::render_lines(body, lines, theme),
    }
}

fn render_title(rect: Rect, title: &PaneTitle, focused: bool, theme: &Theme) {
    let (fg, bg) = if focused {
        (&theme.colors.title_fg, &theme.colors.title_bg)
    } else {
        (&theme.colors.title_inactive_fg, &theme.colors.title_inactive_bg)
    };

    let left = format!(" {} {} {}", title.id, title.kind, title.text);
    let right = if focused {
        format!("{}  FOCUS ", title.note)
    } else {
        format!("{} ", title.note)
    };
    let right_len = right.chars().count();
    let left_width = rect.width.saturating_sub(right_len);

    position_cursor(rect.y + 1, rect.x + 1);
    print!("{}{}", Theme::fg(fg), Theme::bg(bg));
    if focused {
        print!("{}", Theme::bold());
    }
    if left_width == 0 {
        print!("{}", fit(&left, rect.width));
    } else {
        print!("{}{right}", fit(&left, left_width));
    }
    print!("{}", Theme::reset());
}
