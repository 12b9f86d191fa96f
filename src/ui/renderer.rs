//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI output
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Draws the whole plugin area: every pane, the separators between
/// side-by-side panes and the status bar on the last row.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows == 0 || cols == 0 {
        return;
    }

    for pane in &vm.panes {
        components::render_pane(pane, theme);
    }
    components::render_separators(&vm.separators, theme);
    components::render_status_bar(&vm.status, theme, cols);
}
