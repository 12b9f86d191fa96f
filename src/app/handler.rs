//! Event handling: the modal input state machine.
//!
//! [`handle_event`] is the only place [`AppState`] changes. Keys are routed by
//! [`InputMode`]: normal-mode keys go through the keymap, command and search
//! keys edit the prompt. Worker responses are handed to the window lifecycle.
//! The result is a redraw flag plus the [`Action`]s the shim must execute.

use super::commands::EditorCommand;
use super::keymap::{normal_command, KeyCode, KeyInput, NormalCommand, ResizeSign, ZoomChange};
use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::infrastructure::paths::join_path;
use crate::layout::{Direction, TreeError};
use crate::windows::{Buffer, Effect, WindowId};
use crate::worker::WorkerResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyInput),

    /// Left mouse button pressed at a zero-based cell.
    PointerDown { row: usize, col: usize },

    WorkerResponse(WorkerResponse),

    /// Result of the startup permission request.
    PermissionsResult { granted: bool },
}

/// Processes an event and returns whether to redraw plus the actions to run.
///
/// # Errors
///
/// Currently infallible: rejected operations become status hints. The
/// `Result` lets the shim log failures uniformly.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    match event {
        Event::Key(key) => Ok(match state.mode {
            InputMode::Normal => handle_normal_key(state, key),
            InputMode::Command | InputMode::Search => handle_prompt_key(state, key),
        }),
        Event::PointerDown { row, col } => Ok(handle_pointer_down(state, *row, *col)),
        Event::WorkerResponse(response) => {
            let effect = state.workspace.apply_response(response.clone());
            Ok(apply_effect(state, effect))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!("permissions granted");
            } else {
                tracing::warn!("permissions denied");
                state.set_hint("Permissions denied: file access is unavailable.");
            }
            Ok((true, vec![]))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Key(_) => "key",
        Event::PointerDown { .. } => "pointer_down",
        Event::WorkerResponse(_) => "worker_response",
        Event::PermissionsResult { .. } => "permissions_result",
    }
}

/// Records an effect's hint and turns its request into an action.
fn apply_effect(state: &mut AppState, effect: Effect) -> (bool, Vec<Action>) {
    let changed = effect.hint.is_some() || effect.request.is_some();
    if let Some(hint) = effect.hint {
        state.set_hint(hint);
    }
    let actions = effect
        .request
        .map(Action::PostToWorker)
        .into_iter()
        .collect();
    (changed, actions)
}

fn focus(state: &mut AppState, id: WindowId) -> bool {
    if state.workspace.focus_window(id) {
        state.set_hint(format!("Focused window {id}."));
        true
    } else {
        false
    }
}

/// Focuses the pane under the pointer. On an explorer row the cursor moves
/// there; clicking the selected row of the focused explorer opens it.
fn handle_pointer_down(state: &mut AppState, row: usize, col: usize) -> (bool, Vec<Action>) {
    let layout = state.workspace.layout(state.pane_area());
    let Some(id) = layout.pane_at(row, col) else {
        return (false, vec![]);
    };

    let was_focused = id == state.workspace.focused_id();
    if !was_focused && !focus(state, id) {
        return (false, vec![]);
    }

    let Some(index) = layout
        .rect_of(id)
        .and_then(|rect| state.explorer_row_at(id, rect, row))
    else {
        return (!was_focused, vec![]);
    };

    let Some(explorer) = state.workspace.focused_window_mut().and_then(|w| w.explorer_mut()) else {
        return (!was_focused, vec![]);
    };
    if was_focused && explorer.cursor == index {
        let effect = state.workspace.explorer_enter(id);
        let (_, actions) = apply_effect(state, effect);
        return (true, actions);
    }

    let moved = explorer.cursor != index;
    explorer.cursor = index;
    (moved || !was_focused, vec![])
}

fn handle_prompt_key(state: &mut AppState, key: &KeyInput) -> (bool, Vec<Action>) {
    match key.code {
        KeyCode::Escape => {
            state.prompt.clear();
            state.mode = InputMode::Normal;
            state.set_hint("");
            (true, vec![])
        }
        KeyCode::Enter => {
            let input = state.prompt.take();
            state.prompt.clear();
            let mode = std::mem::replace(&mut state.mode, InputMode::Normal);
            match mode {
                InputMode::Search => {
                    let id = state.workspace.focused_id();
                    let effect = state.workspace.submit_search(id, &input);
                    let (_, actions) = apply_effect(state, effect);
                    (true, actions)
                }
                InputMode::Command | InputMode::Normal => {
                    run_command(state, &input);
                    (true, vec![])
                }
            }
        }
        KeyCode::Backspace => {
            state.prompt.backspace();
            (true, vec![])
        }
        _ => key.printable().map_or((false, vec![]), |c| {
            state.prompt.push(c);
            (true, vec![])
        }),
    }
}

fn run_command(state: &mut AppState, input: &str) {
    let _span = tracing::debug_span!("run_command", input = %input).entered();

    let command = match EditorCommand::parse(input) {
        Ok(Some(command)) => command,
        Ok(None) => {
            state.set_hint("");
            return;
        }
        Err(e) => {
            let message = e.to_string();
            tracing::debug!(error = %message, "command rejected");
            state.prompt.error = Some(message.clone());
            state.set_hint(message);
            return;
        }
    };

    match command {
        EditorCommand::Quit => match state.workspace.close_focused() {
            Ok(closed) => state.set_hint(format!("Closed window {closed}.")),
            Err(e) => state.set_hint(e.to_string()),
        },
        EditorCommand::Split(direction) => match state.workspace.split_focused(direction) {
            Ok(created) => {
                let label = match direction {
                    Direction::Vertical => "Vertical",
                    Direction::Horizontal => "Horizontal",
                };
                state.set_hint(format!("{label} split created (new window {created})."));
            }
            Err(TreeError::NotFound(id)) => {
                tracing::debug!(window = id, "split target missing from tree");
            }
            Err(e) => state.set_hint(e.to_string()),
        },
    }
}

fn handle_normal_key(state: &mut AppState, key: &KeyInput) -> (bool, Vec<Action>) {
    let Some(command) = normal_command(key) else {
        return (false, vec![]);
    };
    let focused = state.workspace.focused_id();

    match command {
        NormalCommand::FocusWindow(id) => (focus(state, id), vec![]),
        NormalCommand::OpenExplorer => {
            let effect = state.workspace.open_explorer(focused);
            let (_, actions) = apply_effect(state, effect);
            (true, actions)
        }
        NormalCommand::Back => {
            let effect = state.workspace.navigate_up(focused);
            apply_effect(state, effect)
        }
        NormalCommand::EnterCommand => {
            state.prompt.clear();
            state.mode = InputMode::Command;
            state.set_hint("COMMAND");
            (true, vec![])
        }
        NormalCommand::EnterSearch => {
            let is_explorer = state
                .focused_window()
                .is_some_and(|w| matches!(w.buffer, Buffer::Explorer(_)));
            if is_explorer {
                state.prompt.clear();
                state.mode = InputMode::Search;
                state.set_hint("SEARCH");
            } else {
                state.set_hint("Search requires an explorer window.");
            }
            (true, vec![])
        }
        NormalCommand::Move(delta) => (move_focused(state, delta), vec![]),
        NormalCommand::Page(sign) => {
            let page = isize::try_from(state.focused_body_height()).unwrap_or(isize::MAX);
            (move_focused(state, sign.saturating_mul(page)), vec![])
        }
        NormalCommand::Resize(direction, sign) => {
            let step = state.controls.resize_step;
            let delta = match sign {
                ResizeSign::Grow => step,
                ResizeSign::Shrink => -step,
            };
            if let Err(e) = state.workspace.resize_focused(direction, delta) {
                state.set_hint(e.to_string());
            }
            (true, vec![])
        }
        NormalCommand::Zoom(change) => (zoom_focused(state, change), vec![]),
        NormalCommand::Open => {
            let effect = state.workspace.explorer_enter(focused);
            apply_effect(state, effect)
        }
        NormalCommand::OpenInEditor => open_in_editor(state),
    }
}

fn move_focused(state: &mut AppState, delta: isize) -> bool {
    match state.workspace.focused_window_mut().map(|w| &mut w.buffer) {
        Some(Buffer::Explorer(explorer)) => {
            let before = explorer.cursor;
            explorer.move_cursor(delta);
            explorer.cursor != before
        }
        Some(Buffer::Viewer(viewer)) => {
            let before = viewer.scroll;
            viewer.scroll_by(delta);
            viewer.scroll != before
        }
        Some(Buffer::Empty) | None => false,
    }
}

fn zoom_focused(state: &mut AppState, change: ZoomChange) -> bool {
    let step = state.controls.zoom_step;
    let Some(viewer) = state.workspace.focused_window_mut().and_then(|w| w.viewer_mut()) else {
        return false;
    };
    let zoomed = match change {
        ZoomChange::In => viewer.zoom_by(step),
        ZoomChange::Out => viewer.zoom_by(-step),
        ZoomChange::Reset => viewer.reset_zoom(),
    };
    if !zoomed {
        state.set_hint("Zoom applies to PDF documents only.");
    }
    true
}

fn open_in_editor(state: &mut AppState) -> (bool, Vec<Action>) {
    let path = state.focused_window().and_then(|w| match &w.buffer {
        Buffer::Explorer(explorer) => explorer.selected().filter(|e| !e.kind.is_dir()).map(|e| {
            e.full_path
                .clone()
                .unwrap_or_else(|| join_path(&explorer.cwd, &e.name))
        }),
        Buffer::Viewer(viewer) => Some(viewer.path.clone()),
        Buffer::Empty => None,
    });

    match path {
        Some(path) => {
            state.set_hint(format!("Editing {path}"));
            (true, vec![Action::OpenInEditor(path)])
        }
        None => {
            state.set_hint("No file to edit.");
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ControlSettings;
    use crate::domain::{Entry, EntryKind};
    use crate::ui::Theme;
    use crate::windows::WorkspaceSettings;
    use crate::worker::WorkerMessage;

    fn state() -> AppState {
        AppState::new(
            WorkspaceSettings::default(),
            ControlSettings::default(),
            Theme::default(),
        )
    }

    fn press(state: &mut AppState, key: KeyInput) -> (bool, Vec<Action>) {
        handle_event(state, &Event::Key(key)).expect("handled")
    }

    fn type_command(state: &mut AppState, text: &str) -> Vec<Action> {
        press(state, KeyInput::char(':'));
        for c in text.chars() {
            press(state, KeyInput::char(c));
        }
        press(state, KeyInput::plain(KeyCode::Enter)).1
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut state = state();
        press(&mut state, KeyInput::char(':'));
        assert_eq!(state.mode, InputMode::Command);
        assert_eq!(state.hint, "COMMAND");
    }

    #[test]
    fn unknown_command_sets_error_and_returns_to_normal() {
        let mut state = state();
        type_command(&mut state, "xyz");
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(
            state.prompt.error.as_deref(),
            Some("E492: Not an editor command: xyz")
        );
        assert_eq!(state.hint, "E492: Not an editor command: xyz");
    }

    #[test]
    fn escape_clears_prompt_and_hint() {
        let mut state = state();
        press(&mut state, KeyInput::char(':'));
        press(&mut state, KeyInput::char('v'));
        press(&mut state, KeyInput::plain(KeyCode::Escape));
        assert_eq!(state.mode, InputMode::Normal);
        assert!(state.prompt.buffer.is_empty());
        assert!(state.hint.is_empty());
    }

    #[test]
    fn vspl_then_q() {
        let mut state = state();
        type_command(&mut state, "vspl");
        assert_eq!(state.hint, "Vertical split created (new window 2).");
        assert_eq!(state.workspace.tree().collect_leaves(), vec![1, 2]);
        assert_eq!(state.workspace.focused_id(), 1);

        type_command(&mut state, "q");
        assert_eq!(state.hint, "Closed window 1.");
        assert_eq!(state.workspace.tree().collect_leaves(), vec![2]);

        type_command(&mut state, "q");
        assert_eq!(state.hint, "Cannot close the last window.");
    }

    #[test]
    fn ctrl_digit_focuses_existing_windows_only() {
        let mut state = state();
        type_command(&mut state, "spl");
        assert!(press(&mut state, KeyInput::ctrl('2')).0);
        assert_eq!(state.hint, "Focused window 2.");
        assert!(!press(&mut state, KeyInput::ctrl('7')).0);
        assert_eq!(state.workspace.focused_id(), 2);
    }

    #[test]
    fn ctrl_n_requests_listing() {
        let mut state = state();
        let (_, actions) = press(&mut state, KeyInput::ctrl('n'));
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::ListDirectory { path, .. })] if path == "/host"
        ));
    }

    #[test]
    fn search_requires_explorer() {
        let mut state = state();
        press(&mut state, KeyInput::char('/'));
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.hint, "Search requires an explorer window.");
    }

    #[test]
    fn empty_search_submit_reports_hint() {
        let mut state = state();
        press(&mut state, KeyInput::ctrl('n'));
        press(&mut state, KeyInput::char('/'));
        assert_eq!(state.mode, InputMode::Search);
        let (_, actions) = press(&mut state, KeyInput::plain(KeyCode::Enter));
        assert!(actions.is_empty());
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.hint, "Empty search.");
    }

    #[test]
    fn resize_without_split_reports_hint() {
        let mut state = state();
        press(&mut state, KeyInput::char('H'));
        assert_eq!(state.hint, "No vertical split to resize near focused window.");
        press(&mut state, KeyInput::char('K'));
        assert_eq!(state.hint, "No horizontal split to resize near focused window.");
    }

    #[test]
    fn pointer_down_focuses_pane() {
        let mut state = state();
        state.set_viewport(11, 81);
        type_command(&mut state, "vspl");
        let (redraw, _) =
            handle_event(&mut state, &Event::PointerDown { row: 3, col: 70 }).expect("handled");
        assert!(redraw);
        assert_eq!(state.workspace.focused_id(), 2);

        let (redraw, _) =
            handle_event(&mut state, &Event::PointerDown { row: 10, col: 0 }).expect("handled");
        assert!(!redraw);
    }

    fn listed_explorer(state: &mut AppState, names: &[&str]) {
        press(state, KeyInput::ctrl('n'));
        let id = state.workspace.focused_id();
        let generation = state.focused_window().map(|w| w.generation).expect("window");
        handle_event(
            state,
            &Event::WorkerResponse(WorkerResponse::Listing {
                window: id,
                generation,
                path: "/host".to_string(),
                entries: names.iter().map(|n| Entry::new(*n, EntryKind::File)).collect(),
            }),
        )
        .expect("handled");
    }

    fn explorer_cursor(state: &AppState, id: WindowId) -> usize {
        state
            .workspace
            .window(id)
            .and_then(|w| w.explorer())
            .map(|e| e.cursor)
            .expect("explorer")
    }

    #[test]
    fn clicking_an_explorer_row_selects_then_opens_it() {
        let mut state = state();
        state.set_viewport(11, 81);
        listed_explorer(&mut state, &["a.txt", "b.txt", "c.txt"]);

        let (redraw, actions) =
            handle_event(&mut state, &Event::PointerDown { row: 2, col: 5 }).expect("handled");
        assert!(redraw);
        assert!(actions.is_empty());
        assert_eq!(explorer_cursor(&state, 1), 1);

        let (_, actions) =
            handle_event(&mut state, &Event::PointerDown { row: 2, col: 5 }).expect("handled");
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::FetchFile { path, .. })] if path == "/host/b.txt"
        ));
    }

    #[test]
    fn clicking_title_or_blank_rows_only_focuses() {
        let mut state = state();
        state.set_viewport(11, 81);
        listed_explorer(&mut state, &["a.txt", "b.txt"]);

        let (redraw, actions) =
            handle_event(&mut state, &Event::PointerDown { row: 0, col: 5 }).expect("handled");
        assert!(!redraw);
        assert!(actions.is_empty());

        let (redraw, _) =
            handle_event(&mut state, &Event::PointerDown { row: 7, col: 5 }).expect("handled");
        assert!(!redraw);
        assert_eq!(explorer_cursor(&state, 1), 0);
    }

    #[test]
    fn clicking_a_row_in_an_unfocused_explorer_focuses_without_opening() {
        let mut state = state();
        state.set_viewport(11, 81);
        type_command(&mut state, "vspl");
        press(&mut state, KeyInput::ctrl('2'));
        listed_explorer(&mut state, &["a.txt", "b.txt"]);
        press(&mut state, KeyInput::ctrl('1'));

        let (redraw, actions) =
            handle_event(&mut state, &Event::PointerDown { row: 1, col: 70 }).expect("handled");
        assert!(redraw);
        assert!(actions.is_empty());
        assert_eq!(state.workspace.focused_id(), 2);
        assert_eq!(explorer_cursor(&state, 2), 0);
    }

    #[test]
    fn open_in_editor_uses_selected_file() {
        let mut state = state();
        press(&mut state, KeyInput::ctrl('n'));
        let generation = state.focused_window().map(|w| w.generation).expect("window");
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Listing {
                window: 1,
                generation,
                path: "/host/src".to_string(),
                entries: vec![Entry::new("main.rs", EntryKind::File)],
            }),
        )
        .expect("handled");

        let (_, actions) = press(&mut state, KeyInput::char('e'));
        assert_eq!(actions, vec![Action::OpenInEditor("/host/src/main.rs".to_string())]);
    }

    #[test]
    fn typing_ignores_control_chords() {
        let mut state = state();
        press(&mut state, KeyInput::char(':'));
        let (redraw, _) = press(&mut state, KeyInput::ctrl('x'));
        assert!(!redraw);
        press(&mut state, KeyInput::char('a'));
        press(&mut state, KeyInput::plain(KeyCode::Backspace));
        press(&mut state, KeyInput::plain(KeyCode::Backspace));
        assert!(state.prompt.buffer.is_empty());
        assert_eq!(state.mode, InputMode::Command);
    }
}
