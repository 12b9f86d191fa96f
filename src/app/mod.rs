//! Application layer: state, events and actions.
//!
//! ```text
//! Key / Mouse → Event → handle_event → AppState mutations → Actions → shim
//!                            ↑                                 ↓
//!                            └──────── Worker Responses ───────┘
//! ```
//!
//! - [`actions`]: Side effects for the plugin shim
//! - [`commands`]: `:` command grammar
//! - [`handler`]: The modal input state machine
//! - [`keymap`]: Key types and normal-mode bindings
//! - [`modes`]: Input mode and prompt
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod commands;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use commands::{CommandError, EditorCommand};
pub use handler::{handle_event, Event};
pub use keymap::{KeyCode, KeyInput, Modifiers, NormalCommand};
pub use modes::{InputMode, Prompt};
pub use state::{AppState, ControlSettings, READY_HINT};
