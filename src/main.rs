//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the zexplorer library
//! and the Zellij plugin system. It implements `ZellijPlugin` for the UI
//! thread and `ZellijWorker` for the filesystem worker.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← Windows, modes, rendering
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ ExplorerWorker   │   │  ← Listings, reads, search
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → `Event::Key` with the library's [`KeyInput`]
//! - `Mouse(LeftClick)` → `Event::PointerDown`
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `PermissionRequestResult` → `Event::PermissionsResult`

#![allow(clippy::multiple_crate_versions)]

// The plugin only exists inside Zellij's wasm runtime; native builds get an
// empty binary so `cargo test` can link against the library.
#[cfg(not(target_arch = "wasm32"))]
fn main() {}

#[cfg(target_arch = "wasm32")]
use std::collections::BTreeMap;
#[cfg(target_arch = "wasm32")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(target_arch = "wasm32")]
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;
#[cfg(target_arch = "wasm32")]
use zellij_tile::shim::post_message_to;

#[cfg(target_arch = "wasm32")]
use zexplorer::app::{KeyCode, KeyInput, Modifiers};
#[cfg(target_arch = "wasm32")]
use zexplorer::infrastructure::paths::host_relative;
#[cfg(target_arch = "wasm32")]
use zexplorer::worker::{ExplorerWorker, WorkerMessage, WorkerResponse};
#[cfg(target_arch = "wasm32")]
use zexplorer::{handle_event, Action, Config, Event};

/// Name shared by the worker registration and its messages.
#[cfg(target_arch = "wasm32")]
const WORKER_NAME: &str = "explorer";

#[cfg(target_arch = "wasm32")]
register_plugin!(State);
#[cfg(target_arch = "wasm32")]
register_worker!(ExplorerWorkerShim, explorer_worker, EXPLORER_WORKER);

/// Plugin state wrapper.
#[cfg(target_arch = "wasm32")]
struct State {
    app: zexplorer::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

#[cfg(target_arch = "wasm32")]
impl Default for State {
    fn default() -> Self {
        Self {
            app: zexplorer::initialize(&Config::default()),
            worker_name: WORKER_NAME.to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests
    /// permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `FullHdAccess`: Read the host filesystem under `/host`
    /// - `OpenFiles`: Open the selected file in the user's editor
    /// - `ChangeApplicationState`: Required by `open_file`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zexplorer::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(default_path = %config.default_path, "parsed configuration");
        self.app = zexplorer::initialize(&config);

        request_permission(&[
            PermissionType::FullHdAccess,
            PermissionType::OpenFiles,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through the state machine and
    /// executes the resulting actions. Returns `true` to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => Event::Key(Self::map_key(key)),
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Event::PermissionsResult {
                    granted: matches!(permissions, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        zexplorer::ui::render(&self.app, rows, cols);
    }
}

#[cfg(target_arch = "wasm32")]
impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Converts a Zellij key into the library's key type. Shift is carried
    /// by the character itself (`H`, `L`, `J`, `K`).
    fn map_key(key: &KeyWithModifier) -> KeyInput {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        let code = match key.bare_key {
            BareKey::Char(c) => KeyCode::Char(c),
            BareKey::Enter => KeyCode::Enter,
            BareKey::Backspace => KeyCode::Backspace,
            BareKey::Esc => KeyCode::Escape,
            BareKey::Up => KeyCode::Up,
            BareKey::Down => KeyCode::Down,
            BareKey::PageUp => KeyCode::PageUp,
            BareKey::PageDown => KeyCode::PageDown,
            BareKey::Tab => KeyCode::Tab,
            _ => KeyCode::Other,
        };

        KeyInput {
            code,
            modifiers: Modifiers {
                ctrl: key.key_modifiers.contains(&KeyModifier::Ctrl),
                alt: key.key_modifiers.contains(&KeyModifier::Alt),
            },
        }
    }

    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()?;
                Some(Event::PointerDown { row, col })
            }
            _ => None,
        }
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` and posts it to the worker. Serialization errors
    /// are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
            Action::OpenInEditor(ref path) => match host_relative(path) {
                Some(relative) => {
                    tracing::debug!(path = %path, "opening file in editor");
                    open_file(FileToOpen::new(relative), BTreeMap::new());
                }
                None => {
                    tracing::debug!(path = %path, "path is outside the host mount");
                }
            },
        }
    }
}

/// Tracks whether worker tracing has been initialized.
#[cfg(target_arch = "wasm32")]
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker-thread wrapper around [`ExplorerWorker`].
///
/// Zellij requires workers to be serializable; the file source itself is
/// rebuilt on the worker side.
#[derive(Default, Serialize, Deserialize)]
#[cfg(target_arch = "wasm32")]
struct ExplorerWorkerShim {
    #[serde(skip)]
    inner: ExplorerWorker,
}

#[cfg(target_arch = "wasm32")]
impl ZellijWorker<'_> for ExplorerWorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            zexplorer::observability::init_tracing(&Config::default());
        }

        match self.inner.on_payload(&payload) {
            Ok(response) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload: response,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to process worker message");
            }
        }
    }
}
