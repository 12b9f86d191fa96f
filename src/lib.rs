//! Zexplorer: a modal, tiling file explorer and previewer for Zellij.
//!
//! The plugin fills its pane with a tree of windows. Each window is empty, a
//! directory explorer or a file viewer; windows are split, resized, focused
//! and closed from the keyboard with vim-like bindings.
//!
//! - Binary split tree layout with weighted splits and keyboard resizing
//! - Directory explorers with recursive, limited search and fuzzy highlights
//! - Text, PDF and hex previews with per-window back history
//! - Command mode (`:q`, `:spl`, `:vspl`) and search mode (`/`)
//! - Filesystem I/O on a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Modal input FSM
//! │  - Key bindings and modes                           │
//! │  - Command parsing                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Window Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (windows/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Registry    │   │ - Listings    │
//! │ - Theming     │   │ - Focus       │   │ - File reads  │
//! │ - Components  │   │ - Lifecycle   │   │ - Search      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                             │                    │
//! ┌───────────────┐   ┌─────────────────────────────────────┐
//! │ Layout        │   │  Source, Infrastructure & Domain    │
//! │ (layout/)     │   │  - FileSource trait (source/)       │
//! │ - Split tree  │   │  - Sandbox paths (infrastructure/)  │
//! │ - Rectangles  │   │  - Entries, errors (domain/)        │
//! └───────────────┘   └─────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zexplorer.wasm" {
//!         default_path "~/Projects"
//!         search_limit "200"
//!         resize_step "0.15"
//!         zoom_step "0.25"
//!         preview_bytes "262144"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zexplorer::{handle_event, initialize, Config, Event};
//! use zexplorer::app::KeyInput;
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Key(KeyInput::ctrl('n')))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), zexplorer::ExplorerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod layout;
pub mod source;
pub mod windows;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, ControlSettings, Event, InputMode};
pub use domain::{ExplorerError, Result};
pub use ui::Theme;
pub use windows::{Workspace, WorkspaceSettings};

use infrastructure::expand_tilde;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Values that are missing or fail to parse fall back to their defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory a new explorer opens in. `~` expands to `/host`.
    /// Default: `/host`
    pub default_path: String,

    /// Maximum number of recursive search hits. Default: 200
    pub search_limit: usize,

    /// Weight change per resize key press, in `(0, 1)`. Default: 0.15
    pub resize_step: f64,

    /// PDF zoom change per `+`/`-` press. Default: 0.25
    pub zoom_step: f64,

    /// Maximum bytes read for a preview. Default: 262144
    pub preview_bytes: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let workspace = WorkspaceSettings::default();
        let controls = ControlSettings::default();
        Self {
            default_path: workspace.default_path,
            search_limit: workspace.search_limit,
            resize_step: controls.resize_step,
            zoom_step: controls.zoom_step,
            preview_bytes: workspace.preview_bytes,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's key/value map.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let default_path = config
            .get("default_path")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.default_path, expand_tilde);

        let search_limit = config
            .get("search_limit")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.search_limit);

        let resize_step = config
            .get("resize_step")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|step| step.is_finite() && *step > 0.0 && *step < 1.0)
            .unwrap_or(defaults.resize_step);

        let zoom_step = config
            .get("zoom_step")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|step| step.is_finite() && *step > 0.0)
            .unwrap_or(defaults.zoom_step);

        let preview_bytes = config
            .get("preview_bytes")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.preview_bytes);

        Self {
            default_path,
            search_limit,
            resize_step,
            zoom_step,
            preview_bytes,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Creates the application state for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the built-in
/// default. A theme that fails to load is logged and replaced by the default.
/// The workspace starts as a single empty window.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zexplorer plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let settings = WorkspaceSettings {
        default_path: config.default_path.clone(),
        search_limit: config.search_limit,
        preview_bytes: config.preview_bytes,
    };
    let controls = ControlSettings {
        resize_step: config.resize_step,
        zoom_step: config.zoom_step,
    };

    AppState::new(settings, controls, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.default_path, "/host");
        assert_eq!(config.search_limit, 200);
        assert!((config.resize_step - 0.15).abs() < f64::EPSILON);
        assert!((config.zoom_step - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.preview_bytes, 262_144);
        assert!(config.theme_name.is_none());
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn values_are_parsed_and_tilde_expanded() {
        let config = Config::from_zellij(&map(&[
            ("default_path", "~/Projects"),
            ("search_limit", "50"),
            ("resize_step", "0.1"),
            ("zoom_step", "0.5"),
            ("preview_bytes", "1024"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));
        assert_eq!(config.default_path, "/host/Projects");
        assert_eq!(config.search_limit, 50);
        assert!((config.resize_step - 0.1).abs() < f64::EPSILON);
        assert!((config.zoom_step - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.preview_bytes, 1024);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("default_path", "  "),
            ("search_limit", "0"),
            ("resize_step", "1.5"),
            ("zoom_step", "NaN"),
            ("preview_bytes", "lots"),
        ]));
        let defaults = Config::default();
        assert_eq!(config.default_path, defaults.default_path);
        assert_eq!(config.search_limit, defaults.search_limit);
        assert!((config.resize_step - defaults.resize_step).abs() < f64::EPSILON);
        assert!((config.zoom_step - defaults.zoom_step).abs() < f64::EPSILON);
        assert_eq!(config.preview_bytes, defaults.preview_bytes);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");

        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-mocha");
    }
}
