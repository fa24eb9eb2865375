//! Octopanel: a touchscreen control panel for an OctoPrint 3D-printer server.
//!
//! Octopanel shows printer status (temperatures, job progress, file list) on
//! a small display and issues control commands (jog, home, heat, start/pause/
//! abort) over the server's REST API.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                   │  ← CLI, wiring
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Frame loop
//! │  - Input dispatch (menu vs active view)             │
//! │  - Action execution                                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Client Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (client/)     │   │ (worker/)     │
//! │ - Views       │   │ - REST calls  │   │ - Poll thread │
//! │ - Surfaces    │   │ - JSON models │   │ - Shutdown    │
//! │ - Theming     │   │ - Transport   │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - PrinterState, Command, errors (domain/)          │
//! │  - XDG paths (infrastructure/)                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Threads
//!
//! Two threads touch printer state. The poller thread fetches status every
//! `update_time_ms` and applies it to the shared
//! [`PrinterState`](domain::PrinterState) under a mutex. The UI thread takes
//! a snapshot of that state once per frame and per input event, so views
//! never see a half-applied poll.
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/octopanel/octopanel.toml
//! base_url = "http://octopi.local"
//! api_key = "0123456789ABCDEF"
//! update_time_ms = 2000
//! backlight_off_time_ms = 30000
//! theme = "octoprint-red"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use octopanel::app::{InputEvent, Panel};
//! use octopanel::client::PrinterClient;
//! use octopanel::domain::{PrinterState, SharedPrinter};
//! use octopanel::ui::RecordingSurface;
//! use octopanel::Config;
//! use std::sync::{mpsc, Arc};
//!
//! let config = Config::from_file("octopanel.toml")?;
//! let printer = SharedPrinter::new(PrinterState::new(config.history_len));
//! let client = Arc::new(PrinterClient::from_config(&config, printer));
//! let mut panel = Panel::from_config(&config, client)?;
//!
//! let (tx, rx) = mpsc::channel();
//! tx.send(InputEvent::Quit).ok();
//! let mut surface = RecordingSurface::new(config.width, config.height);
//! panel.run(&mut surface, &rx);
//! # Ok::<(), octopanel::PanelError>(())
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, ExitReason, InputEvent, Key, MenuState, Panel};
pub use domain::{PanelError, Result};
pub use ui::Theme;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_update_time_ms() -> u64 {
    2000
}

fn default_backlight_off_time_ms() -> u64 {
    30_000
}

fn default_width() -> u32 {
    320
}

fn default_height() -> u32 {
    240
}

fn default_caption() -> String {
    "OctoPiPanel".to_string()
}

fn default_show_mouse() -> bool {
    true
}

fn default_frame_rate() -> u32 {
    30
}

fn default_history_len() -> usize {
    domain::printer::DEFAULT_HISTORY_LEN
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_hotend_preheat() -> f64 {
    190.0
}

fn default_bed_preheat() -> f64 {
    50.0
}

fn default_jog_amount() -> f64 {
    10.0
}

/// Panel configuration, read from a TOML file at startup.
///
/// Only `base_url` and `api_key` are required.
///
/// # Example
///
/// ```
/// use octopanel::Config;
///
/// let config = Config::from_toml_str(r#"
///     base_url = "http://octopi.local/"
///     api_key = "secret"
///     jog_amount = 5.0
/// "#)?;
///
/// assert_eq!(config.base_url, "http://octopi.local");
/// assert_eq!(config.update_time_ms, 2000);
/// assert_eq!(config.jog_amount, 5.0);
/// # Ok::<(), octopanel::PanelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server root, e.g. `http://octopi.local`. Trailing `/` is removed.
    pub base_url: String,

    /// Sent as the `X-Api-Key` header on every request.
    pub api_key: String,

    /// Interval between status polls.
    #[serde(default = "default_update_time_ms")]
    pub update_time_ms: u64,

    /// Idle time after which the display may be dimmed. 0 disables idling.
    #[serde(default = "default_backlight_off_time_ms")]
    pub backlight_off_time_ms: u64,

    /// Display width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Display height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Window title.
    #[serde(default = "default_caption")]
    pub caption: String,

    #[serde(default)]
    pub fullscreen: bool,

    /// Whether the pointer (or terminal cursor) stays visible.
    #[serde(default = "default_show_mouse")]
    pub show_mouse: bool,

    /// Frames rendered per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Temperature samples kept per heater for the graph.
    #[serde(default = "default_history_len")]
    pub history_len: usize,

    /// Connect and read timeout for each HTTP request.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Hot end target used by the "Heat hot end" button, in °C.
    #[serde(default = "default_hotend_preheat")]
    pub hotend_preheat: f64,

    /// Bed target used by the "Heat bed" button, in °C.
    #[serde(default = "default_bed_preheat")]
    pub bed_preheat: f64,

    /// Distance of one jog step, in millimetres.
    #[serde(default = "default_jog_amount")]
    pub jog_amount: f64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(default)]
    pub theme: Option<String>,

    /// Path to a custom TOML theme. See [`ui::theme`] for the format.
    #[serde(default)]
    pub theme_file: Option<String>,

    /// Log filter, e.g. `debug` or `octopanel=trace`. `RUST_LOG` wins if set.
    #[serde(default)]
    pub trace_level: Option<String>,

    /// Log file path. Defaults to `octopanel.log` in the data directory.
    #[serde(default)]
    pub log_file: Option<String>,

    /// Also log to stderr. Off by default since stderr shares the panel's terminal.
    #[serde(default)]
    pub log_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            api_key: String::new(),
            update_time_ms: default_update_time_ms(),
            backlight_off_time_ms: default_backlight_off_time_ms(),
            width: default_width(),
            height: default_height(),
            caption: default_caption(),
            fullscreen: false,
            show_mouse: default_show_mouse(),
            frame_rate: default_frame_rate(),
            history_len: default_history_len(),
            request_timeout_ms: default_request_timeout_ms(),
            hotend_preheat: default_hotend_preheat(),
            bed_preheat: default_bed_preheat(),
            jog_amount: default_jog_amount(),
            theme: None,
            theme_file: None,
            trace_level: None,
            log_file: None,
            log_stderr: false,
        }
    }
}

impl Config {
    /// Parses, normalizes and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Config`] if the document does not parse, has
    /// unknown keys, lacks a required key, or fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text).map_err(|e| PanelError::Config(e.to_string()))?;
        config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_toml_str`](Self::from_toml_str).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the values that would otherwise fail later in confusing ways.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(PanelError::Config(msg.to_string()));

        if self.base_url.is_empty() {
            return invalid("base_url must not be empty");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return invalid("base_url must start with http:// or https://");
        }
        if self.api_key.trim().is_empty() {
            return invalid("api_key must not be empty");
        }
        if self.update_time_ms == 0 {
            return invalid("update_time_ms must be greater than zero");
        }
        if self.frame_rate == 0 {
            return invalid("frame_rate must be greater than zero");
        }
        if self.history_len == 0 {
            return invalid("history_len must be greater than zero");
        }
        if self.width == 0 || self.height == 0 {
            return invalid("width and height must be greater than zero");
        }
        Ok(())
    }

    /// Where log output is written.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .as_deref()
            .map_or_else(infrastructure::default_log_path, infrastructure::expand_tilde)
    }
}

/// Resolves the configured theme.
///
/// `theme_file` wins over `theme`; anything that fails to load falls back to
/// the default theme with a warning.
pub fn load_theme(config: &Config) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || {
            config.theme.as_ref().map_or_else(Theme::default, |name| {
                Theme::from_name(name).unwrap_or_else(|| {
                    tracing::warn!(theme = %name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |file| {
            Theme::from_file(infrastructure::expand_tilde(file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = "base_url = \"http://octopi.local\"\napi_key = \"k\"\n";

    #[test]
    fn minimal_file_gets_defaults() {
        let config = Config::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.backlight_off_time_ms, 30_000);
        assert_eq!(config.caption, "OctoPiPanel");
        assert!(config.show_mouse);
        assert!(!config.fullscreen);
        assert_eq!(config.history_len, 285);
        assert_eq!(config.hotend_preheat, 190.0);
        assert_eq!(config.bed_preheat, 50.0);
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = Config::from_toml_str("base_url = \"http://octopi.local\"\n").unwrap_err();
        assert!(matches!(err, PanelError::Config(msg) if msg.contains("api_key")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = format!("{MINIMAL}updatetime = 2000\n");
        assert!(matches!(Config::from_toml_str(&text), Err(PanelError::Config(_))));
    }

    #[test]
    fn validation_rules() {
        for (key, value) in [
            ("base_url", "\"octopi.local\""),
            ("api_key", "\"  \""),
        ] {
            let text = if key == "base_url" {
                format!("base_url = {value}\napi_key = \"k\"\n")
            } else {
                format!("base_url = \"http://x\"\napi_key = {value}\n")
            };
            assert!(Config::from_toml_str(&text).is_err(), "{key} = {value} accepted");
        }

        for key in ["update_time_ms", "frame_rate", "history_len", "width", "height"] {
            let text = format!("{MINIMAL}{key} = 0\n");
            let err = Config::from_toml_str(&text).unwrap_err();
            assert!(matches!(err, PanelError::Config(_)), "{key} = 0 accepted");
        }
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        file.write_all(b"theme = \"octoprint-red\"\n").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(load_theme(&config).name, "octoprint-red");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PanelError::Io(_)));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, ui::theme::DEFAULT_THEME);
    }

    #[test]
    fn explicit_log_file_wins() {
        let config = Config {
            log_file: Some("/var/log/panel.log".to_string()),
            ..Config::default()
        };
        assert_eq!(config.log_path(), PathBuf::from("/var/log/panel.log"));
    }

    #[test]
    fn stderr_logging_is_opt_in() {
        assert!(!Config::from_toml_str(MINIMAL).unwrap().log_stderr);

        let text = format!("{MINIMAL}log_stderr = true\n");
        assert!(Config::from_toml_str(&text).unwrap().log_stderr);
    }
}
