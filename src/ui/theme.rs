//! Colour schemes and ANSI escape sequence generation.
//!
//! Themes are plain TOML documents. Two are compiled in; any other can be
//! loaded from a file named in the configuration.
//!
//! # Built-in Themes
//!
//! - `octoprint-dark`: slate list background, red menu (default)
//! - `octoprint-red`: the classic red title bar on black
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#000000"
//! title_fg = "#ffffff"
//! text = "#ffffff"
//! text_dim = "#a0a0a0"
//! divider = "#cc302b"
//! menu_bg = "#ef3220"
//! menu_divider = "#cc302b"
//! list_bg = "#293d46"
//! button_bg = "#3c3c3c"
//! button_fg = "#ffffff"
//! button_pressed_bg = "#ef3220"
//! progress_shade = "#1e3c1e"
//! graph_bg = "#0b0b0b"
//! graph_axis = "#ffffff"
//! graph_grid = "#404040"
//! hotend_line = "#ff4040"
//! bed_line = "#4080ff"
//! hotend_target = "#ff9090"
//! bed_target = "#90b0ff"
//! selection_bg = "#ef3220"
//! error_fg = "#ff6060"
//! ```

use super::surface::Color;
use crate::domain::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "octoprint-dark";

/// Colour scheme for the panel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colour definitions for every drawn element, as `#rrggbb` strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Fill behind everything.
    pub background: String,
    pub title_fg: String,

    /// Regular text.
    pub text: String,
    /// Secondary text (empty states, axis labels).
    pub text_dim: String,

    /// Lines separating title bar and status bar from the content area.
    pub divider: String,

    /// Menu overlay fill.
    pub menu_bg: String,
    /// Lines between menu rows.
    pub menu_divider: String,

    /// Background of the file list.
    pub list_bg: String,

    pub button_bg: String,
    pub button_fg: String,
    /// Button fill while held down.
    pub button_pressed_bg: String,

    /// Shade drawn across the screen proportional to job completion.
    pub progress_shade: String,

    pub graph_bg: String,
    pub graph_axis: String,
    pub graph_grid: String,
    pub hotend_line: String,
    pub bed_line: String,
    pub hotend_target: String,
    pub bed_target: String,

    /// Highlighted list row.
    pub selection_bg: String,

    /// Error messages.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// ```
    /// use octopanel::ui::Theme;
    ///
    /// let theme = Theme::from_name("octoprint-red").unwrap();
    /// assert_eq!(theme.name, "octoprint-red");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "octoprint-dark" => include_str!("../../themes/octoprint-dark.toml"),
            "octoprint-red" => include_str!("../../themes/octoprint-red.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Io`] if the file cannot be read and
    /// [`PanelError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| PanelError::Config(format!("invalid theme file: {e}")))
    }

    /// Parses a theme colour, falling back to white on malformed input.
    #[must_use]
    pub fn rgb(hex: &str) -> Color {
        Color::from_hex(hex).unwrap_or(Color::WHITE)
    }

    /// 24-bit ANSI foreground escape for `color`.
    #[must_use]
    pub fn fg(color: Color) -> String {
        format!("\u{001b}[38;2;{};{};{}m", color.r, color.g, color.b)
    }

    /// 24-bit ANSI background escape for `color`.
    #[must_use]
    pub fn bg(color: Color) -> String {
        format!("\u{001b}[48;2;{};{};{}m", color.r, color.g, color.b)
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `octoprint-dark` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the unit tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in octoprint-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["octoprint-dark", "octoprint-red"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert!(Color::from_hex(&theme.colors.menu_bg).is_some());
        }
    }

    #[test]
    fn malformed_colour_falls_back_to_white() {
        assert_eq!(Theme::rgb("#12"), Color::WHITE);
        assert_eq!(Theme::rgb("#010203"), Color::rgb(1, 2, 3));
    }

    #[test]
    fn escapes_use_truecolor() {
        assert_eq!(Theme::fg(Color::rgb(1, 2, 3)), "\u{1b}[38;2;1;2;3m");
        assert_eq!(Theme::bg(Color::rgb(4, 5, 6)), "\u{1b}[48;2;4;5;6m");
    }

    #[test]
    fn theme_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let text = toml::to_string(&Theme::default()).unwrap().replace("octoprint-dark", "custom");
        file.write_all(text.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn incomplete_theme_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PanelError::Config(_)));
    }
}
