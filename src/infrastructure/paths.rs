//! Filesystem locations for configuration and logs.
//!
//! Follows the XDG base directory convention: `$XDG_CONFIG_HOME` and
//! `$XDG_DATA_HOME` when set, `~/.config` and `~/.local/share` otherwise.
//! The pure `*_from` variants take the environment values as arguments so
//! the resolution rules can be exercised without touching the process
//! environment.

use std::env;
use std::path::PathBuf;

/// Directory name used under the config and data roots.
pub const APP_DIR: &str = "octopanel";

/// File name of the configuration file.
pub const CONFIG_FILE: &str = "octopanel.toml";

/// File name of the log file inside the data directory.
pub const LOG_FILE: &str = "octopanel.log";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolves `<root>/octopanel` from an XDG variable, or `~/<fallback>/octopanel`.
///
/// Returns `None` if neither is available.
///
/// # Examples
///
/// ```
/// use octopanel::infrastructure::paths::dir_from;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     dir_from(Some("/xdg".into()), Some("/home/pi".into()), ".config"),
///     Some(PathBuf::from("/xdg/octopanel"))
/// );
/// assert_eq!(
///     dir_from(None, Some("/home/pi".into()), ".config"),
///     Some(PathBuf::from("/home/pi/.config/octopanel"))
/// );
/// assert_eq!(dir_from(None, None, ".config"), None);
/// ```
#[must_use]
pub fn dir_from(xdg: Option<String>, home: Option<String>, fallback: &str) -> Option<PathBuf> {
    non_empty(xdg)
        .map(PathBuf::from)
        .or_else(|| non_empty(home).map(|h| PathBuf::from(h).join(fallback)))
        .map(|root| root.join(APP_DIR))
}

/// Directory holding the configuration file.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dir_from(env::var("XDG_CONFIG_HOME").ok(), env::var("HOME").ok(), ".config")
}

/// Directory holding the log file.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dir_from(env::var("XDG_DATA_HOME").ok(), env::var("HOME").ok(), ".local/share")
}

/// Default location of the configuration file.
///
/// Falls back to `./octopanel.toml` when no home directory is known.
#[must_use]
pub fn default_config_path() -> PathBuf {
    config_dir().map_or_else(|| PathBuf::from(CONFIG_FILE), |dir| dir.join(CONFIG_FILE))
}

/// Default location of the log file.
///
/// Falls back to `./octopanel.log` when no home directory is known.
#[must_use]
pub fn default_log_path() -> PathBuf {
    data_dir().map_or_else(|| PathBuf::from(LOG_FILE), |dir| dir.join(LOG_FILE))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, and any path when `HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, env::var("HOME").ok().as_deref())
}

/// [`expand_tilde`] with an explicit home directory.
///
/// # Examples
///
/// ```
/// use octopanel::infrastructure::paths::expand_tilde_with;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde_with("~/logs/a.log", Some("/home/pi")), PathBuf::from("/home/pi/logs/a.log"));
/// assert_eq!(expand_tilde_with("~", Some("/home/pi")), PathBuf::from("/home/pi"));
/// assert_eq!(expand_tilde_with("/var/log/a.log", Some("/home/pi")), PathBuf::from("/var/log/a.log"));
/// assert_eq!(expand_tilde_with("~/a", None), PathBuf::from("~/a"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (p, Some(home)) if p.starts_with("~/") => PathBuf::from(home).join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
