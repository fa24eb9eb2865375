//! Commands the panel can send to the printer server.
//!
//! A [`Command`] is built by a view in response to a user action, handed to the
//! client once and then dropped. Each command knows the endpoint it targets and
//! the JSON body the server expects.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};

/// Printer axis addressed by home and jog commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Lowercase axis name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// Fan speed G-code sent for "fan on".
const FAN_ON_GCODE: &str = "M106 S255";

/// G-code sent for "fan off".
const FAN_OFF_GCODE: &str = "M107";

/// Name of the first (and usually only) tool head.
pub const DEFAULT_TOOL: &str = "tool0";

/// A request to the printer server.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Homes the given axes.
    Home { axes: Vec<Axis> },
    /// Moves the print head relative to its current position, in millimetres.
    Jog { x: f64, y: f64, z: f64 },
    /// Sets a tool heater target in °C (0 turns it off).
    SetToolTarget { tool: String, target: f64 },
    /// Sets the bed heater target in °C (0 turns it off).
    SetBedTarget { target: f64 },
    /// Starts the currently selected job.
    StartJob,
    /// Toggles pause/resume of the running job.
    PauseJob,
    /// Cancels the running job.
    CancelJob,
    /// Switches the part cooling fan on or off.
    Fan { on: bool },
    /// Sends raw G-code lines.
    Gcode(Vec<String>),
    /// Selects a file on local storage, optionally starting it right away.
    SelectFile { name: String, print: bool },
}

impl Command {
    /// Jog along a single axis.
    #[must_use]
    pub const fn jog(axis: Axis, distance: f64) -> Self {
        match axis {
            Axis::X => Self::Jog { x: distance, y: 0.0, z: 0.0 },
            Axis::Y => Self::Jog { x: 0.0, y: distance, z: 0.0 },
            Axis::Z => Self::Jog { x: 0.0, y: 0.0, z: distance },
        }
    }

    /// Home a single axis.
    #[must_use]
    pub fn home(axis: Axis) -> Self {
        Self::Home { axes: vec![axis] }
    }

    /// Target for the default tool head.
    #[must_use]
    pub fn tool_target(target: f64) -> Self {
        Self::SetToolTarget {
            tool: DEFAULT_TOOL.to_string(),
            target,
        }
    }

    /// API path (relative to the server base URL) the command is posted to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        match self {
            Self::Home { .. } | Self::Jog { .. } => "/api/printer/printhead".to_string(),
            Self::SetToolTarget { .. } => "/api/printer/tool".to_string(),
            Self::SetBedTarget { .. } => "/api/printer/bed".to_string(),
            Self::StartJob | Self::PauseJob | Self::CancelJob => "/api/job".to_string(),
            Self::Fan { .. } | Self::Gcode(_) => "/api/printer/command".to_string(),
            Self::SelectFile { name, .. } => format!("/api/files/local/{}", encode_path(name)),
        }
    }

    /// JSON body of the request.
    ///
    /// ```
    /// use octopanel::domain::{Axis, Command};
    /// use serde_json::json;
    ///
    /// let cmd = Command::Home { axes: vec![Axis::X, Axis::Y] };
    /// assert_eq!(cmd.payload(), json!({"command": "home", "axes": ["x", "y"]}));
    /// ```
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Home { axes } => {
                let axes: Vec<&str> = axes.iter().map(|a| a.as_str()).collect();
                json!({ "command": "home", "axes": axes })
            }
            Self::Jog { x, y, z } => json!({ "command": "jog", "x": x, "y": y, "z": z }),
            Self::SetToolTarget { tool, target } => {
                json!({ "command": "target", "targets": { tool.as_str(): target } })
            }
            Self::SetBedTarget { target } => json!({ "command": "target", "target": target }),
            Self::StartJob => json!({ "command": "start" }),
            Self::PauseJob => json!({ "command": "pause", "action": "toggle" }),
            Self::CancelJob => json!({ "command": "cancel" }),
            Self::Fan { on } => {
                let line = if *on { FAN_ON_GCODE } else { FAN_OFF_GCODE };
                json!({ "commands": [line] })
            }
            Self::Gcode(lines) => json!({ "commands": lines }),
            Self::SelectFile { print, .. } => json!({ "command": "select", "print": print }),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Home { .. } => "home",
            Self::Jog { .. } => "jog",
            Self::SetToolTarget { .. } => "tool_target",
            Self::SetBedTarget { .. } => "bed_target",
            Self::StartJob => "start",
            Self::PauseJob => "pause",
            Self::CancelJob => "cancel",
            Self::Fan { .. } => "fan",
            Self::Gcode(_) => "gcode",
            Self::SelectFile { .. } => "select_file",
        }
    }
}

/// Bytes escaped inside one path segment: everything but RFC 3986 unreserved.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes each `/`-separated segment of a storage path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
