//! Domain layer for the OctoPanel front-end.
//!
//! This module contains the core domain types, independent of HTTP, threads or
//! any rendering backend.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`printer`]: Last-known printer status and its shared handle
//! - [`command`]: Requests sent to the printer server
//! - [`files`]: Printable file entries
//!
//! # Examples
//!
//! ```
//! use octopanel::domain::{Command, PrinterState};
//!
//! let state = PrinterState::default();
//! let command = if state.bed_heating() {
//!     Command::SetBedTarget { target: 0.0 }
//! } else {
//!     Command::SetBedTarget { target: 50.0 }
//! };
//! assert_eq!(command.endpoint(), "/api/printer/bed");
//! ```

pub mod command;
pub mod error;
pub mod files;
pub mod printer;

pub use command::{Axis, Command};
pub use error::{PanelError, Result};
pub use files::FileEntry;
pub use printer::{ConnectionState, PrinterState, SharedPrinter, StatusSnapshot};
