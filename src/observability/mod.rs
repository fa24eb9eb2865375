//! Structured logging to stderr and a rotating log file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                            → fmt layer → RotatingFileWriter → octopanel.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `~/.local/share/octopanel/octopanel.log` unless `log_file` is set
//! - **Automatic Rotation**: Files rotate at 10 MiB with 3-backup retention
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use file_writer::RotatingFileWriter;
pub use init::{filter_directive, init_tracing};
