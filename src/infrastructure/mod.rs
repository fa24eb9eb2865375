//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the configuration and log files live. Nothing here reads
//! or writes those files; that is left to [`Config`](crate::Config) and the
//! observability layer.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_path, default_log_path, expand_tilde};
