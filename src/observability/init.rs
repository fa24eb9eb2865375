//! Tracing initialization and subscriber setup.
//!
//! Logs go to the rotating log file. The panel paints the terminal, so the
//! compact stderr layer is only added when `log_stderr` asks for it.

use super::file_writer::RotatingFileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolves the filter directive.
///
/// Priority:
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
#[must_use]
pub fn filter_directive(config: &Config, env: Option<String>) -> String {
    env.filter(|s| !s.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the global tracing subscriber.
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Drops the file layer if the directory cannot be created
/// - Adds a stderr layer only if `config.log_stderr` is set
/// - Idempotent: only the first call takes effect
///
/// # Example
///
/// ```no_run
/// use octopanel::observability::init_tracing;
/// use octopanel::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let directive = filter_directive(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = config.log_path();
    let file_layer = log_path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .ok()
        .map(|()| {
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(RotatingFileWriter::new(log_path.clone()))
        });

    let stderr_layer = config
        .log_stderr
        .then(|| fmt::layer().compact().with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    tracing::debug!(
        filter = %directive,
        log_file = %log_path.display(),
        stderr = config.log_stderr,
        "tracing initialized"
    );
}
