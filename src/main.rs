//! Panel binary and entry point.
//!
//! Wires the library together:
//!
//! ```text
//! ┌──────────────────────────┐      ┌──────────────────────────┐
//! │  input-reader thread     │      │  printer-poller thread   │
//! │  stdin lines → events    │      │  poll_status every N ms  │
//! └────────────┬─────────────┘      └────────────┬─────────────┘
//!              │ mpsc                            │ SharedPrinter
//!              ▼                                 ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  main thread: Panel::run → TerminalSurface (stdout)      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: parse CLI, read config, initialize tracing
//! 2. **Connect**: one synchronous poll so the first frame has data
//! 3. **Run**: spawn the input reader, set up the terminal, spawn the
//!    poller, run the frame loop
//! 4. **Exit**: stop the poller, restore the terminal, then reboot or
//!    shut down the host if that is why the loop ended

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use octopanel::app::input;
use octopanel::client::PrinterClient;
use octopanel::domain::{PrinterState, SharedPrinter};
use octopanel::ui::TerminalSurface;
use octopanel::worker::Poller;
use octopanel::{Config, ExitReason, Panel};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "octopanel", version, about = "Touchscreen control panel for OctoPrint")]
struct Args {
    /// Configuration file [default: ~/.config/octopanel/octopanel.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides `trace_level` from the config file
    #[arg(long)]
    trace_level: Option<String>,

    /// Also write logs to stderr (draws over the panel on a shared terminal)
    #[arg(long)]
    log_stderr: bool,

    /// Do not start the background status poller
    #[arg(long)]
    no_poll: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let path = args
        .config
        .clone()
        .unwrap_or_else(octopanel::infrastructure::default_config_path);

    let mut config = match Config::from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("octopanel: {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    if args.trace_level.is_some() {
        config.trace_level.clone_from(&args.trace_level);
    }
    config.log_stderr |= args.log_stderr;
    octopanel::observability::init_tracing(&config);

    match run(&config, &args) {
        Ok(reason) => {
            power_action(reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "panel failed");
            eprintln!("octopanel: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, args: &Args) -> octopanel::Result<ExitReason> {
    let span = tracing::debug_span!("panel_start", base_url = %config.base_url);
    let guard = span.entered();

    let printer = SharedPrinter::new(PrinterState::new(config.history_len));
    let client = Arc::new(PrinterClient::from_config(config, printer));

    if let Err(e) = client.poll_status() {
        tracing::warn!(error = %e, "initial poll failed, starting with empty state");
    }

    let (tx, rx) = mpsc::channel();
    input::spawn_reader(BufReader::new(io::stdin()), tx)?;

    let mut panel = Panel::from_config(config, Arc::clone(&client))?;
    let mut surface = TerminalSurface::new(io::stdout(), config.width, config.height);
    surface.begin(&config.caption, config.fullscreen, config.show_mouse)?;

    let poller = if args.no_poll {
        tracing::info!("status polling disabled");
        None
    } else {
        let shutdown = Arc::new(AtomicBool::new(false));
        let interval = Duration::from_millis(config.update_time_ms);
        match Poller::new(Arc::clone(&client), interval, shutdown).spawn() {
            Ok(handle) => Some(handle),
            Err(e) => {
                let _ = surface.finish();
                return Err(e.into());
            }
        }
    };
    drop(guard);

    let reason = panel.run(&mut surface, &rx);

    if let Err(e) = surface.finish() {
        tracing::warn!(error = %e, "failed to restore terminal");
    }
    if let Some(poller) = poller {
        let rounds = poller.stop();
        tracing::debug!(?rounds, "poller joined");
    }

    Ok(reason)
}

fn power_action(reason: ExitReason) {
    let argv: &[&str] = match reason {
        ExitReason::Quit => return,
        ExitReason::Reboot => &["reboot"],
        ExitReason::Shutdown => &["shutdown", "-h", "0"],
    };

    tracing::info!(command = ?argv, "running power command");
    match std::process::Command::new(argv[0]).args(&argv[1..]).status() {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::error!(%status, "power command failed"),
        Err(e) => tracing::error!(error = %e, "could not run power command"),
    }
}
