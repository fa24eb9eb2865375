//! The frame loop.
//!
//! [`Panel`] owns the UI-thread state and runs a fixed-cadence loop: drain
//! pending input, execute the resulting actions, render one frame from the
//! latest printer snapshot, present it, sleep out the rest of the frame.
//! Commands are sent synchronously and block the loop for the length of the
//! request.

use super::actions::Action;
use super::handler::{handle_event, InputEvent};
use super::state::AppState;
use crate::client::PrinterClient;
use crate::domain::error::Result;
use crate::ui::{self, Surface, Theme, ViewContext};
use crate::Config;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Why [`Panel::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Reboot,
    Shutdown,
}

/// The panel's UI loop.
pub struct Panel {
    state: AppState,
    client: Arc<PrinterClient>,
    theme: Theme,
    frame_interval: Duration,
}

impl Panel {
    pub fn new(state: AppState, client: Arc<PrinterClient>, theme: Theme, frame_rate: u32) -> Self {
        Self {
            state,
            client,
            theme,
            frame_interval: Duration::from_secs(1) / frame_rate.max(1),
        }
    }

    /// Builds the standard panel for `config`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`AppState::from_config`].
    pub fn from_config(config: &Config, client: Arc<PrinterClient>) -> Result<Self> {
        let state = AppState::from_config(config)?;
        let theme = crate::load_theme(config);
        Ok(Self::new(state, client, theme, config.frame_rate))
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Dispatches one event and executes its actions.
    ///
    /// Returns the exit reason if the event ends the loop.
    pub fn dispatch(&mut self, event: &InputEvent) -> Option<ExitReason> {
        let printer = self.client.printer().snapshot();
        let ctx = ViewContext {
            printer: &printer,
            layout: self.state.layout,
            theme: &self.theme,
            client: &self.client,
        };

        let (_, actions) = handle_event(&mut self.state, event, &ctx);
        actions
            .into_iter()
            .find_map(|action| execute(&self.client, action))
    }

    /// Renders one frame from the current printer snapshot.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) {
        let printer = self.client.printer().snapshot();
        let ctx = ViewContext {
            printer: &printer,
            layout: self.state.layout,
            theme: &self.theme,
            client: &self.client,
        };
        ui::render(&mut self.state, surface, &ctx);
    }

    /// Runs until a quit, reboot or shutdown is requested or `events` disconnects.
    pub fn run(&mut self, surface: &mut dyn Surface, events: &Receiver<InputEvent>) -> ExitReason {
        tracing::info!(frame_ms = self.frame_interval.as_millis(), "panel loop started");

        loop {
            let frame_start = Instant::now();

            loop {
                match events.try_recv() {
                    Ok(event) => {
                        if let Some(reason) = self.dispatch(&event) {
                            tracing::info!(?reason, "panel loop finished");
                            return reason;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::info!("input source closed");
                        return ExitReason::Quit;
                    }
                }
            }

            self.render_frame(surface);
            if let Err(e) = surface.present() {
                tracing::warn!(error = %e, "failed to present frame");
            }

            if let Some(remaining) = self.frame_interval.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("state", &self.state)
            .field("theme", &self.theme.name)
            .field("frame_interval", &self.frame_interval)
            .finish_non_exhaustive()
    }
}

/// Executes a runtime action. Returns `Some` for actions that end the loop.
fn execute(client: &PrinterClient, action: Action) -> Option<ExitReason> {
    match action {
        Action::SendCommand(command) => {
            if let Err(e) = client.send_command(&command) {
                tracing::warn!(command = command.kind(), error = %e, "command failed");
            }
            None
        }
        Action::SelectView(name) => {
            tracing::debug!(view = %name, "view selection reached the runtime, ignoring");
            None
        }
        Action::Quit => Some(ExitReason::Quit),
        Action::Reboot => Some(ExitReason::Reboot),
        Action::Shutdown => Some(ExitReason::Shutdown),
    }
}
