//! Background status poller.
//!
//! Runs on its own thread so a slow or unreachable server never stalls the
//! UI loop. The loop is strictly serial (sleep, then poll) so two polls never
//! overlap, and failures are logged and otherwise ignored: no backoff, no
//! retry budget. The next round simply tries again.

use crate::client::PrinterClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Periodic caller of [`PrinterClient::poll_status`].
#[derive(Debug)]
pub struct Poller {
    client: Arc<PrinterClient>,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl Poller {
    /// Creates a poller that polls every `interval` until `shutdown` becomes `true`.
    #[must_use]
    pub const fn new(client: Arc<PrinterClient>, interval: Duration, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            client,
            interval,
            shutdown,
        }
    }

    fn stopping(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Runs the loop on the current thread until shutdown is requested.
    ///
    /// Returns the number of polls attempted. Shutdown is checked before and
    /// after each sleep, so the loop may overrun a shutdown request by at most
    /// one interval.
    pub fn run(&self) -> u64 {
        tracing::info!(interval_ms = self.interval.as_millis(), "poller started");
        let mut rounds = 0;

        while !self.stopping() {
            thread::sleep(self.interval);
            if self.stopping() {
                break;
            }

            rounds += 1;
            match self.client.poll_status() {
                Ok(()) => tracing::trace!(round = rounds, "poll applied"),
                Err(e) => tracing::warn!(round = rounds, error = %e, "poll failed, keeping last known state"),
            }
        }

        tracing::info!(rounds, "poller stopped");
        rounds
    }

    /// Starts the loop on a dedicated `printer-poller` thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(self) -> std::io::Result<PollerHandle> {
        let shutdown = Arc::clone(&self.shutdown);
        let thread = thread::Builder::new()
            .name("printer-poller".to_string())
            .spawn(move || self.run())?;
        Ok(PollerHandle {
            shutdown,
            thread: Some(thread),
        })
    }
}

/// Handle to a running poller thread.
///
/// Dropping the handle stops and joins the thread, so an early return on
/// startup never leaves the poller running.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<u64>>,
}

impl PollerHandle {
    /// Requests shutdown and waits for the thread to exit.
    ///
    /// Returns the number of polls attempted, or `None` if the thread panicked.
    pub fn stop(mut self) -> Option<u64> {
        self.join()
    }

    /// Whether the poller thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn join(&mut self) -> Option<u64> {
        self.shutdown.store(true, Ordering::SeqCst);
        match self.thread.take()?.join() {
            Ok(rounds) => Some(rounds),
            Err(_) => {
                tracing::error!("poller thread panicked");
                None
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            tracing::debug!("poller handle dropped, stopping thread");
            self.join();
        }
    }
}
