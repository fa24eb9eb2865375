//! Last-known printer status and its thread-safe handle.
//!
//! [`PrinterState`] is the single record every view reads from. It is only ever
//! replaced wholesale from a [`StatusSnapshot`] built out of one complete poll,
//! so a failed or partial poll can never leave it half-updated.
//! [`SharedPrinter`] wraps it in an `Arc<Mutex<_>>` so the background poller can
//! write while the UI thread takes cheap snapshots.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of temperature samples kept per heater when no capacity is configured.
///
/// Matches the width in pixels of the temperature graph at one sample per pixel.
pub const DEFAULT_HISTORY_LEN: usize = 285;

/// Connection state reported by the printer server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Connected and idle.
    Operational,
    /// A job is running.
    Printing,
    /// A pause has been requested but not yet reached.
    Pausing,
    /// The running job is paused.
    Paused,
    /// A cancel has been requested but not yet completed.
    Cancelling,
    /// The serial connection is closed.
    #[default]
    Closed,
    /// The server is not connected to a printer.
    Offline,
    /// The connection is in an error state.
    Error,
    /// Any other state text the server reports.
    Other(String),
}

impl ConnectionState {
    /// Maps the server's human-readable state text onto a variant.
    ///
    /// Matching is on the leading word, so texts such as
    /// `"Offline after error"` or `"Error: Failed to autodetect"` land on
    /// [`Self::Offline`] and [`Self::Error`].
    ///
    /// ```
    /// use octopanel::domain::ConnectionState;
    ///
    /// assert_eq!(ConnectionState::from_text("Operational"), ConnectionState::Operational);
    /// assert_eq!(ConnectionState::from_text("Offline after error"), ConnectionState::Offline);
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        match text {
            "Operational" => Self::Operational,
            "Printing" | "Printing from SD" | "Sending file to SD" | "Starting" | "Starting print from SD"
            | "Resuming" | "Finishing" => Self::Printing,
            "Pausing" => Self::Pausing,
            "Paused" => Self::Paused,
            "Cancelling" => Self::Cancelling,
            "Closed" => Self::Closed,
            _ if text.starts_with("Offline") => Self::Offline,
            _ if text.starts_with("Error") => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Bounded, time-ordered sequence of temperature samples.
///
/// Oldest samples are dropped first once the capacity is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl TemperatureHistory {
    /// Creates an empty history holding at most `capacity` samples.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: f64) {
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Iterates samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }
}

/// The values gathered by one complete, successful poll.
///
/// Produced by the client after all status requests succeeded and every field
/// has been normalized (targets non-negative, completion clamped).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSnapshot {
    pub hotend_temp: f64,
    pub hotend_target: f64,
    pub bed_temp: f64,
    pub bed_target: f64,
    pub completion_percent: f64,
    pub print_time_left_seconds: u64,
    pub file_name: String,
    pub connection: ConnectionState,
}

/// Last-known status of the printer.
///
/// Mutated only through [`PrinterState::apply`] after a successful poll; read by
/// every view.
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterState {
    pub hotend_temp: f64,
    pub hotend_target: f64,
    pub bed_temp: f64,
    pub bed_target: f64,
    /// Job completion in percent, always within `[0, 100]`.
    pub completion_percent: f64,
    pub print_time_left_seconds: u64,
    pub file_name: String,
    pub connection: ConnectionState,
    pub is_connected: bool,
    pub is_printing: bool,
    pub is_paused: bool,
    pub job_loaded: bool,
    pub hotend_history: TemperatureHistory,
    pub bed_history: TemperatureHistory,
}

impl Default for PrinterState {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

impl PrinterState {
    /// Creates a disconnected state with empty histories of the given capacity.
    #[must_use]
    pub fn new(history_len: usize) -> Self {
        Self {
            hotend_temp: 0.0,
            hotend_target: 0.0,
            bed_temp: 0.0,
            bed_target: 0.0,
            completion_percent: 0.0,
            print_time_left_seconds: 0,
            file_name: String::new(),
            connection: ConnectionState::Closed,
            is_connected: false,
            is_printing: false,
            is_paused: false,
            job_loaded: false,
            hotend_history: TemperatureHistory::with_capacity(history_len),
            bed_history: TemperatureHistory::with_capacity(history_len),
        }
    }

    /// Replaces every status field from `snapshot` and records one sample per heater.
    ///
    /// Derived flags are recomputed here, so they can never disagree with the
    /// raw fields they come from.
    pub fn apply(&mut self, snapshot: StatusSnapshot) {
        self.hotend_temp = snapshot.hotend_temp;
        self.hotend_target = snapshot.hotend_target.max(0.0);
        self.bed_temp = snapshot.bed_temp;
        self.bed_target = snapshot.bed_target.max(0.0);
        self.print_time_left_seconds = snapshot.print_time_left_seconds;
        self.file_name = snapshot.file_name;
        self.completion_percent = if self.file_name.is_empty() {
            0.0
        } else {
            clamp_completion(Some(snapshot.completion_percent))
        };

        self.is_connected = !matches!(
            snapshot.connection,
            ConnectionState::Closed | ConnectionState::Offline | ConnectionState::Error
        );
        self.is_printing = snapshot.connection == ConnectionState::Printing;
        self.is_paused = matches!(
            snapshot.connection,
            ConnectionState::Paused | ConnectionState::Pausing
        );
        self.job_loaded = job_loaded(&snapshot.connection, &self.file_name);
        self.connection = snapshot.connection;

        self.hotend_history.push(self.hotend_temp);
        self.bed_history.push(self.bed_temp);
    }

    /// Whether the hot end has a non-zero target temperature.
    #[must_use]
    pub fn hot_end_heating(&self) -> bool {
        self.hotend_target > 0.0
    }

    /// Whether the bed has a non-zero target temperature.
    #[must_use]
    pub fn bed_heating(&self) -> bool {
        self.bed_target > 0.0
    }

    /// Whether a job is running or paused, i.e. manual moves must be blocked.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.is_printing || self.is_paused
    }
}

/// A job counts as loaded only while the printer is idle and a file is selected.
#[must_use]
pub fn job_loaded(connection: &ConnectionState, file_name: &str) -> bool {
    *connection == ConnectionState::Operational && !file_name.is_empty()
}

/// Normalizes a server-reported completion value into `[0, 100]`.
///
/// Missing and non-finite values become 0; everything else is clamped.
///
/// ```
/// use octopanel::domain::printer::clamp_completion;
///
/// assert_eq!(clamp_completion(Some(150.0)), 100.0);
/// assert_eq!(clamp_completion(Some(-10.0)), 0.0);
/// assert_eq!(clamp_completion(None), 0.0);
/// ```
#[must_use]
pub fn clamp_completion(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Thread-safe handle to the process-wide [`PrinterState`].
///
/// Cloning the handle shares the same record. Lock poisoning is recovered
/// rather than propagated; the state is plain data and stays usable.
#[derive(Debug, Clone, Default)]
pub struct SharedPrinter {
    inner: Arc<Mutex<PrinterState>>,
}

impl SharedPrinter {
    #[must_use]
    pub fn new(state: PrinterState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PrinterState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> PrinterState {
        self.lock().clone()
    }

    /// Applies a complete poll result under the lock.
    pub fn apply(&self, snapshot: StatusSnapshot) {
        self.lock().apply(snapshot);
    }
}
