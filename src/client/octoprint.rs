//! REST client for the printer server.
//!
//! [`PrinterClient`] turns panel actions into authenticated HTTP requests and
//! status polls into [`PrinterState`](crate::domain::PrinterState) updates.
//!
//! # Poll Semantics
//!
//! A poll is three GET requests (printer, job, connection). The shared state is
//! only touched once all three have answered HTTP 200 with decodable bodies;
//! the new values are then applied in one locked step. Any failure leaves the
//! previous state in place.

use super::models::{ConnectionResponse, FileNode, FilesResponse, HeaterReading, JobResponse, PrinterResponse};
use super::transport::{Transport, UreqTransport};
use crate::domain::error::{PanelError, Result};
use crate::domain::printer::clamp_completion;
use crate::domain::{Command, ConnectionState, FileEntry, SharedPrinter, StatusSnapshot};
use crate::Config;
use serde::de::DeserializeOwned;
use std::time::Duration;

const PRINTER_ENDPOINT: &str = "/api/printer";
const JOB_ENDPOINT: &str = "/api/job";
const CONNECTION_ENDPOINT: &str = "/api/connection";
const FILES_ENDPOINT: &str = "/api/files";

/// Client for the printer server's REST API.
///
/// Shared between the UI thread (commands, file list) and the poller thread
/// (status), typically behind an `Arc`.
///
/// # Examples
///
/// ```no_run
/// use octopanel::client::{PrinterClient, UreqTransport};
/// use octopanel::domain::{Command, PrinterState, SharedPrinter};
/// use std::time::Duration;
///
/// let printer = SharedPrinter::new(PrinterState::default());
/// let client = PrinterClient::new(
///     "http://octopi.local",
///     "secret",
///     Box::new(UreqTransport::new(Duration::from_secs(5))),
///     printer.clone(),
/// );
///
/// client.poll_status()?;
/// client.send_command(&Command::StartJob)?;
/// println!("{:.1}%", printer.snapshot().completion_percent);
/// # Ok::<(), octopanel::PanelError>(())
/// ```
pub struct PrinterClient {
    base_url: String,
    api_key: String,
    transport: Box<dyn Transport>,
    printer: SharedPrinter,
}

impl PrinterClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// A trailing `/` on the base URL is ignored.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        transport: Box<dyn Transport>,
        printer: SharedPrinter,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
            transport,
            printer,
        }
    }

    /// Creates a client using the `ureq` transport and the configured timeout.
    #[must_use]
    pub fn from_config(config: &Config, printer: SharedPrinter) -> Self {
        let transport = UreqTransport::new(Duration::from_millis(config.request_timeout_ms));
        Self::new(&config.base_url, &config.api_key, Box::new(transport), printer)
    }

    /// Handle to the state this client updates.
    #[must_use]
    pub const fn printer(&self) -> &SharedPrinter {
        &self.printer
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GETs `path` and decodes a 200 response body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.transport.get(&self.url(path), &self.api_key)?;
        if response.status != 200 {
            return Err(PanelError::ServerError {
                endpoint: path.to_string(),
                status: response.status,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| PanelError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Queries printer, job and connection status and combines them into one snapshot.
    ///
    /// Does not touch the shared state.
    ///
    /// # Errors
    ///
    /// - [`PanelError::ConnectionFailed`] if any request got no response
    /// - [`PanelError::ServerError`] if any request returned a status other than 200
    /// - [`PanelError::Decode`] if a body does not match the expected schema
    pub fn fetch_status(&self) -> Result<StatusSnapshot> {
        let printer: PrinterResponse = self.get_json(PRINTER_ENDPOINT)?;
        let job: JobResponse = self.get_json(JOB_ENDPOINT)?;
        let connection: ConnectionResponse = self.get_json(CONNECTION_ENDPOINT)?;

        Ok(build_snapshot(printer, job, connection))
    }

    /// Runs one poll and applies the result to the shared state.
    ///
    /// On failure the shared state is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_status`](Self::fetch_status).
    pub fn poll_status(&self) -> Result<()> {
        let _span = tracing::debug_span!("poll_status", base_url = %self.base_url).entered();

        let snapshot = self.fetch_status()?;
        tracing::debug!(
            hotend = snapshot.hotend_temp,
            bed = snapshot.bed_temp,
            completion = snapshot.completion_percent,
            connection = ?snapshot.connection,
            "poll succeeded"
        );
        self.printer.apply(snapshot);
        Ok(())
    }

    /// POSTs a command to the server.
    ///
    /// Does not update the shared state; the next poll picks up the effect.
    ///
    /// # Errors
    ///
    /// - [`PanelError::ConnectionFailed`] if the server could not be reached
    /// - [`PanelError::Rejected`] if the server answered with a non-2xx status
    pub fn send_command(&self, command: &Command) -> Result<()> {
        let endpoint = command.endpoint();
        let payload = command.payload();
        tracing::debug!(command = command.kind(), endpoint = %endpoint, "sending command");

        let response = self
            .transport
            .post_json(&self.url(&endpoint), &self.api_key, &payload)?;

        if response.is_success() {
            Ok(())
        } else {
            Err(PanelError::Rejected {
                endpoint,
                status: response.status,
                body: response.body,
            })
        }
    }

    /// Lists printable files on local storage, newest first.
    ///
    /// Folders are flattened; entries inside them are named by their path.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_status`](Self::fetch_status).
    pub fn list_files(&self) -> Result<Vec<FileEntry>> {
        let response: FilesResponse = self.get_json(FILES_ENDPOINT)?;
        let mut files = Vec::new();
        collect_files(response.files, &mut files);
        files.sort_by(|a, b| b.date.cmp(&a.date));
        tracing::debug!(file_count = files.len(), "file list loaded");
        Ok(files)
    }
}

impl std::fmt::Debug for PrinterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrinterClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn reading(heater: Option<&HeaterReading>) -> (f64, f64) {
    let finite = |v: Option<f64>| v.filter(|t| t.is_finite()).unwrap_or(0.0);
    heater.map_or((0.0, 0.0), |h| (finite(h.actual), finite(h.target).max(0.0)))
}

/// Normalizes the three status responses into a snapshot.
///
/// Missing values become zero or empty; they are never carried over from an
/// earlier poll.
fn build_snapshot(
    printer: PrinterResponse,
    job: JobResponse,
    connection: ConnectionResponse,
) -> StatusSnapshot {
    let temps = printer.temperature.unwrap_or_default();
    let (hotend_temp, hotend_target) = reading(temps.tool0.as_ref());
    let (bed_temp, bed_target) = reading(temps.bed.as_ref());

    let file_name = job
        .job
        .and_then(|j| j.file)
        .and_then(|f| f.name)
        .unwrap_or_default();

    let progress = job.progress.unwrap_or_default();
    let completion_percent = if file_name.is_empty() {
        0.0
    } else {
        clamp_completion(progress.completion)
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let print_time_left_seconds = progress
        .print_time_left
        .filter(|t| t.is_finite() && *t > 0.0)
        .map_or(0, |t| t.round() as u64);

    let state_text = connection
        .current
        .and_then(|c| c.state)
        .or(job.state)
        .unwrap_or_else(|| "Closed".to_string());

    StatusSnapshot {
        hotend_temp,
        hotend_target,
        bed_temp,
        bed_target,
        completion_percent,
        print_time_left_seconds,
        file_name,
        connection: ConnectionState::from_text(&state_text),
    }
}

fn collect_files(nodes: Vec<FileNode>, out: &mut Vec<FileEntry>) {
    for node in nodes {
        if node.kind.as_deref() == Some("folder") {
            collect_files(node.children, out);
            continue;
        }
        if node.origin.as_deref().is_some_and(|o| o != "local") {
            continue;
        }
        out.push(FileEntry {
            name: node.path.unwrap_or(node.name),
            size: node.size.unwrap_or(0),
            date: node.date.unwrap_or(0),
        });
    }
}
