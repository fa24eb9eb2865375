//! HTTP transport abstraction.
//!
//! This module defines the [`Transport`] trait that abstracts over the HTTP
//! stack used to reach the printer server. [`PrinterClient`](super::PrinterClient)
//! only needs two verbs, so the trait stays that small; tests substitute a
//! scripted implementation.
//!
//! # Contract
//!
//! An implementation returns `Ok` whenever the server produced *any* HTTP
//! response, whatever its status, and `Err(PanelError::ConnectionFailed)` when
//! it did not. Interpreting the status is the client's job.

use crate::domain::error::{PanelError, Result};
use serde_json::Value;
use std::time::Duration;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Status code and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Abstraction over the HTTP client.
///
/// Implementations must be shareable between the UI thread and the poller
/// thread.
///
/// # Examples
///
/// ```no_run
/// use octopanel::client::{Transport, UreqTransport};
/// use std::time::Duration;
///
/// let transport = UreqTransport::new(Duration::from_secs(5));
/// let response = transport.get("http://octopi.local/api/job", "secret")?;
/// println!("HTTP {}", response.status);
/// # Ok::<(), octopanel::PanelError>(())
/// ```
pub trait Transport: Send + Sync {
    /// Issues a GET request authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::ConnectionFailed`] if no response was received.
    fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse>;

    /// POSTs `body` as JSON, authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::ConnectionFailed`] if no response was received.
    fn post_json(&self, url: &str, api_key: &str, body: &Value) -> Result<HttpResponse>;
}

/// Blocking [`Transport`] backed by a `ureq` agent.
///
/// The agent keeps a small connection pool, so the poller reuses its
/// keep-alive connection between rounds.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Creates a transport whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .build();
        Self { agent }
    }

    fn finish(result: std::result::Result<ureq::Response, ureq::Error>) -> Result<HttpResponse> {
        match result {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .into_string()
                    .map_err(|e| PanelError::ConnectionFailed(format!("reading body: {e}")))?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(PanelError::ConnectionFailed(transport.to_string()))
            }
        }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse> {
        tracing::trace!(url = %url, "GET");
        Self::finish(self.agent.get(url).set(API_KEY_HEADER, api_key).call())
    }

    fn post_json(&self, url: &str, api_key: &str, body: &Value) -> Result<HttpResponse> {
        tracing::trace!(url = %url, body = %body, "POST");
        Self::finish(self.agent.post(url).set(API_KEY_HEADER, api_key).send_json(body))
    }
}
