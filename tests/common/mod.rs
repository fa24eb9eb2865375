//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use octopanel::client::{HttpResponse, PrinterClient, Transport};
use octopanel::domain::{PrinterState, SharedPrinter};
use octopanel::{PanelError, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://printer.test";
pub const API_KEY: &str = "test-key";

pub const PRINTER_BODY: &str =
    r#"{"temperature": {"tool0": {"actual": 201.3, "target": 210.0}, "bed": {"actual": 60.0, "target": 60.0}}}"#;
pub const JOB_BODY: &str =
    r#"{"job": {"file": {"name": "cube.gcode"}}, "progress": {"completion": 42.5, "printTimeLeft": 600}, "state": "Operational"}"#;
pub const CONNECTION_BODY: &str = r#"{"current": {"state": "Operational"}}"#;

/// One request seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub api_key: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Script {
    queued: VecDeque<Result<HttpResponse>>,
    routes: Vec<(String, HttpResponse)>,
    requests: Vec<Request>,
}

/// Scripted transport: answers from a queue first, then from fixed routes
/// matched by URL suffix, and fails with `ConnectionFailed` otherwise.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    script: Arc<Mutex<Script>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that answers every status endpoint with 200.
    pub fn healthy() -> Self {
        let fake = Self::new();
        fake.route("/api/printer", 200, PRINTER_BODY);
        fake.route("/api/job", 200, JOB_BODY);
        fake.route("/api/connection", 200, CONNECTION_BODY);
        fake
    }

    pub fn push(&self, status: u16, body: &str) {
        self.lock().queued.push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_error(&self, message: &str) {
        self.lock()
            .queued
            .push_back(Err(PanelError::ConnectionFailed(message.to_string())));
    }

    pub fn route(&self, suffix: &str, status: u16, body: &str) {
        self.lock()
            .routes
            .push((suffix.to_string(), HttpResponse::new(status, body)));
    }

    pub fn clear_routes(&self) {
        self.lock().routes.clear();
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn posts(&self) -> Vec<Request> {
        self.requests().into_iter().filter(|r| r.method == "POST").collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    fn answer(&self, request: Request) -> Result<HttpResponse> {
        let mut script = self.lock();
        let url = request.url.clone();
        script.requests.push(request);
        if let Some(response) = script.queued.pop_front() {
            return response;
        }
        script
            .routes
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map(|(_, response)| response.clone())
            .ok_or_else(|| PanelError::ConnectionFailed(format!("no route for {url}")))
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse> {
        self.answer(Request {
            method: "GET",
            url: url.to_string(),
            api_key: api_key.to_string(),
            body: None,
        })
    }

    fn post_json(&self, url: &str, api_key: &str, body: &Value) -> Result<HttpResponse> {
        self.answer(Request {
            method: "POST",
            url: url.to_string(),
            api_key: api_key.to_string(),
            body: Some(body.clone()),
        })
    }
}

/// A client over `fake` with a fresh printer state.
pub fn client(fake: &FakeTransport) -> PrinterClient {
    let printer = SharedPrinter::new(PrinterState::default());
    PrinterClient::new(BASE_URL, API_KEY, Box::new(fake.clone()), printer)
}
