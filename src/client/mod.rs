//! Client layer for the printer server's REST API.
//!
//! # Modules
//!
//! - `transport`: HTTP seam ([`Transport`]) and its `ureq` implementation
//! - `models`: JSON response schemas, kept apart from domain types
//! - `octoprint`: [`PrinterClient`], polling and command dispatch
//!
//! # Example
//!
//! ```no_run
//! use octopanel::client::PrinterClient;
//! use octopanel::domain::{PrinterState, SharedPrinter};
//! use octopanel::Config;
//!
//! let config = Config::from_file("octopanel.toml")?;
//! let client = PrinterClient::from_config(&config, SharedPrinter::new(PrinterState::default()));
//! let files = client.list_files()?;
//! # Ok::<(), octopanel::PanelError>(())
//! ```

pub mod models;
pub mod octoprint;
pub mod transport;

pub use octoprint::PrinterClient;
pub use transport::{HttpResponse, Transport, UreqTransport, API_KEY_HEADER};
