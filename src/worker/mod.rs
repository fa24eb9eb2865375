//! Background worker for periodic status polling.
//!
//! The poller owns an `Arc<PrinterClient>` and writes into the shared
//! [`PrinterState`](crate::domain::PrinterState) through the client's
//! mutex-guarded handle. The UI thread never waits on it.
//!
//! # Architecture
//!
//! - `poller`: the polling loop and its thread handle

pub mod poller;

pub use poller::{Poller, PollerHandle};
