//! Application layer coordinating state, events, and actions.
//!
//! Sits between the display/input backend and the client. Input flows one
//! way:
//!
//! ```text
//! InputEvent → handle_event → menu | active view → Actions → Panel runtime
//!                                                              │
//!                            PrinterClient::send_command ◄─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects returned to the runtime
//! - [`handler`]: input events and the dispatcher
//! - [`input`]: line-oriented input source
//! - [`modes`]: the menu open/closed state machine
//! - [`state`]: UI-thread state and the inactivity timer
//! - [`runtime`]: the frame loop

pub mod actions;
pub mod handler;
pub mod input;
pub mod modes;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, InputEvent, Key};
pub use modes::MenuState;
pub use runtime::{ExitReason, Panel};
pub use state::{AppState, InactivityTimer};
