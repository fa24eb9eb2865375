//! Actions representing side effects to be executed by the panel runtime.
//!
//! Views and the event handler never talk to the server or the OS directly.
//! They return [`Action`]s, and the runtime executes them in order after the
//! event has been dispatched.
//!
//! # Example
//!
//! ```
//! use octopanel::app::Action;
//! use octopanel::domain::{Axis, Command};
//!
//! let actions = vec![
//!     Action::SendCommand(Command::home(Axis::X)),
//!     Action::SelectView("graph".to_string()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::Command;

/// Commands produced by views and the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// POSTs a command to the printer server.
    ///
    /// Executed synchronously on the UI thread; failures are logged and the
    /// shared state catches up on the next poll.
    SendCommand(Command),

    /// Activates the named view and closes the menu.
    ///
    /// Consumed inside the event handler; never reaches the runtime.
    SelectView(String),

    /// Leaves the main loop.
    Quit,

    /// Leaves the main loop and reboots the host.
    Reboot,

    /// Leaves the main loop and powers the host off.
    Shutdown,
}
