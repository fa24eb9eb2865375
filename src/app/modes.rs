//! Menu overlay state.
//!
//! The dispatcher is a two-state machine: the menu overlay is either open,
//! in which case it owns all input and rendering, or closed, in which case the
//! active view does.
//!
//! ```text
//!            menu button click
//! MenuClosed ─────────────────► MenuOpen
//!     ▲      ◄─────────────────    │
//!     │       menu button click    │
//!     └────────────────────────────┘
//!            menu item selected
//! ```

/// Whether the menu overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// The overlay receives every event and is drawn instead of the active view.
    MenuOpen,

    /// The active view receives events. Initial state.
    #[default]
    MenuClosed,
}

impl MenuState {
    /// The state after a menu button click.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::MenuOpen => Self::MenuClosed,
            Self::MenuClosed => Self::MenuOpen,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::MenuOpen)
    }
}
