//! Input events and the dispatcher.
//!
//! [`handle_event`] decides who sees each event. The decision order is:
//!
//! 1. `Quit` and `Escape` end the loop, whatever else is going on.
//! 2. Pointer events inside the menu button rect go to the button only; a
//!    completed click toggles the menu.
//! 3. Everything else goes to exactly one handler: the menu while it is
//!    open, otherwise the active view.
//!
//! `SelectView` actions returned by that handler are consumed here; all other
//! actions are passed up for the runtime to execute.
//!
//! # Example
//!
//! ```no_run
//! use octopanel::app::{handle_event, AppState, InputEvent};
//! use octopanel::client::PrinterClient;
//! use octopanel::domain::{PrinterState, SharedPrinter};
//! use octopanel::ui::{Theme, ViewContext};
//! use octopanel::Config;
//!
//! let config = Config::default();
//! let mut state = AppState::from_config(&config)?;
//! let client = PrinterClient::from_config(&config, SharedPrinter::default());
//! let printer = PrinterState::default();
//! let theme = Theme::default();
//! let ctx = ViewContext { printer: &printer, layout: state.layout, theme: &theme, client: &client };
//!
//! let (changed, actions) = handle_event(&mut state, &InputEvent::PointerDown { x: 280, y: 20 }, &ctx);
//! # Ok::<(), octopanel::PanelError>(())
//! ```

use super::actions::Action;
use super::modes::MenuState;
use super::state::AppState;
use crate::ui::{Point, ViewContext};
use std::time::Instant;

/// Keys the panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Input delivered by the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    KeyDown(Key),
    /// Window closed or input source exhausted.
    Quit,
}

impl InputEvent {
    /// Pointer position, for pointer events.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y } | Self::PointerUp { x, y } | Self::PointerMove { x, y } => {
                Some(Point::new(x, y))
            }
            Self::KeyDown(_) | Self::Quit => None,
        }
    }
}

/// Dispatches one event and returns whether UI state changed plus the actions to run.
///
/// "Changed" covers menu toggles and view switches; the runtime re-renders
/// every frame regardless.
pub fn handle_event(state: &mut AppState, event: &InputEvent, ctx: &ViewContext<'_>) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event = ?event, menu = ?state.menu_state).entered();

    if matches!(event, InputEvent::Quit | InputEvent::KeyDown(Key::Escape)) {
        tracing::info!("quit requested");
        state.done = true;
        return (false, vec![Action::Quit]);
    }

    if matches!(event, InputEvent::PointerDown { .. }) {
        state.inactivity.touch(Instant::now());
    }

    let on_button = event
        .position()
        .is_some_and(|p| state.menu_button.visible && state.menu_button.rect.contains(p));
    if on_button {
        if state.menu_button.handle_event(event) {
            state.toggle_menu();
            return (true, Vec::new());
        }
        // A release whose press began elsewhere still goes to the target so it drops that press.
        if !matches!(event, InputEvent::PointerUp { .. }) {
            return (false, Vec::new());
        }
    }
    if matches!(event, InputEvent::PointerUp { .. }) {
        state.menu_button.release();
    }

    let produced = match state.menu_state {
        MenuState::MenuOpen => state.menu.handle_input(event, ctx),
        MenuState::MenuClosed => state
            .registry
            .active_view_mut()
            .map(|view| view.handle_input(event, ctx))
            .unwrap_or_default(),
    };

    let mut changed = false;
    let mut actions = Vec::with_capacity(produced.len());
    for action in produced {
        match action {
            Action::SelectView(name) => {
                if state.select_view(&name) {
                    changed = true;
                }
            }
            Action::Quit => {
                state.done = true;
                actions.push(Action::Quit);
            }
            other => actions.push(other),
        }
    }

    (changed, actions)
}
