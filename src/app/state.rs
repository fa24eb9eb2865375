//! Application state owned by the UI thread.
//!
//! [`AppState`] holds everything the dispatcher mutates: the view registry,
//! the menu overlay and its button, and the inactivity timer. Printer status
//! is deliberately absent; it lives in the shared
//! [`PrinterState`](crate::domain::PrinterState) and reaches views through
//! [`ViewContext`](crate::ui::ViewContext).

use super::modes::MenuState;
use crate::domain::error::Result;
use crate::ui::views::{self, MenuView};
use crate::ui::{Button, Layout, View, ViewRegistry};
use crate::Config;
use std::time::{Duration, Instant};

/// Tracks time since the last screen touch.
///
/// A zero timeout disables idling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityTimer {
    timeout: Duration,
    last_touch: Instant,
}

impl InactivityTimer {
    #[must_use]
    pub const fn new(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            last_touch: now,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_touch = now;
    }

    #[must_use]
    pub const fn last_touch(&self) -> Instant {
        self.last_touch
    }

    /// Whether `timeout` has elapsed since the last touch.
    #[must_use]
    pub fn is_idle(&self, now: Instant) -> bool {
        !self.timeout.is_zero() && now.saturating_duration_since(self.last_touch) >= self.timeout
    }
}

/// Mutable UI state.
pub struct AppState {
    pub registry: ViewRegistry,
    /// The overlay listing the registry's views.
    pub menu: Box<dyn View>,
    pub menu_state: MenuState,
    pub menu_button: Button,
    pub layout: Layout,
    pub inactivity: InactivityTimer,
    /// Set once a quit has been requested.
    pub done: bool,
}

impl AppState {
    /// Creates the state around an already populated registry.
    pub fn new(registry: ViewRegistry, menu: Box<dyn View>, layout: Layout, idle_timeout: Duration) -> Self {
        Self {
            registry,
            menu,
            menu_state: MenuState::default(),
            menu_button: Button::new(layout.menu_button(), "="),
            layout,
            inactivity: InactivityTimer::new(idle_timeout, Instant::now()),
            done: false,
        }
    }

    /// Builds the standard panel: every built-in view plus the menu.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::DuplicateView`](crate::PanelError::DuplicateView)
    /// if the built-in registry is inconsistent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let layout = Layout::new(config.width, config.height);
        let registry = views::default_registry(config, layout)?;
        let menu = MenuView::new(registry.menu_items(), layout);
        tracing::debug!(views = registry.len(), "view registry built");

        Ok(Self::new(
            registry,
            Box::new(menu),
            layout,
            Duration::from_millis(config.backlight_off_time_ms),
        ))
    }

    /// Activates `name` and closes the menu.
    ///
    /// Unknown names change nothing, including the menu state.
    pub fn select_view(&mut self, name: &str) -> bool {
        if !self.registry.select(name) {
            return false;
        }
        self.menu_state = MenuState::MenuClosed;
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_state = self.menu_state.toggled();
        tracing::debug!(menu = ?self.menu_state, "menu toggled");
    }

    #[must_use]
    pub fn is_idle(&self, now: Instant) -> bool {
        self.inactivity.is_idle(now)
    }

    /// Text for the title bar.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.menu_state.is_open() {
            "Menu"
        } else {
            self.registry.active_label().unwrap_or_default()
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("registry", &self.registry)
            .field("menu_state", &self.menu_state)
            .field("layout", &self.layout)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_idles_after_timeout() {
        let start = Instant::now();
        let mut timer = InactivityTimer::new(Duration::from_secs(30), start);
        assert!(!timer.is_idle(start + Duration::from_secs(29)));
        assert!(timer.is_idle(start + Duration::from_secs(30)));

        timer.touch(start + Duration::from_secs(30));
        assert!(!timer.is_idle(start + Duration::from_secs(31)));
    }

    #[test]
    fn zero_timeout_never_idles() {
        let start = Instant::now();
        let timer = InactivityTimer::new(Duration::ZERO, start);
        assert!(!timer.is_idle(start + Duration::from_secs(3600)));
    }

    #[test]
    fn standard_panel_starts_on_dashboard() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(state.registry.active_name(), Some("dashboard"));
        assert_eq!(state.menu_state, MenuState::MenuClosed);
        assert_eq!(state.title(), "Dashboard");
        assert_eq!(state.registry.len(), 5);
    }

    #[test]
    fn unknown_selection_keeps_menu_open() {
        let mut state = AppState::from_config(&Config::default()).unwrap();
        state.toggle_menu();
        assert!(!state.select_view("missing"));
        assert_eq!(state.menu_state, MenuState::MenuOpen);

        assert!(state.select_view("graph"));
        assert_eq!(state.menu_state, MenuState::MenuClosed);
        assert_eq!(state.title(), "Temperature Graph");
    }
}
