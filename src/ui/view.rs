//! The view capability set and the context handed to views.
//!
//! Every screen implements [`View`]. Views never hold references to the
//! client or the printer state; both arrive through [`ViewContext`] on each
//! call, built by the runtime from the current state snapshot.

use super::surface::{Rect, Surface};
use super::theme::Theme;
use crate::app::{Action, InputEvent};
use crate::client::PrinterClient;
use crate::domain::PrinterState;

/// Height of the title bar and the status bar in pixels.
pub const BAR_HEIGHT: u32 = 40;

/// Side length of the square menu button.
pub const MENU_BUTTON_SIZE: u32 = 40;

/// Screen geometry shared by all views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub bar_height: u32,
}

impl Layout {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bar_height: BAR_HEIGHT,
        }
    }

    #[must_use]
    pub const fn title_bar(&self) -> Rect {
        Rect::new(0, 0, self.width, self.bar_height)
    }

    #[must_use]
    pub fn status_bar(&self) -> Rect {
        let top = self.height.saturating_sub(self.bar_height);
        Rect::new(0, to_i32(top), self.width, self.bar_height)
    }

    /// Area between the two bars.
    #[must_use]
    pub fn content(&self) -> Rect {
        let h = self.height.saturating_sub(self.bar_height * 2);
        Rect::new(0, to_i32(self.bar_height), self.width, h)
    }

    /// The menu button sits in the title bar, one button width from the right edge.
    #[must_use]
    pub fn menu_button(&self) -> Rect {
        let x = self.width.saturating_sub(MENU_BUTTON_SIZE * 3 / 2);
        Rect::new(to_i32(x), 0, MENU_BUTTON_SIZE, MENU_BUTTON_SIZE.min(self.bar_height))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(320, 240)
    }
}

/// Converts a pixel dimension to a coordinate, saturating on overflow.
#[must_use]
pub fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Everything a view may read while handling input or rendering.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Snapshot of the last successful poll.
    pub printer: &'a PrinterState,
    pub layout: Layout,
    pub theme: &'a Theme,
    /// For one-time fetches on activation. Commands go through [`Action::SendCommand`].
    pub client: &'a PrinterClient,
}

/// A screen of the panel.
pub trait View {
    /// Reacts to one input event and returns the resulting actions.
    fn handle_input(&mut self, event: &InputEvent, ctx: &ViewContext<'_>) -> Vec<Action>;

    /// Draws the view into the content area.
    ///
    /// `first_frame` is `true` on the first render after each activation.
    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, first_frame: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Point;

    #[test]
    fn default_layout_matches_panel_geometry() {
        let layout = Layout::default();
        assert_eq!(layout.menu_button(), Rect::new(260, 0, 40, 40));
        assert_eq!(layout.content(), Rect::new(0, 40, 320, 160));
        assert_eq!(layout.status_bar(), Rect::new(0, 200, 320, 40));
        assert!(layout.menu_button().contains(Point::new(280, 20)));
    }
}
