//! Panel chrome drawn around every view.
//!
//! # Components
//!
//! - [`header`]: title bar with the active view's label
//! - [`footer`]: status bar with temperatures and completion
//! - [`empty`]: centred message for views with nothing to show or a failed load
//!
//! The background and the completion shade are drawn here directly, before
//! the view, so that views paint on top of them.

mod empty;
mod footer;
mod header;

pub use empty::{render_empty_state, render_error_state};
pub use footer::{render_status_bar, status_lines};
pub use header::render_title_bar;

use crate::domain::PrinterState;
use crate::ui::surface::{Rect, Surface};
use crate::ui::theme::Theme;
use crate::ui::view::Layout;

/// Clears the screen to the theme background.
pub fn render_background(surface: &mut dyn Surface, layout: Layout, theme: &Theme) {
    surface.fill_rect(
        Rect::new(0, 0, layout.width, layout.height),
        Theme::rgb(&theme.colors.background),
    );
}

/// Shades the left part of the screen in proportion to job completion.
///
/// Nothing is drawn at 0 %.
pub fn render_progress_shade(surface: &mut dyn Surface, layout: Layout, printer: &PrinterState, theme: &Theme) {
    let width = shade_width(layout.width, printer.completion_percent);
    if width == 0 {
        return;
    }
    surface.fill_rect(
        Rect::new(0, 0, width, layout.height),
        Theme::rgb(&theme.colors.progress_shade),
    );
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shade_width(screen_width: u32, completion: f64) -> u32 {
    let fraction = completion.clamp(0.0, 100.0) / 100.0;
    (f64::from(screen_width) * fraction).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_tracks_completion() {
        assert_eq!(shade_width(320, 0.0), 0);
        assert_eq!(shade_width(320, 50.0), 160);
        assert_eq!(shade_width(320, 100.0), 320);
        assert_eq!(shade_width(320, 250.0), 320);
    }
}
