//! Title bar renderer.

use crate::ui::helpers::{centered_y, hline};
use crate::ui::surface::{Point, Surface, TextSize};
use crate::ui::theme::Theme;
use crate::ui::view::{to_i32, Layout};

/// Left margin of the title text.
const TITLE_MARGIN: i32 = 10;

/// Draws the title bar: the label on the left and a divider along its bottom edge.
///
/// The menu button is drawn separately, on top of this bar.
pub fn render_title_bar(surface: &mut dyn Surface, layout: Layout, title: &str, theme: &Theme) {
    let bar = layout.title_bar();
    let size = TextSize::Regular;

    surface.draw_text(
        Point::new(TITLE_MARGIN, centered_y(bar, size)),
        title,
        Theme::rgb(&theme.colors.title_fg),
        size,
    );
    hline(surface, bar, to_i32(bar.h) - 1, Theme::rgb(&theme.colors.divider));
}
