//! Empty and error state renderers.

use crate::ui::helpers::draw_centered;
use crate::ui::surface::{Color, Rect, Surface, TextSize};
use crate::ui::theme::Theme;

/// Draws a centred message with an optional dimmed second line inside `area`.
pub fn render_empty_state(
    surface: &mut dyn Surface,
    area: Rect,
    message: &str,
    subtitle: Option<&str>,
    theme: &Theme,
) {
    render_message(surface, area, message, Theme::rgb(&theme.colors.text), subtitle, theme);
}

/// Like [`render_empty_state`], with the message in the theme's error colour.
pub fn render_error_state(
    surface: &mut dyn Surface,
    area: Rect,
    message: &str,
    detail: Option<&str>,
    theme: &Theme,
) {
    render_message(surface, area, message, Theme::rgb(&theme.colors.error_fg), detail, theme);
}

fn render_message(
    surface: &mut dyn Surface,
    area: Rect,
    message: &str,
    color: Color,
    subtitle: Option<&str>,
    theme: &Theme,
) {
    let line_h = TextSize::Regular.px() + 4;
    let mid = area.y + i32::try_from(area.h / 2).unwrap_or(0);
    let line_h_i = i32::try_from(line_h).unwrap_or(0);

    let first = Rect::new(area.x, mid - line_h_i, area.w, line_h);
    draw_centered(surface, first, message, color, TextSize::Regular);

    if let Some(subtitle) = subtitle {
        let second = Rect::new(area.x, mid, area.w, line_h);
        draw_centered(surface, second, subtitle, Theme::rgb(&theme.colors.text_dim), TextSize::Small);
    }
}
