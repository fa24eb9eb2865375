//! Shared drawing helpers.

use super::surface::{Color, Point, Rect, Surface, TextSize};
use super::view::to_i32;

/// Left edge that horizontally centres `text` inside `rect`.
pub fn centered_x(surface: &dyn Surface, rect: Rect, text: &str, size: TextSize) -> i32 {
    let free = i64::from(rect.w) - i64::from(surface.text_width(text, size));
    rect.x + i32::try_from(free.max(0) / 2).unwrap_or(0)
}

/// Top edge that vertically centres a line of `size` inside `rect`.
#[must_use]
pub fn centered_y(rect: Rect, size: TextSize) -> i32 {
    rect.y + (to_i32(rect.h) - to_i32(size.px())).max(0) / 2
}

/// Draws `text` centred in both directions inside `rect`.
pub fn draw_centered(surface: &mut dyn Surface, rect: Rect, text: &str, color: Color, size: TextSize) {
    let at = Point::new(centered_x(surface, rect, text, size), centered_y(rect, size));
    surface.draw_text(at, text, color, size);
}

/// Draws a one pixel horizontal line across `rect` at row `y`.
pub fn hline(surface: &mut dyn Surface, rect: Rect, y: i32, color: Color) {
    surface.draw_line(Point::new(rect.x, y), Point::new(rect.right() - 1, y), color, 1);
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `~`.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('~');
    out
}
