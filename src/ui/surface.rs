//! Abstract drawing surface.
//!
//! Views draw through the [`Surface`] trait and never see the concrete
//! backend. Coordinates are in pixels of the configured display, origin top
//! left. [`RecordingSurface`] keeps the calls as data, which is what the tests
//! inspect; [`TerminalSurface`](super::terminal::TerminalSurface) rasterises
//! them for a terminal.

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the `#` is optional).
    ///
    /// ```
    /// use octopanel::ui::Color;
    ///
    /// assert_eq!(Color::from_hex("#EF3220"), Some(Color::rgb(0xEF, 0x32, 0x20)));
    /// assert_eq!(Color::from_hex("nope"), None);
    /// ```
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether `point` lies inside (left/top edges inclusive, right/bottom exclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && px < x + i64::from(self.w) && py >= y && py < y + i64::from(self.h)
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(i32::try_from(self.w).unwrap_or(i32::MAX))
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(i32::try_from(self.h).unwrap_or(i32::MAX))
    }
}

/// Font sizes used by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSize {
    /// Axis labels.
    Small,
    /// Status bar and list rows.
    Regular,
    /// Completion percentage.
    Large,
    /// Time remaining on the dashboard.
    Huge,
}

impl TextSize {
    /// Nominal glyph height in pixels.
    #[must_use]
    pub const fn px(self) -> u32 {
        match self {
            Self::Small => 10,
            Self::Regular => 16,
            Self::Large => 30,
            Self::Huge => 60,
        }
    }

    /// Approximate horizontal advance per character in pixels.
    #[must_use]
    pub const fn advance(self) -> u32 {
        self.px() * 11 / 20
    }
}

/// Backend-independent drawing target.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32);

    fn draw_text(&mut self, at: Point, text: &str, color: Color, size: TextSize);

    /// Estimated rendered width of `text`, used for centring.
    fn text_width(&self, text: &str, size: TextSize) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(size.advance())
    }

    /// Pushes the finished frame to the display.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot write the frame.
    fn present(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    FillRect { rect: Rect, color: Color },
    Line { from: Point, to: Point, color: Color, width: u32 },
    Text { at: Point, text: String, color: Color, size: TextSize },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
    pub frames_presented: usize,
}

impl RecordingSurface {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            frames_presented: 0,
        }
    }

    /// All text drawn so far, in call order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any drawn text contains `needle`.
    #[must_use]
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) {
        self.calls.push(DrawCall::Line { from, to, color, width });
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Color, size: TextSize) {
        self.calls.push(DrawCall::Text {
            at,
            text: text.to_string(),
            color,
            size,
        });
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(29, 29)));
        assert!(!rect.contains(Point::new(30, 10)));
        assert!(!rect.contains(Point::new(9, 15)));
    }

    #[test]
    fn recording_surface_collects_text() {
        let mut surface = RecordingSurface::new(320, 240);
        surface.draw_text(Point::new(0, 0), "Hot end: 200", Color::WHITE, TextSize::Regular);
        surface.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK);
        assert_eq!(surface.texts(), vec!["Hot end: 200"]);
        assert!(surface.has_text("Hot end"));
    }
}
