//! Touch button widget.

use super::surface::{Point, Rect, Surface, TextSize};
use super::theme::Theme;
use crate::app::InputEvent;

/// A rectangular button that fires when a press is released inside it.
///
/// Hidden buttons ignore input and draw nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub rect: Rect,
    pub caption: String,
    pub visible: bool,
    pressed: bool,
}

impl Button {
    pub fn new(rect: Rect, caption: impl Into<String>) -> Self {
        Self {
            rect,
            caption: caption.into(),
            visible: true,
            pressed: false,
        }
    }

    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Drops a pending press without firing.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.pressed = false;
        }
    }

    /// Feeds a pointer event to the button.
    ///
    /// Returns `true` when a press that started inside is released inside.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.visible {
            return false;
        }

        match *event {
            InputEvent::PointerDown { x, y } => {
                self.pressed = self.rect.contains(Point::new(x, y));
                false
            }
            InputEvent::PointerUp { x, y } => {
                let clicked = self.pressed && self.rect.contains(Point::new(x, y));
                self.pressed = false;
                clicked
            }
            _ => false,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, theme: &Theme) {
        if !self.visible {
            return;
        }

        let fill = if self.pressed {
            &theme.colors.button_pressed_bg
        } else {
            &theme.colors.button_bg
        };
        surface.fill_rect(self.rect, Theme::rgb(fill));

        let size = TextSize::Regular;
        let text_w = i32::try_from(surface.text_width(&self.caption, size)).unwrap_or(0);
        let rect_w = i32::try_from(self.rect.w).unwrap_or(0);
        let rect_h = i32::try_from(self.rect.h).unwrap_or(0);
        let glyph_h = i32::try_from(size.px()).unwrap_or(0);
        let at = Point::new(
            self.rect.x + (rect_w - text_w).max(0) / 2,
            self.rect.y + (rect_h - glyph_h).max(0) / 2,
        );
        surface.draw_text(at, &self.caption, Theme::rgb(&theme.colors.button_fg), size);
    }
}
