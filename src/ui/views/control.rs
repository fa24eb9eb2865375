//! Manual jog and home controls.
//!
//! ```text
//!        [ ^ ]          [Z+]   [Home X]
//!  [ < ]       [ > ]           [Home Y]
//!        [ v ]          [Z-]   [Home Z]
//! ```
//!
//! All buttons are hidden while a job is running or paused.

use crate::app::{Action, InputEvent};
use crate::domain::{Axis, Command};
use crate::ui::components::render_empty_state;
use crate::ui::surface::{Rect, Surface};
use crate::ui::view::{to_i32, Layout, View, ViewContext};
use crate::ui::widgets::Button;

const CELL: u32 = 50;
const BLOCK_WIDTH: u32 = 310;

/// What a control button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Move {
    Jog(Axis, f64),
    Home(Axis),
}

#[derive(Debug, Clone)]
pub struct ControlView {
    buttons: Vec<(Button, Move)>,
}

impl ControlView {
    #[must_use]
    pub fn new(layout: Layout, jog_amount: f64) -> Self {
        let content = layout.content();
        let left = to_i32(layout.width.saturating_sub(BLOCK_WIDTH) / 2);
        let top = content.y + to_i32(content.h.saturating_sub(CELL * 3) / 2);
        let cell = to_i32(CELL);
        let at = |col: i32, row: i32| Rect::new(left + col, top + row * cell, CELL, CELL);

        let buttons = vec![
            (Button::new(at(52, 0), "^"), Move::Jog(Axis::Y, -jog_amount)),
            (Button::new(at(2, 1), "<"), Move::Jog(Axis::X, -jog_amount)),
            (Button::new(at(102, 1), ">"), Move::Jog(Axis::X, jog_amount)),
            (Button::new(at(52, 2), "v"), Move::Jog(Axis::Y, jog_amount)),
            (Button::new(at(180, 0), "Z+"), Move::Jog(Axis::Z, jog_amount)),
            (Button::new(at(180, 2), "Z-"), Move::Jog(Axis::Z, -jog_amount)),
            (Button::new(at(260, 0), "Home X"), Move::Home(Axis::X)),
            (Button::new(at(260, 1), "Home Y"), Move::Home(Axis::Y)),
            (Button::new(at(260, 2), "Home Z"), Move::Home(Axis::Z)),
        ];
        Self { buttons }
    }

    fn set_enabled(&mut self, enabled: bool) {
        for (button, _) in &mut self.buttons {
            button.set_visible(enabled);
        }
    }
}

impl View for ControlView {
    fn handle_input(&mut self, event: &InputEvent, ctx: &ViewContext<'_>) -> Vec<Action> {
        self.set_enabled(!ctx.printer.is_busy());

        self.buttons
            .iter_mut()
            .filter_map(|(button, movement)| button.handle_event(event).then_some(*movement))
            .map(|movement| {
                let command = match movement {
                    Move::Jog(axis, distance) => Command::jog(axis, distance),
                    Move::Home(axis) => Command::home(axis),
                };
                Action::SendCommand(command)
            })
            .collect()
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, _first_frame: bool) {
        if ctx.printer.is_busy() {
            self.set_enabled(false);
            render_empty_state(
                surface,
                ctx.layout.content(),
                "Controls locked",
                Some("Manual moves are disabled while printing"),
                ctx.theme,
            );
            return;
        }

        self.set_enabled(true);
        for (button, _) in &self.buttons {
            button.draw(surface, ctx.theme);
        }
    }
}
