//! Dashboard: time remaining, file name, job buttons.

use crate::app::{Action, InputEvent};
use crate::domain::files::format_duration;
use crate::domain::{Command, PrinterState};
use crate::ui::helpers::{centered_x, truncate};
use crate::ui::surface::{Point, Rect, Surface, TextSize};
use crate::ui::theme::Theme;
use crate::ui::view::{to_i32, Layout, View, ViewContext};
use crate::ui::widgets::Button;

const BUTTON_SIZE: u32 = 60;

#[derive(Debug, Clone)]
pub struct DashboardView {
    start: Button,
    pause: Button,
    abort: Button,
}

impl DashboardView {
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        let spacing = to_i32(layout.width / 4);
        let half = to_i32(BUTTON_SIZE / 2);
        let top = layout.content().bottom() - to_i32(BUTTON_SIZE) - 10;
        let rect = |slot: i32| Rect::new(spacing * slot - half, top, BUTTON_SIZE, BUTTON_SIZE);

        Self {
            start: Button::new(rect(1), "Start"),
            pause: Button::new(rect(2), "Pause"),
            abort: Button::new(rect(3), "Abort"),
        }
    }

    /// Start only makes sense for an idle printer with a job; pause and abort
    /// only for a running or paused one.
    fn sync_buttons(&mut self, printer: &PrinterState) {
        self.start.set_visible(!printer.is_busy() && printer.job_loaded);
        self.pause.set_visible(printer.is_busy());
        self.abort.set_visible(printer.is_busy());
        self.pause.caption = if printer.is_paused { "Resume" } else { "Pause" }.to_string();
    }
}

impl View for DashboardView {
    fn handle_input(&mut self, event: &InputEvent, ctx: &ViewContext<'_>) -> Vec<Action> {
        self.sync_buttons(ctx.printer);

        let mut actions = Vec::new();
        if self.start.handle_event(event) {
            actions.push(Action::SendCommand(Command::StartJob));
        }
        if self.pause.handle_event(event) {
            actions.push(Action::SendCommand(Command::PauseJob));
        }
        if self.abort.handle_event(event) {
            actions.push(Action::SendCommand(Command::CancelJob));
        }
        actions
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, _first_frame: bool) {
        let content = ctx.layout.content();
        let text = Theme::rgb(&ctx.theme.colors.text);

        let remaining = format_duration(ctx.printer.print_time_left_seconds);
        let x = centered_x(surface, content, &remaining, TextSize::Huge);
        surface.draw_text(Point::new(x, content.y), &remaining, text, TextSize::Huge);

        let max_chars = usize::try_from(ctx.layout.width / TextSize::Small.advance().max(1)).unwrap_or(0);
        let file_name = truncate(&ctx.printer.file_name, max_chars);
        let x = centered_x(surface, content, &file_name, TextSize::Small);
        surface.draw_text(
            Point::new(x, content.y + to_i32(TextSize::Huge.px()) + 4),
            &file_name,
            Theme::rgb(&ctx.theme.colors.text_dim),
            TextSize::Small,
        );

        self.sync_buttons(ctx.printer);
        self.start.draw(surface, ctx.theme);
        self.pause.draw(surface, ctx.theme);
        self.abort.draw(surface, ctx.theme);
    }
}
