//! Heater, fan and system controls.

use crate::app::{Action, InputEvent};
use crate::domain::{Command, PrinterState};
use crate::ui::surface::{Rect, Surface};
use crate::ui::view::{to_i32, Layout, View, ViewContext};
use crate::ui::widgets::Button;

const BUTTON_HEIGHT: u32 = 30;
const WIDE: u32 = 150;
const NARROW: u32 = 100;
const GAP: i32 = 5;

#[derive(Debug, Clone)]
pub struct SettingsView {
    heat_hotend: Button,
    heat_bed: Button,
    fan: Button,
    reboot: Button,
    shutdown: Button,
    /// Last fan state requested from here. Not confirmed by the server.
    fan_on: bool,
    hotend_preheat: f64,
    bed_preheat: f64,
}

impl SettingsView {
    #[must_use]
    pub fn new(layout: Layout, hotend_preheat: f64, bed_preheat: f64) -> Self {
        let top = layout.content().y + GAP;
        let step = to_i32(BUTTON_HEIGHT) + GAP;
        let right = to_i32(layout.width) - to_i32(NARROW) - GAP;
        let left = |row: i32| Rect::new(GAP, top + row * step, WIDE, BUTTON_HEIGHT);
        let side = |row: i32| Rect::new(right, top + row * step, NARROW, BUTTON_HEIGHT);

        Self {
            heat_hotend: Button::new(left(0), "Heat hot end"),
            heat_bed: Button::new(left(1), "Heat bed"),
            fan: Button::new(left(2), "Fan on"),
            reboot: Button::new(side(0), "Reboot"),
            shutdown: Button::new(side(1), "Shutdown"),
            fan_on: false,
            hotend_preheat,
            bed_preheat,
        }
    }

    #[must_use]
    pub const fn fan_on(&self) -> bool {
        self.fan_on
    }

    fn sync_buttons(&mut self, printer: &PrinterState) {
        self.heat_hotend.set_visible(!printer.is_busy());
        self.heat_bed.set_visible(!printer.is_busy());

        self.heat_hotend.caption = if printer.hot_end_heating() {
            "Turn off hot end"
        } else {
            "Heat hot end"
        }
        .to_string();
        self.heat_bed.caption = if printer.bed_heating() { "Turn off bed" } else { "Heat bed" }.to_string();
        self.fan.caption = if self.fan_on { "Fan off" } else { "Fan on" }.to_string();
    }
}

impl View for SettingsView {
    fn handle_input(&mut self, event: &InputEvent, ctx: &ViewContext<'_>) -> Vec<Action> {
        let printer = ctx.printer;
        self.sync_buttons(printer);

        let mut actions = Vec::new();
        if self.heat_hotend.handle_event(event) {
            let target = if printer.hot_end_heating() { 0.0 } else { self.hotend_preheat };
            actions.push(Action::SendCommand(Command::tool_target(target)));
        }
        if self.heat_bed.handle_event(event) {
            let target = if printer.bed_heating() { 0.0 } else { self.bed_preheat };
            actions.push(Action::SendCommand(Command::SetBedTarget { target }));
        }
        if self.fan.handle_event(event) {
            self.fan_on = !self.fan_on;
            actions.push(Action::SendCommand(Command::Fan { on: self.fan_on }));
        }
        if self.reboot.handle_event(event) {
            actions.push(Action::Reboot);
        }
        if self.shutdown.handle_event(event) {
            actions.push(Action::Shutdown);
        }
        actions
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, _first_frame: bool) {
        self.sync_buttons(ctx.printer);
        for button in [&self.heat_hotend, &self.heat_bed, &self.fan, &self.reboot, &self.shutdown] {
            button.draw(surface, ctx.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionState, StatusSnapshot};

    fn printer(connection: ConnectionState, hotend_target: f64) -> PrinterState {
        let mut state = PrinterState::default();
        state.apply(StatusSnapshot {
            hotend_target,
            connection,
            ..StatusSnapshot::default()
        });
        state
    }

    #[test]
    fn heat_captions_follow_targets() {
        let mut view = SettingsView::new(Layout::default(), 190.0, 50.0);
        view.sync_buttons(&printer(ConnectionState::Operational, 0.0));
        assert_eq!(view.heat_hotend.caption, "Heat hot end");

        view.sync_buttons(&printer(ConnectionState::Operational, 200.0));
        assert_eq!(view.heat_hotend.caption, "Turn off hot end");
        assert_eq!(view.heat_bed.caption, "Heat bed");
    }

    #[test]
    fn heaters_hidden_while_printing() {
        let mut view = SettingsView::new(Layout::default(), 190.0, 50.0);
        view.sync_buttons(&printer(ConnectionState::Printing, 200.0));
        assert!(!view.heat_hotend.visible);
        assert!(!view.heat_bed.visible);
        assert!(view.reboot.visible);
    }

    #[test]
    fn buttons_do_not_overlap() {
        let view = SettingsView::new(Layout::default(), 190.0, 50.0);
        assert!(view.fan.rect.right() < view.reboot.rect.x);
        assert_eq!(view.reboot.rect, Rect::new(215, 45, 100, 30));
    }
}
