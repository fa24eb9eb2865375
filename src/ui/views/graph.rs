//! Temperature graph.
//!
//! Plots the recorded hot end and bed samples on a fixed 0 to 250 °C scale,
//! one pixel column per poll, oldest on the left. Target temperatures are
//! drawn as horizontal lines across the plot.

use crate::app::{Action, InputEvent};
use crate::domain::printer::TemperatureHistory;
use crate::ui::surface::{Color, Point, Rect, Surface, TextSize};
use crate::ui::theme::Theme;
use crate::ui::view::{to_i32, Layout, View, ViewContext};

/// Top of the temperature scale in °C.
pub const SCALE_MAX: f64 = 250.0;
/// Spacing of the horizontal grid lines in °C.
pub const DIVISION: f64 = 50.0;

const AREA_LEFT: i32 = 30;
const AREA_WIDTH: u32 = 285;
const AREA_MARGIN: u32 = 10;

#[derive(Debug, Clone)]
pub struct GraphView {
    area: Rect,
}

impl GraphView {
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        let content = layout.content();
        let width = AREA_WIDTH.min(layout.width.saturating_sub(35));
        let height = content.h.saturating_sub(AREA_MARGIN * 2);
        Self {
            area: Rect::new(AREA_LEFT, content.y + to_i32(AREA_MARGIN), width, height),
        }
    }

    /// Plot area in screen coordinates.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Screen row for `temp`, clamped to the plot area.
    #[must_use]
    pub fn y_for(&self, temp: f64) -> i32 {
        let scale = f64::from(self.area.h) / SCALE_MAX;
        #[allow(clippy::cast_possible_truncation)]
        let offset = (temp.clamp(0.0, SCALE_MAX) * scale).round() as i32;
        self.area.bottom() - offset
    }

    fn draw_trace(&self, surface: &mut dyn Surface, samples: &TemperatureHistory, color: Color) {
        let width = usize::try_from(self.area.w).unwrap_or(usize::MAX);
        let skip = samples.len().saturating_sub(width);
        for (i, temp) in samples.iter().skip(skip).enumerate() {
            let x = self.area.x + i32::try_from(i).unwrap_or(0);
            let y = self.y_for(temp);
            surface.draw_line(Point::new(x, y), Point::new(x + 1, y), color, 2);
        }
    }

    fn draw_target(&self, surface: &mut dyn Surface, target: f64, color: Color) {
        if target <= 0.0 {
            return;
        }
        let y = self.y_for(target);
        surface.draw_line(Point::new(self.area.x, y), Point::new(self.area.right(), y), color, 1);
    }
}

impl View for GraphView {
    fn handle_input(&mut self, _event: &InputEvent, _ctx: &ViewContext<'_>) -> Vec<Action> {
        Vec::new()
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, _first_frame: bool) {
        let colors = &ctx.theme.colors;
        let area = self.area;
        surface.fill_rect(area, Theme::rgb(&colors.graph_bg));

        let axis = Theme::rgb(&colors.graph_axis);
        let grid = Theme::rgb(&colors.graph_grid);
        let label = Theme::rgb(&colors.text_dim);

        let mut temp = 0.0;
        while temp <= SCALE_MAX {
            let y = self.y_for(temp);
            surface.draw_line(Point::new(area.x - 3, y), Point::new(area.x, y), axis, 2);
            if temp > 0.0 && temp < SCALE_MAX {
                surface.draw_line(Point::new(area.x + 2, y), Point::new(area.right() - 2, y), grid, 1);
            }
            surface.draw_text(Point::new(area.x - 26, y - 6), &format!("{temp:.0}"), label, TextSize::Small);
            temp += DIVISION;
        }

        surface.draw_line(Point::new(area.x, area.y), Point::new(area.x, area.bottom()), axis, 2);
        surface.draw_line(
            Point::new(area.x, area.bottom()),
            Point::new(area.right(), area.bottom()),
            axis,
            2,
        );

        self.draw_trace(surface, &ctx.printer.hotend_history, Theme::rgb(&colors.hotend_line));
        self.draw_trace(surface, &ctx.printer.bed_history, Theme::rgb(&colors.bed_line));
        self.draw_target(surface, ctx.printer.hotend_target, Theme::rgb(&colors.hotend_target));
        self.draw_target(surface, ctx.printer.bed_target, Theme::rgb(&colors.bed_target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_spans_plot_height() {
        let view = GraphView::new(Layout::default());
        let area = view.area();
        assert_eq!(area, Rect::new(30, 50, 285, 140));
        assert_eq!(view.y_for(0.0), area.bottom());
        assert_eq!(view.y_for(SCALE_MAX), area.y);
        assert_eq!(view.y_for(125.0), area.y + 70);
    }

    #[test]
    fn out_of_range_temperatures_are_clamped() {
        let view = GraphView::new(Layout::default());
        assert_eq!(view.y_for(400.0), view.area().y);
        assert_eq!(view.y_for(-20.0), view.area().bottom());
    }
}
