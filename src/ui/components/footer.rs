//! Status bar renderer.
//!
//! Two lines on the left (hot end and bed, each as `actual (target)`) and the
//! job completion on the right.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │ Hot end: 201.3°C (210.0°C)                │
//! │ Bed: 59.8°C (60.0°C)                42.5% │
//! └───────────────────────────────────────────┘
//! ```

use crate::domain::PrinterState;
use crate::ui::helpers::hline;
use crate::ui::surface::{Point, Surface, TextSize};
use crate::ui::theme::Theme;
use crate::ui::view::{to_i32, Layout};

const TEXT_LEFT: i32 = 40;
const RIGHT_MARGIN: i32 = 10;

/// The three status strings: hot end, bed, completion.
#[must_use]
pub fn status_lines(printer: &PrinterState) -> [String; 3] {
    [
        format!(
            "Hot end: {:.1}\u{b0}C ({:.1}\u{b0}C)",
            printer.hotend_temp, printer.hotend_target
        ),
        format!("Bed: {:.1}\u{b0}C ({:.1}\u{b0}C)", printer.bed_temp, printer.bed_target),
        format!("{:.1}%", printer.completion_percent),
    ]
}

pub fn render_status_bar(surface: &mut dyn Surface, layout: Layout, printer: &PrinterState, theme: &Theme) {
    let bar = layout.status_bar();
    let text = Theme::rgb(&theme.colors.text);
    let [hotend, bed, completion] = status_lines(printer);

    hline(surface, bar, bar.y, Theme::rgb(&theme.colors.divider));
    surface.draw_text(Point::new(TEXT_LEFT, bar.y + 5), &hotend, text, TextSize::Small);
    surface.draw_text(Point::new(TEXT_LEFT, bar.y + 20), &bed, text, TextSize::Small);

    let width = to_i32(surface.text_width(&completion, TextSize::Regular));
    surface.draw_text(
        Point::new(to_i32(layout.width) - RIGHT_MARGIN - width, bar.y + 12),
        &completion,
        text,
        TextSize::Regular,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionState, StatusSnapshot};

    #[test]
    fn lines_show_actual_and_target() {
        let mut printer = PrinterState::default();
        printer.apply(StatusSnapshot {
            hotend_temp: 201.34,
            hotend_target: 210.0,
            bed_temp: 59.8,
            bed_target: 60.0,
            completion_percent: 42.46,
            file_name: "cube.gcode".to_string(),
            connection: ConnectionState::Printing,
            ..StatusSnapshot::default()
        });

        let [hotend, bed, completion] = status_lines(&printer);
        assert_eq!(hotend, "Hot end: 201.3\u{b0}C (210.0\u{b0}C)");
        assert_eq!(bed, "Bed: 59.8\u{b0}C (60.0\u{b0}C)");
        assert_eq!(completion, "42.5%");
    }
}
