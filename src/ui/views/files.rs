//! File list.
//!
//! The list is fetched once per activation, on the first frame, and kept
//! until the view is activated again. Tapping a row selects that file on the
//! server without starting it.

use super::{row_at, rows_per_page, ROW_HEIGHT};
use crate::app::{Action, InputEvent, Key};
use crate::domain::{Command, FileEntry};
use crate::ui::components::{render_empty_state, render_error_state};
use crate::ui::helpers::{hline, truncate};
use crate::ui::surface::{Point, Rect, Surface, TextSize};
use crate::ui::theme::Theme;
use crate::ui::view::{to_i32, Layout, View, ViewContext};

const TEXT_LEFT: i32 = 10;

#[derive(Debug, Clone)]
pub struct FilesView {
    layout: Layout,
    files: Vec<FileEntry>,
    error: Option<String>,
    selected: Option<usize>,
    scroll: usize,
}

impl FilesView {
    #[must_use]
    pub const fn new(layout: Layout) -> Self {
        Self {
            layout,
            files: Vec::new(),
            error: None,
            selected: None,
            scroll: 0,
        }
    }

    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replaces the list, resetting selection and scroll.
    pub fn set_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        self.error = None;
        self.selected = None;
        self.scroll = 0;
    }

    fn select(&mut self, index: usize) -> Vec<Action> {
        let Some(file) = self.files.get(index) else {
            return Vec::new();
        };
        let name = file.name.clone();
        tracing::debug!(file = %name, "file selected");
        self.selected = Some(index);
        self.keep_visible(index);
        vec![Action::SendCommand(Command::SelectFile {
            name,
            print: false,
        })]
    }

    fn keep_visible(&mut self, index: usize) {
        let rows = rows_per_page(self.layout);
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + rows {
            self.scroll = index + 1 - rows;
        }
    }

    fn step(&mut self, forward: bool) -> Vec<Action> {
        if self.files.is_empty() {
            return Vec::new();
        }
        let last = self.files.len() - 1;
        let next = match (self.selected, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.select(next)
    }

    fn refresh(&mut self, ctx: &ViewContext<'_>) {
        match ctx.client.list_files() {
            Ok(files) => self.set_files(files),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load file list");
                self.set_files(Vec::new());
                self.error = Some(e.to_string());
            }
        }
    }
}

impl View for FilesView {
    fn handle_input(&mut self, event: &InputEvent, _ctx: &ViewContext<'_>) -> Vec<Action> {
        match *event {
            InputEvent::PointerUp { y, .. } => {
                row_at(self.layout, y).map_or_else(Vec::new, |row| self.select(self.scroll + row))
            }
            InputEvent::KeyDown(Key::Down) => self.step(true),
            InputEvent::KeyDown(Key::Up) => self.step(false),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, first_frame: bool) {
        if first_frame {
            self.refresh(ctx);
        }

        let content = ctx.layout.content();
        let colors = &ctx.theme.colors;
        surface.fill_rect(content, Theme::rgb(&colors.list_bg));

        if let Some(error) = &self.error {
            render_error_state(surface, content, "Could not load files", Some(error), ctx.theme);
            return;
        }
        if self.files.is_empty() {
            render_empty_state(surface, content, "No files", None, ctx.theme);
            return;
        }

        let divider = Theme::rgb(&colors.divider);
        let text = Theme::rgb(&colors.text);
        let max_chars = usize::try_from(content.w / TextSize::Regular.advance().max(1)).unwrap_or(0);
        let row_h = to_i32(ROW_HEIGHT);

        hline(surface, content, content.y, divider);
        let visible = self.files.iter().enumerate().skip(self.scroll).take(rows_per_page(self.layout));
        for (row, (index, file)) in visible.enumerate() {
            let y = content.y + to_i32(u32::try_from(row).unwrap_or(0)) * row_h;
            if self.selected == Some(index) {
                surface.fill_rect(
                    Rect::new(content.x, y, content.w, ROW_HEIGHT),
                    Theme::rgb(&colors.selection_bg),
                );
            }
            surface.draw_text(
                Point::new(TEXT_LEFT, y + 12),
                &truncate(&file.display_line(), max_chars),
                text,
                TextSize::Regular,
            );
            hline(surface, content, y + row_h, divider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<FileEntry> {
        (0..n)
            .map(|i| FileEntry {
                name: format!("part{i}.gcode"),
                size: 1_000_000,
                date: 1_700_000_000,
            })
            .collect()
    }

    #[test]
    fn keyboard_selection_scrolls() {
        let mut view = FilesView::new(Layout::default());
        view.set_files(entries(6));

        for _ in 0..5 {
            view.step(true);
        }
        assert_eq!(view.selected(), Some(4));
        assert_eq!(view.scroll, 1);

        view.step(false);
        view.step(false);
        view.step(false);
        view.step(false);
        assert_eq!(view.selected(), Some(0));
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn selecting_emits_select_command() {
        let mut view = FilesView::new(Layout::default());
        view.set_files(entries(2));

        let actions = view.select(1);
        assert_eq!(
            actions,
            vec![Action::SendCommand(Command::SelectFile {
                name: "part1.gcode".to_string(),
                print: false,
            })]
        );
        assert!(view.select(7).is_empty());
        assert_eq!(view.selected(), Some(1));
    }
}
