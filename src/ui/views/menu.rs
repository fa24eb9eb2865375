//! Menu overlay.
//!
//! Lists the registered views as 40 px rows. When there are more views than
//! rows, the last row becomes "More..." and cycles through pages.

use super::{row_at, rows_per_page, ROW_HEIGHT};
use crate::app::{Action, InputEvent, Key};
use crate::ui::helpers::hline;
use crate::ui::surface::{Point, Rect, Surface, TextSize};
use crate::ui::theme::Theme;
use crate::ui::view::{to_i32, Layout, View, ViewContext};

const MORE_LABEL: &str = "More...";
const TEXT_LEFT: i32 = 40;

/// One visible menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row<'a> {
    Item { name: &'a str, label: &'a str, index: usize },
    More,
}

#[derive(Debug, Clone)]
pub struct MenuView {
    /// `(name, label)` pairs in display order.
    items: Vec<(String, String)>,
    layout: Layout,
    page: usize,
    /// Row highlighted by the keyboard, as an index into `items`.
    highlighted: usize,
}

impl MenuView {
    #[must_use]
    pub const fn new(items: Vec<(String, String)>, layout: Layout) -> Self {
        Self {
            items,
            layout,
            page: 0,
            highlighted: 0,
        }
    }

    fn paged(&self) -> bool {
        self.items.len() > rows_per_page(self.layout)
    }

    fn per_page(&self) -> usize {
        let rows = rows_per_page(self.layout);
        if self.paged() {
            rows.saturating_sub(1).max(1)
        } else {
            rows
        }
    }

    fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.per_page()).max(1)
    }

    fn rows(&self) -> Vec<Row<'_>> {
        let per_page = self.per_page();
        let mut rows: Vec<Row<'_>> = self
            .items
            .iter()
            .enumerate()
            .skip(self.page * per_page)
            .take(per_page)
            .map(|(index, (name, label))| Row::Item { name, label, index })
            .collect();
        if self.paged() {
            rows.push(Row::More);
        }
        rows
    }

    fn next_page(&mut self) {
        self.page = (self.page + 1) % self.page_count();
        self.highlighted = self.page * self.per_page();
    }

    fn select_index(&self, index: usize) -> Vec<Action> {
        self.items
            .get(index)
            .map(|(name, _)| vec![Action::SelectView(name.clone())])
            .unwrap_or_default()
    }

    fn move_highlight(&mut self, forward: bool) {
        if self.items.is_empty() {
            return;
        }
        self.highlighted = if forward {
            (self.highlighted + 1).min(self.items.len() - 1)
        } else {
            self.highlighted.saturating_sub(1)
        };
        self.page = self.highlighted / self.per_page();
    }
}

impl View for MenuView {
    fn handle_input(&mut self, event: &InputEvent, _ctx: &ViewContext<'_>) -> Vec<Action> {
        match *event {
            InputEvent::PointerUp { y, .. } => {
                let Some(row) = row_at(self.layout, y) else {
                    return Vec::new();
                };
                let picked = self.rows().get(row).map(|row| match row {
                    Row::Item { name, .. } => Some((*name).to_string()),
                    Row::More => None,
                });
                match picked {
                    Some(Some(name)) => vec![Action::SelectView(name)],
                    Some(None) => {
                        self.next_page();
                        Vec::new()
                    }
                    None => Vec::new(),
                }
            }
            InputEvent::KeyDown(Key::Down) => {
                self.move_highlight(true);
                Vec::new()
            }
            InputEvent::KeyDown(Key::Up) => {
                self.move_highlight(false);
                Vec::new()
            }
            InputEvent::KeyDown(Key::Enter) => self.select_index(self.highlighted),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>, _first_frame: bool) {
        let colors = &ctx.theme.colors;
        let layout = ctx.layout;
        let content = layout.content();
        let divider = Theme::rgb(&colors.menu_divider);
        let text = Theme::rgb(&colors.text);
        let row_h = to_i32(ROW_HEIGHT);

        surface.fill_rect(
            Rect::new(0, 0, layout.width, layout.height.saturating_sub(layout.bar_height)),
            Theme::rgb(&colors.menu_bg),
        );
        hline(surface, content, content.y, divider);

        for (i, row) in self.rows().into_iter().enumerate() {
            let y = content.y + to_i32(u32::try_from(i).unwrap_or(0)) * row_h;
            let label = match row {
                Row::Item { label, index, .. } => {
                    if index == self.highlighted {
                        surface.fill_rect(Rect::new(0, y + 1, layout.width, ROW_HEIGHT - 1), divider);
                    }
                    label
                }
                Row::More => MORE_LABEL,
            };
            surface.draw_text(Point::new(TEXT_LEFT, y + 12), label, text, TextSize::Regular);
            hline(surface, content, y + row_h, divider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<(String, String)> {
        (0..n).map(|i| (format!("view{i}"), format!("View {i}"))).collect()
    }

    #[test]
    fn fits_on_one_page_without_more_row() {
        let menu = MenuView::new(items(4), Layout::default());
        assert!(!menu.paged());
        assert_eq!(menu.rows().len(), 4);
    }

    #[test]
    fn overflow_pages_with_more_row() {
        let mut menu = MenuView::new(items(5), Layout::default());
        assert!(menu.paged());
        assert_eq!(menu.page_count(), 2);

        let rows = menu.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], Row::More);

        menu.next_page();
        let rows = menu.rows();
        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0], Row::Item { name: "view3", .. }));

        menu.next_page();
        assert_eq!(menu.page, 0);
    }

    #[test]
    fn keyboard_highlight_follows_pages() {
        let mut menu = MenuView::new(items(5), Layout::default());
        for _ in 0..3 {
            menu.move_highlight(true);
        }
        assert_eq!(menu.highlighted, 3);
        assert_eq!(menu.page, 1);
        assert_eq!(menu.select_index(menu.highlighted), vec![Action::SelectView("view3".to_string())]);
    }
}
