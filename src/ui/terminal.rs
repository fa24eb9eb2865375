//! Terminal display backend.
//!
//! [`TerminalSurface`] rasterises draw calls onto a character grid, one cell
//! per 8×16 pixels, and repaints the whole grid with 24-bit ANSI colours on
//! [`present`](Surface::present). Resolution is coarse by nature: text snaps
//! to cells, lines become box-drawing characters.

use super::surface::{Color, Point, Rect, Surface, TextSize};
use super::theme::Theme;
use std::io::{self, Write};

pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

const HIDE_CURSOR: &str = "\u{1b}[?25l";
const SHOW_CURSOR: &str = "\u{1b}[?25h";
const CLEAR_SCREEN: &str = "\u{1b}[2J";
const ENTER_ALTERNATE: &str = "\u{1b}[?1049h";
const LEAVE_ALTERNATE: &str = "\u{1b}[?1049l";

/// Escape sequence moving the cursor to a 1-indexed row and column.
#[must_use]
pub fn cursor_to(row: usize, col: usize) -> String {
    format!("\u{1b}[{row};{col}H")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

/// Character-grid surface writing ANSI frames to `W`.
pub struct TerminalSurface<W: Write> {
    out: W,
    width: u32,
    height: u32,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    alternate: bool,
}

impl<W: Write> TerminalSurface<W> {
    /// Creates a surface for a `width`×`height` pixel display.
    pub fn new(out: W, width: u32, height: u32) -> Self {
        let cols = usize::try_from(width / CELL_WIDTH).unwrap_or(1).max(1);
        let rows = usize::try_from(height / CELL_HEIGHT).unwrap_or(1).max(1);
        Self {
            out,
            width,
            height,
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
            alternate: false,
        }
    }

    /// Grid size in cells as `(cols, rows)`.
    #[must_use]
    pub const fn grid(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// The characters of one grid row.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Prepares the terminal: sets the window title to `caption`, switches to
    /// the alternate screen when `fullscreen`, hides the cursor unless
    /// `show_cursor`, and clears.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn begin(&mut self, caption: &str, fullscreen: bool, show_cursor: bool) -> io::Result<()> {
        write!(self.out, "\u{1b}]0;{caption}\u{7}")?;
        if fullscreen {
            write!(self.out, "{ENTER_ALTERNATE}")?;
            self.alternate = true;
        }
        if !show_cursor {
            write!(self.out, "{HIDE_CURSOR}")?;
        }
        write!(self.out, "{CLEAR_SCREEN}")?;
        self.out.flush()
    }

    /// Restores the cursor, default colours and the main screen.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn finish(&mut self) -> io::Result<()> {
        write!(
            self.out,
            "{}{}{SHOW_CURSOR}",
            Theme::reset(),
            cursor_to(self.rows + 1, 1)
        )?;
        if std::mem::take(&mut self.alternate) {
            write!(self.out, "{LEAVE_ALTERNATE}")?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        let col = usize::try_from(col).ok().filter(|c| *c < self.cols)?;
        let row = usize::try_from(row).ok().filter(|r| *r < self.rows)?;
        self.cells.get_mut(row * self.cols + col)
    }

    fn plot(&mut self, col: i64, row: i64, ch: char, fg: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }
}

fn col_of(x: i32) -> i64 {
    i64::from(x).div_euclid(i64::from(CELL_WIDTH))
}

fn row_of(y: i32) -> i64 {
    i64::from(y).div_euclid(i64::from(CELL_HEIGHT))
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let (c0, c1) = (col_of(rect.x), col_of(rect.right() - 1));
        let (r0, r1) = (row_of(rect.y), row_of(rect.bottom() - 1));
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        ch: ' ',
                        fg: cell.fg,
                        bg: color,
                    };
                }
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, _width: u32) {
        let (c0, r0) = (col_of(from.x), row_of(from.y));
        let (c1, r1) = (col_of(to.x), row_of(to.y));

        if r0 == r1 && c0 == c1 {
            self.plot(c0, r0, '•', color);
        } else if r0 == r1 {
            for col in c0.min(c1)..=c0.max(c1) {
                self.plot(col, r0, '─', color);
            }
        } else if c0 == c1 {
            for row in r0.min(r1)..=r0.max(r1) {
                self.plot(c0, row, '│', color);
            }
        } else {
            let steps = (c1 - c0).abs().max((r1 - r0).abs());
            for i in 0..=steps {
                let col = c0 + (c1 - c0) * i / steps;
                let row = r0 + (r1 - r0) * i / steps;
                self.plot(col, row, '•', color);
            }
        }
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Color, size: TextSize) {
        let half = i32::try_from(size.px() / 2).unwrap_or(0);
        let row = row_of(at.y.saturating_add(half));
        let start = col_of(at.x);
        for (i, ch) in text.chars().enumerate() {
            let offset = i64::try_from(i).unwrap_or(i64::MAX);
            self.plot(start.saturating_add(offset), row, ch, color);
        }
    }

    fn text_width(&self, text: &str, _size: TextSize) -> u32 {
        u32::try_from(text.chars().count())
            .unwrap_or(u32::MAX)
            .saturating_mul(CELL_WIDTH)
    }

    fn present(&mut self) -> io::Result<()> {
        let mut frame = String::with_capacity(self.cells.len() * 4);
        for row in 0..self.rows {
            frame.push_str(&cursor_to(row + 1, 1));
            let mut current: Option<(Color, Color)> = None;
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                if current != Some((cell.fg, cell.bg)) {
                    frame.push_str(&Theme::fg(cell.fg));
                    frame.push_str(&Theme::bg(cell.bg));
                    current = Some((cell.fg, cell.bg));
                }
                frame.push(cell.ch);
            }
        }
        frame.push_str(Theme::reset());

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> std::fmt::Debug for TerminalSurface<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_display_is_forty_by_fifteen() {
        let surface = TerminalSurface::new(Vec::new(), 320, 240);
        assert_eq!(surface.grid(), (40, 15));
    }

    #[test]
    fn text_snaps_to_cells() {
        let mut surface = TerminalSurface::new(Vec::new(), 320, 240);
        surface.draw_text(Point::new(16, 52), "Files", Color::WHITE, TextSize::Regular);
        assert_eq!(&surface.row_text(3)[2..7], "Files");
    }

    #[test]
    fn lines_use_box_drawing() {
        let mut surface = TerminalSurface::new(Vec::new(), 320, 240);
        surface.draw_line(Point::new(0, 40), Point::new(319, 40), Color::WHITE, 1);
        assert!(surface.row_text(2).chars().all(|c| c == '─'));

        surface.draw_line(Point::new(30, 50), Point::new(30, 190), Color::WHITE, 2);
        assert!(surface.row_text(5).starts_with("   │"));
    }

    #[test]
    fn fill_clears_text() {
        let mut surface = TerminalSurface::new(Vec::new(), 320, 240);
        surface.draw_text(Point::new(0, 0), "abc", Color::WHITE, TextSize::Small);
        surface.fill_rect(Rect::new(0, 0, 320, 16), Color::BLACK);
        assert!(surface.row_text(0).trim().is_empty());
    }

    #[test]
    fn begin_and_finish_pair_up() {
        let mut surface = TerminalSurface::new(Vec::new(), 320, 240);
        surface.begin("OctoPiPanel", true, false).unwrap();
        surface.finish().unwrap();

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.starts_with("\u{1b}]0;OctoPiPanel\u{7}"));
        assert!(out.contains(ENTER_ALTERNATE) && out.contains(HIDE_CURSOR));
        assert!(out.ends_with(LEAVE_ALTERNATE));
    }

    #[test]
    fn present_writes_every_row_with_colours() {
        let mut surface = TerminalSurface::new(Vec::new(), 32, 32);
        surface.fill_rect(Rect::new(0, 0, 32, 32), Color::rgb(1, 2, 3));
        surface.present().unwrap();

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.contains("\u{1b}[1;1H"));
        assert!(out.contains("\u{1b}[2;1H"));
        assert!(out.contains("\u{1b}[48;2;1;2;3m"));
        assert!(out.ends_with("\u{1b}[0m"));
    }
}
