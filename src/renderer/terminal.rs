//! Terminal presenter
//!
//! Rasterizes a `RenderFrame` onto a character grid scaled to fit the
//! terminal, then writes the grid with crossterm. Sprites become filled
//! boxes of a glyph; digits and the welcome banner become text.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use super::{Placement, Presenter, RenderFrame, Sprite};
use crate::assets::{AssetBundle, SpriteSize};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

const BANNER: [&str; 3] = ["GET READY", "SPACE / UP: flap", "ESC / Q: quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Character grid covering the whole game screen
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; usize::from(cols) * usize::from(rows)],
        }
    }

    /// Largest grid with the game's aspect ratio that fits in the terminal,
    /// keeping one row free for the status line
    pub fn fit(term_cols: u16, term_rows: u16) -> (u16, u16) {
        let cols_per_row = SCREEN_WIDTH / SCREEN_HEIGHT * CELL_ASPECT;
        let mut rows = term_rows.saturating_sub(1).max(1);
        let mut cols = (f32::from(rows) * cols_per_row).round() as u16;
        if cols > term_cols {
            cols = term_cols.max(1);
            rows = ((f32::from(cols) / cols_per_row).round() as u16).max(1);
        }
        (cols.max(1), rows)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[usize::from(row) * usize::from(self.cols) + usize::from(col)])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Draw every placement of a frame, back to front
    pub fn rasterize(&mut self, frame: &RenderFrame, assets: &AssetBundle) {
        self.clear();
        for placement in &frame.placements {
            self.draw(placement, assets);
        }
    }

    fn draw(&mut self, placement: &Placement, assets: &AssetBundle) {
        let Placement { sprite, pos } = *placement;
        match sprite {
            Sprite::Background => {}
            Sprite::PipeUpper | Sprite::PipeLower => {
                self.fill(pos.x, pos.y, assets.pipe, '█', Color::Green)
            }
            Sprite::Base => self.fill(pos.x, pos.y, assets.base, '▒', Color::DarkYellow),
            Sprite::Player => self.fill(pos.x, pos.y, assets.player, '@', Color::Yellow),
            Sprite::Message => {
                let (c0, r0, c1, _) = self.span(pos.x, pos.y, assets.message);
                let center = (c0 + c1) / 2;
                for (i, line) in BANNER.iter().enumerate() {
                    self.text(center, r0 + i as i32 * 2, line, Color::White);
                }
            }
            Sprite::Digit(d) => {
                let (c0, r0, _, _) = self.span(pos.x, pos.y, assets.digit(d));
                let ch = char::from(b'0' + d % 10);
                self.put(c0, r0, Cell {
                    ch,
                    color: Color::White,
                });
            }
        }
    }

    /// Cell span covered by a sprite, as half-open column and row ranges
    fn span(&self, x: f32, y: f32, size: SpriteSize) -> (i32, i32, i32, i32) {
        let sx = f32::from(self.cols) / SCREEN_WIDTH;
        let sy = f32::from(self.rows) / SCREEN_HEIGHT;
        let c0 = (x * sx).floor() as i32;
        let r0 = (y * sy).floor() as i32;
        let c1 = ((x + size.width) * sx).ceil() as i32;
        let r1 = ((y + size.height) * sy).ceil() as i32;
        (c0, r0, c1.max(c0 + 1), r1.max(r0 + 1))
    }

    fn fill(&mut self, x: f32, y: f32, size: SpriteSize, ch: char, color: Color) {
        let (c0, r0, c1, r1) = self.span(x, y, size);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, Cell { ch, color });
            }
        }
    }

    fn text(&mut self, center_col: i32, row: i32, text: &str, color: Color) {
        let start = center_col - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, Cell { ch, color });
        }
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let idx = row as usize * usize::from(self.cols) + col as usize;
        self.cells[idx] = cell;
    }

    /// One row as plain text (colors dropped)
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Queue the grid to a terminal, batching runs of one color
    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.rows {
            queue!(out, MoveTo(0, row))?;
            let mut run = String::new();
            let mut run_color = None;
            for col in 0..self.cols {
                let Some(cell) = self.cell(col, row) else {
                    continue;
                };
                if run_color != Some(cell.color) {
                    if let Some(color) = run_color {
                        queue!(out, SetForegroundColor(color), Print(&run))?;
                    }
                    run.clear();
                    run_color = Some(cell.color);
                }
                run.push(cell.ch);
            }
            if let Some(color) = run_color {
                queue!(out, SetForegroundColor(color), Print(&run))?;
            }
        }
        queue!(out, ResetColor)
    }
}

/// Draws frames in the terminal's alternate screen.
///
/// Creating one switches the terminal to raw mode; dropping it restores the
/// terminal even if the game loop bails out with an error.
pub struct TerminalPresenter {
    out: Stdout,
    assets: AssetBundle,
    canvas: Canvas,
    fps: Option<u32>,
}

impl TerminalPresenter {
    pub fn new(assets: AssetBundle) -> io::Result<Self> {
        enable_raw_mode()?;
        // No `Self` yet, so `Drop` cannot undo raw mode if setup fails
        Self::enter(assets).inspect_err(|_| restore_terminal(&mut io::stdout()))
    }

    fn enter(assets: AssetBundle) -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        let (term_cols, term_rows) = terminal::size()?;
        let (cols, rows) = Canvas::fit(term_cols, term_rows);
        log::debug!("terminal {term_cols}x{term_rows}, canvas {cols}x{rows}");
        Ok(Self {
            out,
            assets,
            canvas: Canvas::new(cols, rows),
            fps: None,
        })
    }

    fn refit(&mut self) -> io::Result<()> {
        let (term_cols, term_rows) = terminal::size()?;
        let (cols, rows) = Canvas::fit(term_cols, term_rows);
        if (cols, rows) != (self.canvas.cols(), self.canvas.rows()) {
            log::debug!("terminal resized to {term_cols}x{term_rows}");
            self.canvas = Canvas::new(cols, rows);
            queue!(self.out, Clear(ClearType::All))?;
        }
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.refit()?;
        self.canvas.rasterize(frame, &self.assets);
        self.canvas.write_to(&mut self.out)?;

        let mut status = format!("score {}  tick {}  {:?}", frame.score, frame.tick, frame.phase);
        if let Some(fps) = self.fps {
            status.push_str(&format!("  {fps} fps"));
        }
        queue!(
            self.out,
            MoveTo(0, self.canvas.rows()),
            Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        self.out.flush()
    }

    fn set_fps(&mut self, fps: u32) {
        self.fps = Some(fps);
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        restore_terminal(&mut self.out);
    }
}

/// Leave the alternate screen and raw mode. Best effort: errors are ignored.
fn restore_terminal<W: Write>(out: &mut W) {
    let _ = execute!(out, ResetColor, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput, tick};

    #[test]
    fn test_fit_keeps_aspect() {
        // 40 rows of game + status line; 289/511 * 2 * 40 = 45.2
        assert_eq!(Canvas::fit(200, 41), (45, 40));
        // Narrow terminal limits columns instead
        let (cols, rows) = Canvas::fit(20, 100);
        assert_eq!(cols, 20);
        assert!(rows < 99);
    }

    #[test]
    fn test_player_lands_in_expected_cell() {
        let assets = AssetBundle::default();
        let mut state = GameState::new(4, &assets);
        tick(&mut state, &TickInput { flap: true });
        let frame = RenderFrame::from_state(&state, &assets);

        let mut canvas = Canvas::new(45, 40);
        canvas.rasterize(&frame, &assets);

        // Player at (57, 255): column 57 * 45 / 289 = 8.9, row 255 * 40 / 511 = 19.96
        assert_eq!(canvas.cell(8, 19).map(|c| c.ch), Some('@'));
        // Base fills the bottom row
        assert!(canvas.row_text(39).chars().all(|c| c == '▒'));
        // Score digit near the top center
        assert!(canvas.row_text(4).contains('0'));
    }

    #[test]
    fn test_welcome_banner() {
        let assets = AssetBundle::default();
        let state = GameState::new(4, &assets);
        let frame = RenderFrame::from_state(&state, &assets);

        let mut canvas = Canvas::new(45, 40);
        canvas.rasterize(&frame, &assets);
        let text: String = (0..canvas.rows()).map(|r| canvas.row_text(r)).collect();
        assert!(text.contains("GET READY"));
    }

    #[test]
    fn test_restore_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_terminal(&mut out);
        let written = String::from_utf8_lossy(&out);
        // Show cursor, then leave the alternate screen
        assert!(written.contains("\x1b[?25h"));
        assert!(written.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_offscreen_sprites_are_clipped() {
        let assets = AssetBundle::default();
        let frame = RenderFrame {
            phase: crate::sim::GamePhase::Playing,
            tick: 0,
            score: 0,
            placements: vec![Placement::new(Sprite::PipeUpper, -40.0, -300.0)],
        };
        let mut canvas = Canvas::new(45, 40);
        canvas.rasterize(&frame, &assets);
        // Visible part: x in [-40, 12), y in [-300, 20)
        assert_eq!(canvas.cell(0, 0).map(|c| c.ch), Some('█'));
        assert_eq!(canvas.cell(10, 10).map(|c| c.ch), Some(' '));
    }
}
