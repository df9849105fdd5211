//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Category, GRID_SIZE};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

// Four stats, a gap, the legend header and one row per category.
const PANEL_ROWS: u16 = 10;

const KEY_HELP: &str = "arrows:move space:select esc:cancel r:restart q:quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the Tone Puzzle grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for cursor brackets around the glyph.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered grid, in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (GRID_SIZE as u16) * self.cell_w + 2,
            (GRID_SIZE as u16) * self.cell_h + 2,
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                match snap.category_at(row, col) {
                    Some(category) => self.draw_tile(fb, snap, start_x, start_y, row, col, category),
                    None => self.draw_empty_cell(fb, start_x, start_y, row, col),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);
        let help_y = start_y.saturating_add(frame_h.max(PANEL_ROWS)).saturating_add(1);
        self.draw_key_help(fb, viewport, help_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Top-left terminal position of a grid cell.
    fn cell_origin(&self, start_x: u16, start_y: u16, row: usize, col: usize) -> (u16, u16) {
        (
            start_x + 1 + (col as u16) * self.cell_w,
            start_y + 1 + (row as u16) * self.cell_h,
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: usize, col: usize) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let (px, py) = self.cell_origin(start_x, start_y, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        row: usize,
        col: usize,
        category: Category,
    ) {
        let pos = (row as u8, col as u8);
        let mut style = CellStyle::new(category.color().into(), BOARD_BG);
        if snap.is_fresh(row, col) {
            style = style.bold();
        }
        if snap.selected == Some(pos) {
            style = style.inverted().bold();
        }

        let (px, py) = self.cell_origin(start_x, start_y, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, category.glyph(), style);

        if snap.cursor == pos {
            let mid_y = py + self.cell_h / 2;
            if self.cell_w >= 3 {
                let bracket = CellStyle {
                    fg: Rgb::new(255, 255, 255),
                    ..style
                }
                .bold();
                fb.put_char(px, mid_y, '[', bracket);
                fb.put_char(px + self.cell_w - 1, mid_y, ']', bracket);
            } else {
                fb.put_char(px + self.cell_w / 2, mid_y, category.glyph(), style.inverted().bold());
            }
        }
    }

    fn draw_key_help(&self, fb: &mut FrameBuffer, viewport: Viewport, y: u16) {
        if y >= viewport.height {
            return;
        }
        let help = CellStyle::new(Rgb::new(150, 150, 160), PANEL_BG).dim();
        let w = KEY_HELP.chars().count() as u16;
        let x = viewport.width.saturating_sub(w) / 2;
        fb.put_str(x, y, KEY_HELP, help);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x + 7, y, snap.score, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x + 7, y, snap.moves, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LAST", label);
        if snap.last_gained > 0 {
            fb.put_char(panel_x + 7, y, '+', value);
            fb.put_u32(panel_x + 8, y, snap.last_gained, value);
        } else {
            fb.put_char(panel_x + 7, y, '-', value);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "GAME", label);
        fb.put_u32(panel_x + 7, y, snap.episode_id + 1, value);
        y = y.saturating_add(2);

        // Legend
        if y >= viewport.height {
            return;
        }
        fb.put_str(panel_x, y, "TONES", label);
        y = y.saturating_add(1);
        for category in Category::ALL {
            if y >= viewport.height {
                return;
            }
            let swatch = CellStyle::new(category.color().into(), PANEL_BG).bold();
            fb.put_char(panel_x, y, category.glyph(), swatch);
            fb.put_str(panel_x + 2, y, category.as_str(), value);
            y = y.saturating_add(1);
        }
    }
}
