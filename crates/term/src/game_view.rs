//! GameView: maps a `ViewState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{DropBlock, ViewState};
use crate::fb::{CellStyle, FrameBuffer};
use crate::theme::Palette;
use crate::types::{Coordinate, GameStatus, Matrix};

/// Size of the next-piece preview grid
pub const PREVIEW: Matrix = Matrix {
    width: 4,
    height: 4,
};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Board placement inside the viewport
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
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

    /// Render `state` into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, state: &ViewState, viewport: Viewport, fb: &mut FrameBuffer) {
        let palette = Palette::for_settings(&state.settings);
        fb.resize(viewport.width, viewport.height);
        fb.clear(palette.text_style().cell(' '));

        let matrix = state.matrix;
        let board_px_w = (matrix.width as u16).saturating_mul(self.cell_w);
        let board_px_h = (matrix.height as u16).saturating_mul(self.cell_h);
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        // Leave room for the side panel when centering.
        let start_x = viewport.width.saturating_sub(frame_w + 16) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let layout = Layout {
            x: start_x,
            y: start_y,
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', palette.board_style());
        draw_border(fb, layout, CellStyle::new(palette.border, palette.background));

        for y in 0..matrix.height {
            for x in 0..matrix.width {
                self.draw_empty_cell(fb, layout, state, palette, x, y);
            }
        }

        for block in &state.blocks {
            self.draw_cell(fb, layout, matrix, block.location, '█', palette.piece(block.color), palette);
        }

        if let Some(ghost) = state.visible_ghost() {
            for cell in ghost.location() {
                let style = CellStyle::new(palette.piece(ghost.color()), palette.board).dim();
                self.fill_board_cell(fb, layout, matrix, cell, '░', style);
            }
        }

        if let Some(drop) = &state.drop_block {
            for cell in drop.location() {
                self.draw_cell(fb, layout, matrix, cell, '█', palette.piece(drop.color()), palette);
            }
        }

        self.draw_side_panel(fb, state, palette, viewport, layout);

        if let Some(text) = overlay_text(state.status) {
            draw_overlay_text(fb, layout, text, palette);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &ViewState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        state: &ViewState,
        palette: &Palette,
        x: i32,
        y: i32,
    ) {
        let settings = &state.settings;
        let cell = Coordinate::new(x, y);
        if settings.show_background_art && (x + y) % 4 == 0 {
            let style = CellStyle::new(palette.art, palette.board);
            self.fill_board_cell(fb, layout, state.matrix, cell, '╱', style);
        }
        if settings.show_grid_outline {
            let style = CellStyle::new(palette.outline, palette.board).dim();
            let px = layout.x + 1 + (x as u16) * self.cell_w;
            let py = layout.y + 1 + (y as u16) * self.cell_h;
            fb.put_char(px, py, '·', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        matrix: Matrix,
        cell: Coordinate,
        ch: char,
        color: crate::fb::Rgb,
        palette: &Palette,
    ) {
        let style = CellStyle::new(color, palette.board).bold();
        self.fill_board_cell(fb, layout, matrix, cell, ch, style);
    }

    /// Cells above the visible top (or otherwise off the board) are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        matrix: Matrix,
        cell: Coordinate,
        ch: char,
        style: CellStyle,
    ) {
        if !matrix.contains(cell) {
            return;
        }
        let px = layout.x + 1 + (cell.x as u16) * self.cell_w;
        let py = layout.y + 1 + (cell.y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &ViewState,
        palette: &Palette,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = palette.label_style();
        let value = palette.text_style();

        let mut y = layout.y;
        for (name, n) in [
            ("SCORE", state.score),
            ("LEVEL", state.level()),
            ("LINES", state.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = state.next_block() {
            self.draw_preview(fb, panel_x, y, next, palette);
        }
        y = y.saturating_add(PREVIEW.height as u16 * self.cell_h + 1);

        let settings = &state.settings;
        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x + 6, y, settings.game_speed as u32, value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "NAUTS", label);
        if settings.use_nauts {
            let end = fb.put_u32(panel_x + 6, y, settings.naut_probability as u32 * 10, value);
            fb.put_char(end, y, '%', value);
        } else {
            fb.put_str(panel_x + 6, y, "off", value);
        }
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "SOUND", label);
        fb.put_str(panel_x + 6, y, if settings.mute { "off" } else { "on" }, value);
        y = y.saturating_add(1);
        if (settings.grid_width, settings.grid_height) != (state.matrix.width, state.matrix.height) {
            // Pending grid size, applied on the next reset.
            let dim = value.dim();
            let end = fb.put_u32(panel_x, y, settings.grid_width as u32, dim);
            let end = fb.put_str(end, y, "x", dim);
            fb.put_u32(end, y, settings.grid_height as u32, dim);
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &DropBlock, palette: &Palette) {
        let fitted = piece.fit_to(PREVIEW);
        let style = CellStyle::new(palette.piece(piece.color()), palette.background).bold();
        for cell in fitted.location() {
            if !PREVIEW.contains(cell) {
                continue;
            }
            let px = x + (cell.x as u16) * self.cell_w;
            let py = y + (cell.y as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

fn overlay_text(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Onboard => Some("PRESS ENTER"),
        GameStatus::Paused => Some("PAUSED"),
        GameStatus::GameOver => Some("GAME OVER"),
        GameStatus::Running | GameStatus::LineClearing | GameStatus::ScreenClearing => None,
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
    let Layout { x, y, w, h } = layout;
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

fn draw_overlay_text(fb: &mut FrameBuffer, layout: Layout, text: &str, palette: &Palette) {
    let mid_y = layout.y.saturating_add(layout.h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout.x.saturating_add(layout.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(palette.label, palette.background).bold();
    fb.put_str(x, mid_y, text, style);
}
