//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, SlideSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

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

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 keeps four-digit values centered with room to spare.
        Self {
            tile_w: 7,
            tile_h: 3,
        }
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
        }
    }

    /// Render the settled board.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_frame_into(snap, 1.0, viewport, fb);
    }

    /// Render one frame of the slide animation for the latest tilt.
    ///
    /// At `progress` 0 every replaced tile sits at its old cell; at 1 the board
    /// is settled. Tiles slide toward their successor in a straight line.
    pub fn render_frame_into(
        &self,
        snap: &GameSnapshot,
        progress: f32,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let size = snap.size as u16;
        let board_w = size * self.tile_w;
        let board_h = size * self.tile_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        // Two header rows (score) and two footer rows (status, help).
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h + 4) / 2 + 2;

        self.draw_header(fb, snap, start_x, start_y, frame_w);

        let frame_style = CellStyle::new(BOARD_BG, BOARD_BG);
        fb.fill_rect(start_x, start_y, frame_w, frame_h, ' ', frame_style);
        for y in 0..size {
            for x in 0..size {
                self.draw_empty_cell(fb, start_x, start_y, size, x, y);
            }
        }

        let animating = progress < 1.0 && !snap.slides.is_empty();
        if animating {
            // Cells that receive a sliding tile stay hidden until it arrives.
            let incoming =
                |x: usize, y: usize| snap.slides.iter().any(|s| (s.to_x, s.to_y) == (x, y));
            for tile in snap.cells.iter().flatten() {
                if !incoming(tile.x, tile.y) {
                    self.draw_tile(fb, start_x, start_y, size, tile);
                }
            }
            for slide in &snap.slides {
                self.draw_slide(fb, start_x, start_y, size, slide, progress);
            }
        } else {
            for tile in snap.cells.iter().flatten() {
                self.draw_tile(fb, start_x, start_y, size, tile);
            }
        }

        self.draw_footer(fb, snap, start_x, start_y + frame_h, frame_w);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, board_y: u16, w: u16) {
        let Some(y) = board_y.checked_sub(2) else {
            return;
        };
        let label = CellStyle::default().bold();
        fb.put_str(x, y, "SCORE", label);
        let score = snap.score.to_string();
        let score_x = (x + w).saturating_sub(score.len() as u16);
        fb.put_str(score_x, y, &score, CellStyle::default());
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16, w: u16) {
        let status = if snap.won {
            "YOU WIN"
        } else if snap.game_over {
            "GAME OVER"
        } else {
            ""
        };
        fb.put_str_centered(x, y, w, status, CellStyle::default().bold());

        let help = CellStyle::new(Rgb::new(140, 140, 140), Rgb::new(0, 0, 0));
        fb.put_str_centered(x, y.saturating_add(1), w, "arrows/hjkl/wasd  r restart  q quit", help);
    }

    fn draw_empty_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        size: u16,
        x: u16,
        y: u16,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, size, x as f32, y as f32);
        let style = CellStyle::new(EMPTY_BG, EMPTY_BG);
        fb.fill_rect(px + 1, py, self.tile_w.saturating_sub(2), self.tile_h, ' ', style);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        size: u16,
        tile: &TileSnapshot,
    ) {
        let (x, y) = (tile.x as f32, tile.y as f32);
        self.draw_tile_at(fb, start_x, start_y, size, x, y, tile.value);
    }

    fn draw_slide(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        size: u16,
        slide: &SlideSnapshot,
        progress: f32,
    ) {
        let (fx, fy) = slide.position_at(progress);
        self.draw_tile_at(fb, start_x, start_y, size, fx, fy, slide.value);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile_at(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        size: u16,
        x: f32,
        y: f32,
        value: u32,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, size, x, y);
        let (bg, fg) = tile_colors(value);
        let style = CellStyle::new(fg, bg).bold();
        let inner_w = self.tile_w.saturating_sub(2);
        fb.fill_rect(px + 1, py, inner_w, self.tile_h, ' ', style);
        fb.put_str_centered(px + 1, py + self.tile_h / 2, inner_w, &value.to_string(), style);
    }

    /// Top-left terminal cell of board position (x, y); y = 0 is the bottom row.
    fn cell_origin(&self, start_x: u16, start_y: u16, size: u16, x: f32, y: f32) -> (u16, u16) {
        let row = (size as f32 - 1.0 - y).max(0.0);
        let px = start_x + 1 + (x.max(0.0) * self.tile_w as f32).round() as u16;
        let py = start_y + 1 + (row * self.tile_h as f32).round() as u16;
        (px, py)
    }
}

/// Background and text color for a tile value.
fn tile_colors(value: u32) -> (Rgb, Rgb) {
    match value {
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::Direction;

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| fb.row_text(y).find(needle).map(|x| (x as u16, y)))
    }

    #[test]
    fn renders_values_and_score() {
        let mut game = GameState::from_values(&[vec![2, 2], vec![0, 0]], 0).unwrap();
        game.tilt(Direction::Left).unwrap();

        let fb = GameView::default().render(&game.snapshot(), Viewport::new(40, 16));
        assert!(find(&fb, "SCORE").is_some());
        assert!(find(&fb, " 4 ").is_some());
        let score_row = find(&fb, "SCORE").unwrap().1;
        assert!(fb.row_text(score_row).trim_end().ends_with('4'));
    }

    #[test]
    fn bottom_row_is_drawn_below_top_row() {
        // 8 on the top row, 2 on the bottom row.
        let game = GameState::from_values(&[vec![2, 0], vec![8, 0]], 0).unwrap();
        let fb = GameView::default().render(&game.snapshot(), Viewport::new(40, 16));
        let (_, y8) = find(&fb, "8").unwrap();
        let (_, y2) = find(&fb, " 2 ").unwrap();
        assert!(y8 < y2);
    }

    #[test]
    fn animation_starts_at_old_position() {
        let rows = [vec![16, 0, 0], vec![0; 3], vec![0; 3]];
        let mut game = GameState::from_values(&rows, 0).unwrap();
        game.tilt(Direction::Right).unwrap();
        let snap = game.snapshot();
        let view = GameView::default();
        let viewport = Viewport::new(40, 16);

        let mut start = FrameBuffer::new(1, 1);
        view.render_frame_into(&snap, 0.0, viewport, &mut start);
        let mut end = FrameBuffer::new(1, 1);
        view.render_frame_into(&snap, 1.0, viewport, &mut end);

        let (x0, y0) = find(&start, "16").unwrap();
        let (x1, y1) = find(&end, "16").unwrap();
        assert_eq!(y0, y1);
        assert_eq!(x1 - x0, 2 * 7);
    }

    #[test]
    fn game_over_banner() {
        let game = GameState::from_values(&[vec![2, 4], vec![4, 2]], 0).unwrap();
        let fb = GameView::default().render(&game.snapshot(), Viewport::new(40, 16));
        assert!(find(&fb, "GAME OVER").is_some());
    }
}
