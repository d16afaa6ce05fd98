//! `HalfBlock` renderer - colored ▀ glyphs, two vertical pixels per cell
//!
//! Each terminal cell represents a 2x2 block of sub-pixels:
//! - Top pair averaged = foreground color
//! - Bottom pair averaged = background color
//!
//! The upper half block ▀ is always used so cached art is stable
//! across color modes and terminals.

use std::fmt::Write;

use image::RgbaImage;

use super::caps::ColorMode;
use super::color::{average, Color};
use super::downsample::{sample, GridSize};
use super::palette;

/// Upper half block
pub const GLYPH: char = '▀';

/// Escape sequence that clears all styling
pub const RESET: &str = "\x1b[0m";

/// Foreground/background pair for one glyph cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub fg: Color,
    pub bg: Color,
}

/// Fixed-size grid of glyph cells produced by one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGrid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl RenderGrid {
    /// Build the grid from a `2*cols x 2*rows` sub-pixel buffer
    pub fn from_subpixels(buffer: &RgbaImage, size: GridSize) -> Self {
        let mut cells = Vec::with_capacity((size.cols * size.rows) as usize);

        for row in 0..size.rows {
            let y = row * 2;
            for col in 0..size.cols {
                let x = col * 2;
                let top = [sample(buffer, x, y), sample(buffer, x + 1, y)];
                let bottom = [sample(buffer, x, y + 1), sample(buffer, x + 1, y + 1)];
                cells.push(Cell {
                    fg: average(&top),
                    bg: average(&bottom),
                });
            }
        }

        Self { size, cells }
    }

    /// Cell at (col, row), if inside the grid
    pub fn cell(&self, col: u32, row: u32) -> Option<Cell> {
        if col >= self.size.cols || row >= self.size.rows {
            return None;
        }
        self.cells.get((row * self.size.cols + col) as usize).copied()
    }

    /// Render every row as escape-coded glyphs, one `\n`-terminated line per row
    pub fn render(&self, mode: ColorMode) -> String {
        // ~40 bytes per truecolor cell
        let mut out = String::with_capacity(self.cells.len() * 40 + self.size.rows as usize);
        for row in self.cells.chunks(self.size.cols as usize) {
            for cell in row {
                push_cell(&mut out, cell.fg, cell.bg, mode);
            }
            out.push('\n');
        }
        out
    }
}

/// Render a single glyph cell, reset included
pub fn render_cell(fg: Color, bg: Color, mode: ColorMode) -> String {
    let mut out = String::with_capacity(48);
    push_cell(&mut out, fg, bg, mode);
    out
}

fn push_cell(out: &mut String, fg: Color, bg: Color, mode: ColorMode) {
    // Writing to a String cannot fail
    let _ = match mode {
        ColorMode::TrueColor => write!(
            out,
            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
            fg.r, fg.g, fg.b, bg.r, bg.g, bg.b
        ),
        ColorMode::Palette256 => write!(
            out,
            "\x1b[38;5;{}m\x1b[48;5;{}m",
            palette::nearest_256(fg),
            palette::nearest_256(bg)
        ),
        ColorMode::Palette16 => write!(
            out,
            "\x1b[{}m\x1b[{}m",
            palette::fg_code_16(palette::nearest_16(fg)),
            palette::bg_code_16(palette::nearest_16(bg))
        ),
    };
    out.push(GLYPH);
    out.push_str(RESET);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_truecolor_cell() {
        let s = render_cell(Color::rgb(1, 2, 3), Color::rgb(4, 5, 6), ColorMode::TrueColor);
        assert_eq!(s, "\x1b[38;2;1;2;3m\x1b[48;2;4;5;6m▀\x1b[0m");
    }

    #[test]
    fn test_every_mode_resets_and_uses_one_glyph() {
        for mode in [ColorMode::TrueColor, ColorMode::Palette256, ColorMode::Palette16] {
            let s = render_cell(Color::rgb(13, 200, 99), Color::rgb(250, 1, 128), mode);
            assert!(s.ends_with(RESET), "{mode}: {s:?}");
            assert_eq!(s.matches(GLYPH).count(), 1);
        }
    }

    #[test]
    fn test_grid_uses_top_and_bottom_pairs() {
        // top row red, bottom row blue
        let mut buf = RgbaImage::new(2, 2);
        buf.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        buf.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        buf.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        buf.put_pixel(1, 1, Rgba([0, 0, 255, 255]));

        let grid = RenderGrid::from_subpixels(&buf, GridSize::new(1, 1).unwrap());
        let cell = grid.cell(0, 0).unwrap();
        assert_eq!(cell.fg, Color::RED);
        assert_eq!(cell.bg, Color::BLUE);
        assert!(grid.cell(1, 0).is_none());
    }

    #[test]
    fn test_render_row_layout() {
        let buf = RgbaImage::from_pixel(6, 4, Rgba([10, 10, 10, 255]));
        let grid = RenderGrid::from_subpixels(&buf, GridSize::new(3, 2).unwrap());
        let text = grid.render(ColorMode::TrueColor);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.matches(GLYPH).count() == 3));
        assert!(text.ends_with('\n'));
    }
}
