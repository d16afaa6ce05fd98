//! # Card art rendering
//!
//! Turns an arbitrary raster or SVG image into a block of colored
//! half-block glyphs:
//!
//! ```text
//!   decode ──► downsample (Lanczos, 2W x 2H)
//!                 │
//!                 ▼
//!   average 2x2 sub-pixels ──► fg = top pair, bg = bottom pair
//!                 │
//!                 ▼
//!   ▀ glyph per cell (truecolor / 256 / 16)
//! ```

mod caps;
mod color;
mod downsample;
mod halfblock;
mod palette;

use std::path::Path;

pub use caps::{terminal_width, ColorMode, FALLBACK_WIDTH};
pub use color::{average, Color};
pub use downsample::{decode_image, downsample, sample, GridSize};
pub use halfblock::{render_cell, Cell, RenderGrid, GLYPH, RESET};

use crate::errors::Result;

/// Full pipeline: decode, downsample, average, and render glyphs
pub fn render_image(path: &Path, grid: GridSize, mode: ColorMode) -> Result<String> {
    let image = decode_image(path, grid)?;
    tracing::debug!(
        "Rendering {} ({}x{}) to {}x{} cells, {} colors",
        path.display(),
        image.width(),
        image.height(),
        grid.cols,
        grid.rows,
        mode
    );
    let buffer = downsample(&image, grid);
    Ok(RenderGrid::from_subpixels(&buffer, grid).render(mode))
}
