//! Image decoding and downsampling to the half-block sub-pixel grid

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use resvg::{tiny_skia, usvg};

use super::color::Color;
use crate::errors::{CartomancerError, Result};

/// Glyph grid dimensions used for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

/// Largest accepted cell count along either axis
pub const MAX_GRID_DIMENSION: u32 = 1024;

impl GridSize {
    /// 40x32 cells, i.e. an 80x64 sub-pixel buffer
    pub const DEFAULT: Self = Self { cols: 40, rows: 32 };

    pub fn new(cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(CartomancerError::InvalidRenderOptions(format!(
                "grid size must be non-zero, got {cols}x{rows}"
            )));
        }
        if cols > MAX_GRID_DIMENSION || rows > MAX_GRID_DIMENSION {
            return Err(CartomancerError::InvalidRenderOptions(format!(
                "grid size must be at most {MAX_GRID_DIMENSION}x{MAX_GRID_DIMENSION}, got {cols}x{rows}"
            )));
        }
        Ok(Self { cols, rows })
    }

    /// Sub-pixel resolution backing the grid (2x2 per cell)
    pub fn subpixel_resolution(&self) -> (u32, u32) {
        (self.cols * 2, self.rows * 2)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Oversampling factor for rasterizing vector sources before the Lanczos pass
const SVG_OVERSAMPLE: f32 = 4.0;

/// Decode a raster or SVG image from disk
pub fn decode_image(path: &Path, grid: GridSize) -> Result<DynamicImage> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        return rasterize_svg(path, grid);
    }

    image::ImageReader::open(path)
        .map_err(|e| CartomancerError::image_decode(path, e))?
        .with_guessed_format()
        .map_err(|e| CartomancerError::image_decode(path, e))?
        .decode()
        .map_err(|e| CartomancerError::image_decode(path, e))
}

fn rasterize_svg(path: &Path, grid: GridSize) -> Result<DynamicImage> {
    let data = fs::read(path).map_err(|e| CartomancerError::image_decode(path, e))?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .map_err(|e| CartomancerError::image_decode(path, e))?;

    let (target_w, target_h) = grid.subpixel_resolution();
    let width = (target_w as f32 * SVG_OVERSAMPLE) as u32;
    let height = (target_h as f32 * SVG_OVERSAMPLE) as u32;
    let size = tree.size();

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        CartomancerError::image_decode(path, format!("cannot allocate {width}x{height} pixmap"))
    })?;
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied pixels; the image crate expects straight alpha
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, rgba)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| CartomancerError::image_decode(path, "pixmap size mismatch"))
}

/// Resize `image` to exactly `2*cols x 2*rows` pixels with a Lanczos filter
pub fn downsample(image: &DynamicImage, grid: GridSize) -> RgbaImage {
    let (width, height) = grid.subpixel_resolution();
    image::imageops::resize(&image.to_rgba8(), width, height, FilterType::Lanczos3)
}

/// Read one sub-pixel, returning opaque black outside the buffer
#[inline]
pub fn sample(buffer: &RgbaImage, x: u32, y: u32) -> Color {
    buffer
        .get_pixel_checked(x, y)
        .map_or(Color::BLACK, |p| Color::from_rgba8(p[0], p[1], p[2], p[3]))
}
