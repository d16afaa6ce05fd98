//! Color types and the block color averager

use std::sync::OnceLock;

/// Opaque 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from straight-alpha RGBA, premultiplying by alpha.
    ///
    /// A fully transparent pixel becomes black.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let premul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        Self::rgb(premul(r), premul(g), premul(b))
    }

    /// Squared Euclidean distance in sRGB space (for palette matching)
    #[inline]
    pub fn distance_sq(&self, other: &Color) -> u32 {
        let d = |a: u8, b: u8| {
            let v = i32::from(a) - i32::from(b);
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// Linear-light values are stored as 16-bit fixed point.
const LINEAR_SCALE: f32 = 65535.0;

fn srgb_to_linear_table() -> &'static [u32; 256] {
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            let c = i as f32 / 255.0;
            let linear = if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            };
            *slot = (linear * LINEAR_SCALE).round() as u32;
        }
        table
    })
}

fn linear_to_srgb(linear: u32) -> u8 {
    let l = (linear as f32 / LINEAR_SCALE).clamp(0.0, 1.0);
    let c = if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Average a block of samples into one representative color.
///
/// The mean is taken in linear RGB. Channels are linearised into 16-bit
/// fixed point and summed as integers, so the result does not depend on the
/// order of `samples`. An empty block averages to black.
pub fn average(samples: &[Color]) -> Color {
    if samples.is_empty() {
        return Color::BLACK;
    }

    let table = srgb_to_linear_table();
    let n = samples.len() as u32;
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for c in samples {
        r += table[usize::from(c.r)];
        g += table[usize::from(c.g)];
        b += table[usize::from(c.b)];
    }

    // round-half-up integer division
    let mean = |sum: u32| (sum + n / 2) / n;
    Color::rgb(
        linear_to_srgb(mean(r)),
        linear_to_srgb(mean(g)),
        linear_to_srgb(mean(b)),
    )
}
