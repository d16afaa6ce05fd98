//! Reduced-palette color matching (xterm 256 and ANSI 16)
//!
//! Any RGB input maps to some palette entry, so the fallback modes never fail.

use super::color::Color;

/// Channel levels of the 6x6x6 color cube (indices 16-231)
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// xterm default RGB values for the 16 ANSI colors
const ANSI16: [Color; 16] = [
    Color::rgb(0, 0, 0),
    Color::rgb(205, 0, 0),
    Color::rgb(0, 205, 0),
    Color::rgb(205, 205, 0),
    Color::rgb(0, 0, 238),
    Color::rgb(205, 0, 205),
    Color::rgb(0, 205, 205),
    Color::rgb(229, 229, 229),
    Color::rgb(127, 127, 127),
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(255, 255, 0),
    Color::rgb(92, 92, 255),
    Color::rgb(255, 0, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 255, 255),
];

fn nearest_cube_level(v: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, &level)| (i16::from(level) - i16::from(v)).unsigned_abs())
        .map_or(0, |(i, _)| i)
}

/// Nearest xterm-256 index, chosen between the color cube and the gray ramp
pub fn nearest_256(c: Color) -> u8 {
    let (ri, gi, bi) = (
        nearest_cube_level(c.r),
        nearest_cube_level(c.g),
        nearest_cube_level(c.b),
    );
    let cube = Color::rgb(CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    // gray ramp 232-255: 8, 18, ..., 238
    let avg = (u16::from(c.r) + u16::from(c.g) + u16::from(c.b)) / 3;
    let step = (avg.saturating_sub(3) / 10).min(23);
    let gray_level = (8 + step * 10) as u8;
    let gray = Color::rgb(gray_level, gray_level, gray_level);
    let gray_index = 232 + usize::from(step);

    if gray.distance_sq(&c) < cube.distance_sq(&c) {
        gray_index as u8
    } else {
        cube_index as u8
    }
}

/// Nearest of the 16 ANSI colors (0-15)
pub fn nearest_16(c: Color) -> u8 {
    ANSI16
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.distance_sq(&c))
        .map_or(0, |(i, _)| i as u8)
}

/// SGR foreground code for an ANSI 16 index
pub fn fg_code_16(index: u8) -> u8 {
    if index < 8 {
        30 + index
    } else {
        90 + (index - 8)
    }
}

/// SGR background code for an ANSI 16 index
pub fn bg_code_16(index: u8) -> u8 {
    if index < 8 {
        40 + index
    } else {
        100 + (index - 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_256_exact_entries() {
        assert_eq!(nearest_256(Color::BLACK), 16);
        assert_eq!(nearest_256(Color::WHITE), 231);
        assert_eq!(nearest_256(Color::RED), 196);
        assert_eq!(nearest_256(Color::rgb(128, 128, 128)), 244);
    }

    #[test]
    fn test_nearest_256_never_panics() {
        for v in (0..=255u8).step_by(5) {
            let idx = nearest_256(Color::rgb(v, 255 - v, v / 2));
            assert!(idx >= 16);
        }
    }

    #[test]
    fn test_nearest_16() {
        assert_eq!(nearest_16(Color::BLACK), 0);
        assert_eq!(nearest_16(Color::WHITE), 15);
        assert_eq!(nearest_16(Color::rgb(250, 10, 10)), 9);
        assert_eq!(fg_code_16(9), 91);
        assert_eq!(bg_code_16(1), 41);
    }
}
