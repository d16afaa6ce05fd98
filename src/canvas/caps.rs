//! Terminal capability detection
//!
//! Auto-detects:
//! - Color depth (TrueColor, 256, 16) for the glyph renderer
//! - Terminal width for the text layout

use std::env;
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

/// Width used when the terminal size cannot be probed (e.g. output redirected)
pub const FALLBACK_WIDTH: usize = 80;

/// Color encoding used for glyph cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// 24-bit RGB (16 million colors)
    #[default]
    TrueColor,
    /// xterm 256 color palette
    Palette256,
    /// 16 ANSI colors
    Palette16,
}

impl ColorMode {
    /// Stable name, also used as part of the art cache key
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::TrueColor => "truecolor",
            ColorMode::Palette256 => "256",
            ColorMode::Palette16 => "16",
        }
    }

    /// Detect color depth from the environment
    pub fn detect() -> Self {
        detect_color_mode(
            env::var("COLORTERM").ok().as_deref(),
            env::var("TERM").ok().as_deref(),
        )
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Ok(ColorMode::TrueColor),
            "256" | "ansi256" => Ok(ColorMode::Palette256),
            "16" | "ansi16" => Ok(ColorMode::Palette16),
            "auto" => Ok(ColorMode::detect()),
            other => Err(format!(
                "unknown color mode '{other}' (expected truecolor, 256, 16 or auto)"
            )),
        }
    }
}

fn detect_color_mode(colorterm: Option<&str>, term: Option<&str>) -> ColorMode {
    if let Some(ct) = colorterm {
        if ct == "truecolor" || ct == "24bit" {
            return ColorMode::TrueColor;
        }
    }

    if let Some(term) = term {
        if term.contains("24bit") || term.contains("truecolor") || term.contains("direct") {
            return ColorMode::TrueColor;
        }
        if term.contains("256color") {
            return ColorMode::Palette256;
        }
        if term == "linux" || term.contains("16color") || term == "xterm" {
            return ColorMode::Palette16;
        }
    }

    // Most modern terminals support truecolor
    ColorMode::TrueColor
}

/// Current terminal column count, or [`FALLBACK_WIDTH`] when stdout is not a terminal
pub fn terminal_width() -> usize {
    if !std::io::stdout().is_terminal() {
        return FALLBACK_WIDTH;
    }
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        Ok(_) => FALLBACK_WIDTH,
        Err(e) => {
            tracing::debug!("Terminal size probe failed: {}", e);
            FALLBACK_WIDTH
        }
    }
}
