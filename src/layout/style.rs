//! Styling for the info column

use nu_ansi_term::Color;

/// Stateless text styling used by the layout engine
pub trait Styler {
    /// Style a field label such as `Card: `
    fn label(&self, text: &str) -> String;

    /// Style a field value
    fn value(&self, text: &str) -> String;
}

/// Cyan labels, bright white values
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn label(&self, text: &str) -> String {
        Color::Cyan.paint(text).to_string()
    }

    fn value(&self, text: &str) -> String {
        Color::LightGray.paint(text).to_string()
    }
}

/// No escape sequences at all
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn label(&self, text: &str) -> String {
        text.to_string()
    }

    fn value(&self, text: &str) -> String {
        text.to_string()
    }
}
