//! Console text styling

use owo_colors::{OwoColorize, colors::css};

/// How a piece of console text is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Load diagnostics (amber).
    Warning,
    /// Labels and summaries.
    Dim,
}

/// Whether stdout can display colour.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Styles `text` if stdout supports colour.
pub fn paint(text: &str, style: Style) -> String {
    paint_if(text, style, supports_color())
}

/// Styles `text` when `enabled`, otherwise returns it unchanged.
pub fn paint_if(text: &str, style: Style, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match style {
        Style::Warning => text.fg::<css::Orange>().to_string(),
        Style::Dim => text.dimmed().to_string(),
    }
}
