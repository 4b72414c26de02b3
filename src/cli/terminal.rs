//! Terminal capability detection and styled output

use owo_colors::{colors::css, OwoColorize};

/// Terminals narrower than this get compact separators.
const NARROW_COLUMNS: u16 = 60;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrower than [`NARROW_COLUMNS`]
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < NARROW_COLUMNS)
}

/// Styles text for confirmations, non-fatal reports and headings.
///
/// Styling is dropped when stdout is not a color terminal, so the plain text
/// is always a substring of the output.
pub trait Colorize {
    /// Confirmation of a completed operation (green)
    fn success(&self) -> String;
    /// Non-fatal condition such as an unknown ID (amber)
    fn warning(&self) -> String;
    /// Headings (blue)
    fn info(&self) -> String;
    /// Secondary text
    fn dim(&self) -> String;
}

fn paint(text: &str, styled: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        styled(text)
    } else {
        text.to_string()
    }
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::LightBlue>().to_string())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }
}
