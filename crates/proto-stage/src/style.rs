//! ANSI display styles for console banners.

use std::fmt;

const RESET: &str = "\x1b[0m";

/// Named display styles for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Header,
    Blue,
    Green,
    Warning,
    Fail,
    Bold,
    Underline,
}

impl Style {
    /// The ANSI escape sequence starting this style.
    fn code(self) -> &'static str {
        match self {
            Style::Header => "\x1b[95m",
            Style::Blue => "\x1b[94m",
            Style::Green => "\x1b[92m",
            Style::Warning => "\x1b[93m",
            Style::Fail => "\x1b[91m",
            Style::Bold => "\x1b[1m",
            Style::Underline => "\x1b[4m",
        }
    }
}

/// Wrap `text` in the escape codes for `style`.
pub fn paint(style: Style, text: impl fmt::Display) -> String {
    format!("{}{}{}", style.code(), text, RESET)
}
