use std::fmt::Display;

use crossterm::style::{style, Color, Stylize};

/// Colors the fields of a flow line.
///
/// When disabled every method returns the text untouched, so the same
/// rendering code serves terminals and pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colorer {
    enabled: bool,
}

impl Default for Colorer {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Colorer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: impl Display, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn host(&self, text: impl Display) -> String {
        self.paint(text, Color::Cyan)
    }

    pub fn identity(&self, text: impl Display) -> String {
        self.paint(text, Color::Magenta)
    }

    pub fn verdict_forwarded(&self, text: impl Display) -> String {
        self.paint(text, Color::Green)
    }

    pub fn verdict_dropped(&self, text: impl Display) -> String {
        self.paint(text, Color::Red)
    }

    pub fn verdict_audit(&self, text: impl Display) -> String {
        self.paint(text, Color::Yellow)
    }
}

/// Removes ANSI escape sequences (`ESC ... m`) from the text.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

/// Number of printable characters, ignoring color codes.
pub fn visible_width(s: &str) -> usize {
    if s.contains('\x1b') {
        strip_ansi(s).chars().count()
    } else {
        s.chars().count()
    }
}
