/// ANSI color tags understood by the terminal emulators on the cluster
/// login nodes. `None` means "emit the text bare" and is what --no-color
/// rows use; `Reset` terminates every colorized span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    None,
    Reset,
    Green,
    Yellow,
    Red,
    Blue,
    LightBlue,
    White,
    BlinkingRedBackground,
}

impl Color {
    pub fn code(self) -> &'static str {
        match self {
            Color::None => "",
            Color::Reset => "\x1b[0m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Red => "\x1b[31m",
            Color::Blue => "\x1b[34m",
            Color::LightBlue => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::BlinkingRedBackground => "\x1b[41;5m",
        }
    }
}

/// Wrap `s` in the escape codes for `c`. `Color::None` passes the text
/// through untouched so uncolored cells carry no escape bytes at all.
pub fn colorize(c: Color, s: &str) -> String {
    if c == Color::None {
        s.to_owned()
    } else {
        format!("{}{}{}", c.code(), s, Color::Reset.code())
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
