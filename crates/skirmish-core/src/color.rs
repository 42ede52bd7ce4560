//! Player colors

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a two-player game. White always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Single-letter wire code (`W` or `B`)
    pub fn short(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Black => "B",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// The other side
    pub fn invert(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Read a color from its short code or name, ignoring case.
    pub fn read(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| {
            text.eq_ignore_ascii_case(color.short()) || text.eq_ignore_ascii_case(color.name())
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_twice_is_identity() {
        for color in Color::ALL {
            assert_ne!(color.invert(), color);
            assert_eq!(color.invert().invert(), color);
        }
    }

    #[test]
    fn test_read() {
        assert_eq!(Color::read("W"), Some(Color::White));
        assert_eq!(Color::read("b"), Some(Color::Black));
        assert_eq!(Color::read("white"), Some(Color::White));
        assert_eq!(Color::read("BLACK"), Some(Color::Black));
        assert_eq!(Color::read("?"), None);
        assert_eq!(Color::read(""), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Color::White.short(), "W");
        assert_eq!(Color::Black.index(), 1);
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
