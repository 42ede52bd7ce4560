//! Game results

use crate::color::Color;
use crate::error::{Result, SkirmishError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final outcome of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Color),
    Draw,
}

impl GameResult {
    /// Parse a result line such as `= White wins` or `= draw`.
    ///
    /// The line must start with the `=` tag. Any mention of `draw` makes the
    /// game a draw; otherwise the first word after the tag names the winner.
    /// A line naming no winner is a draw.
    pub fn parse(line: &str) -> Result<Self> {
        let lowered = line.trim().to_lowercase();
        let mut parts = lowered.split(' ');
        if parts.next() != Some("=") {
            return Err(SkirmishError::protocol(line, "not a result line"));
        }

        if lowered.contains("draw") {
            return Ok(GameResult::Draw);
        }

        Ok(parts
            .next()
            .and_then(Color::read)
            .map_or(GameResult::Draw, GameResult::Winner))
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Winner(color) => Some(color),
            GameResult::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Winner(color) => write!(f, "{} wins.", color),
            GameResult::Draw => f.write_str("The game is a draw."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_winner() {
        assert_eq!(
            GameResult::parse("= white wins").unwrap(),
            GameResult::Winner(Color::White)
        );
        assert_eq!(
            GameResult::parse("= B wins on time").unwrap(),
            GameResult::Winner(Color::Black)
        );
    }

    #[test]
    fn test_parse_draw() {
        assert_eq!(GameResult::parse("= draw").unwrap(), GameResult::Draw);
        assert_eq!(
            GameResult::parse("= game is a DRAW by repetition").unwrap(),
            GameResult::Draw
        );
    }

    #[test]
    fn test_parse_rejects_non_result() {
        let err = GameResult::parse("! e4").unwrap_err();
        assert!(err.is_protocol());
        assert!(GameResult::parse("").is_err());
    }

    #[test]
    fn test_parse_without_winner_is_draw() {
        assert_eq!(GameResult::parse("= game over").unwrap(), GameResult::Draw);
        assert_eq!(GameResult::parse("=").unwrap(), GameResult::Draw);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(GameResult::Winner(Color::White).to_string(), "White wins.");
        assert_eq!(GameResult::Draw.to_string(), "The game is a draw.");

        let json = serde_json::to_string(&GameResult::Winner(Color::Black)).unwrap();
        assert_eq!(json, r#"{"Winner":"Black"}"#);
    }
}
