//! Open-game listings

use crate::revision::Revision;
use serde::Serialize;
use skirmish_core::{Color, Result, SkirmishError};

/// Per-side clock values reported by newer revisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clocks {
    pub mine: String,
    pub yours: String,
}

/// One open game as shown by `list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameListing {
    pub id: i64,
    pub name: String,
    /// Color of the offering player, unset when the offer left it open
    pub color: Option<Color>,
    pub rating: i64,
    pub clocks: Option<Clocks>,
}

impl GameListing {
    /// Parse one indented listing line.
    ///
    /// Older revisions send `id name color rating`, 2.5 sends
    /// `id name color mytime yourtime rating`. Extra trailing fields are
    /// ignored.
    pub fn parse(line: &str, revision: Revision) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let bad_line = || SkirmishError::protocol(line, "unable to parse game listing.");

        let (id, name, color, clocks, rating) = if revision.listing_has_clocks() {
            match fields.as_slice() {
                [id, name, color, mine, yours, rating, ..] => (
                    id,
                    name,
                    color,
                    Some(Clocks {
                        mine: mine.to_string(),
                        yours: yours.to_string(),
                    }),
                    rating,
                ),
                _ => return Err(bad_line()),
            }
        } else {
            match fields.as_slice() {
                [id, name, color, rating, ..] => (id, name, color, None, rating),
                _ => return Err(bad_line()),
            }
        };

        Ok(Self {
            id: id.parse().map_err(|_| bad_line())?,
            name: name.to_string(),
            color: Color::read(color),
            rating: rating.parse().map_err(|_| bad_line())?,
            clocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_older_revision() {
        let game = GameListing::parse(" 12 bart W 1500", Revision::V2_4).unwrap();
        assert_eq!(game.id, 12);
        assert_eq!(game.name, "bart");
        assert_eq!(game.color, Some(Color::White));
        assert_eq!(game.rating, 1500);
        assert_eq!(game.clocks, None);
    }

    #[test]
    fn test_parse_with_clocks() {
        let game = GameListing::parse(" 4 lisa ? 05:00 04:30 1820 [offer]", Revision::V2_5).unwrap();
        assert_eq!(game.id, 4);
        assert_eq!(game.color, None);
        assert_eq!(game.rating, 1820);
        assert_eq!(
            game.clocks,
            Some(Clocks {
                mine: "05:00".into(),
                yours: "04:30".into()
            })
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = GameListing::parse(" x bart W 1500", Revision::V2_3).unwrap_err();
        assert!(err.to_string().contains(" x bart W 1500"));

        // 2.5 listings need the clock fields.
        assert!(GameListing::parse(" 12 bart W 1500", Revision::V2_5).is_err());
        assert!(GameListing::parse(" 12 bart W", Revision::V2_3).is_err());
    }
}
