//! IMCS protocol revisions
//!
//! The supported revisions differ only in whether `accept` names a color,
//! the field count of listing lines, and where the game id sits in an offer
//! acknowledgment. The revision announced in the connect banner selects the
//! branch taken for the rest of the session.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Revision {
    V2_3,
    V2_4,
    V2_5,
}

impl Revision {
    pub const ALL: [Revision; 3] = [Revision::V2_3, Revision::V2_4, Revision::V2_5];

    pub fn parse(version: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == version)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Revision::V2_3 => "2.3",
            Revision::V2_4 => "2.4",
            Revision::V2_5 => "2.5",
        }
    }

    /// Whether `accept` carries an explicit color
    pub fn accept_takes_color(self) -> bool {
        self >= Revision::V2_4
    }

    /// Whether listing lines carry per-side clock values
    pub fn listing_has_clocks(self) -> bool {
        self >= Revision::V2_5
    }

    /// Extract the game id from the body of an offer acknowledgment.
    ///
    /// 2.3 puts the id last, later revisions first. When the expected
    /// position holds no integer, the first integer token is used.
    pub fn offer_game_id(self, body: &str) -> Option<i64> {
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let preferred = match self {
            Revision::V2_3 => tokens.last(),
            Revision::V2_4 | Revision::V2_5 => tokens.first(),
        };

        preferred
            .and_then(|t| t.parse::<i64>().ok())
            .or_else(|| tokens.iter().find_map(|t| t.parse::<i64>().ok()))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
