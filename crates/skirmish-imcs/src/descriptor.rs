//! Player descriptors
//!
//! ```text
//! -                                       terminal on stdin/stdout
//! run COMMAND                             a shell command's stdin/stdout
//! imcs://[user[:pass]@]host[:port]/offer  offer a game on an IMCS server
//! imcs://.../accept?[id=N|name=S|rating=EXPR]
//! ```

use crate::listing::GameListing;
use crate::rating::RatingFilter;
use skirmish_core::{Color, Result, SkirmishError};
use std::str::FromStr;
use tracing::warn;
use url::Url;

/// A parsed player descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerSpec {
    Terminal,
    Process(String),
    Remote(ImcsUrl),
}

impl PlayerSpec {
    pub fn parse(text: &str) -> Result<Self> {
        if text == "-" {
            return Ok(PlayerSpec::Terminal);
        }

        if let Some(command) = text.strip_prefix("run ") {
            let command = command.trim();
            if command.is_empty() {
                return Err(SkirmishError::InvalidUrl("missing command after \"run\"".into()));
            }
            return Ok(PlayerSpec::Process(command.to_string()));
        }

        if text.starts_with("imcs") {
            return ImcsUrl::parse(text).map(PlayerSpec::Remote);
        }

        Err(SkirmishError::InvalidUrl(format!("invalid player specified: {:?}", text)))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, PlayerSpec::Remote(_))
    }
}

impl FromStr for PlayerSpec {
    type Err = SkirmishError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// What to do once connected
#[derive(Debug, Clone, PartialEq)]
pub enum ImcsPath {
    Offer,
    Accept(AcceptQuery),
}

/// Constraints on which open game to accept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptQuery {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub rating: Option<RatingFilter>,
}

impl AcceptQuery {
    /// Whether `game` is acceptable for a player wanting `color`.
    ///
    /// The game's color must be unset or equal to `color`. A `name` takes
    /// precedence over a `rating` constraint.
    pub fn matches(&self, game: &GameListing, color: Color) -> bool {
        if game.color.is_some_and(|c| c != color) {
            return false;
        }

        if let Some(name) = &self.name {
            game.name == *name
        } else if let Some(rating) = &self.rating {
            rating.matches(game.rating)
        } else {
            true
        }
    }

    /// The most recently listed acceptable game
    pub fn find_match<'a>(&self, games: &'a [GameListing], color: Color) -> Option<&'a GameListing> {
        games.iter().rev().find(|game| self.matches(game, color))
    }
}

/// `imcs://[user[:pass]@]host[:port]/path[?query]`
#[derive(Debug, Clone, PartialEq)]
pub struct ImcsUrl {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub path: ImcsPath,
}

impl ImcsUrl {
    pub fn parse(text: &str) -> Result<Self> {
        let url = Url::parse(text).map_err(|e| SkirmishError::InvalidUrl(format!("{}: {}", text, e)))?;

        if url.scheme() != "imcs" {
            return Err(SkirmishError::InvalidUrl(format!("unsupported scheme: {}", url.scheme())));
        }

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(SkirmishError::InvalidUrl("Missing hostname.".into())),
        };

        let username = Some(url.username())
            .filter(|u| !u.is_empty())
            .map(String::from);
        let password = url.password().map(String::from);

        let path = match url.path() {
            "/offer" => ImcsPath::Offer,
            "/accept" | "/" | "" => ImcsPath::Accept(parse_query(url.query().unwrap_or(""))?),
            other => {
                return Err(SkirmishError::InvalidUrl(format!("invalid IMCS path: {}", other)));
            }
        };

        Ok(Self {
            host,
            port: url.port(),
            username,
            password,
            path,
        })
    }
}

/// Parse `id=N`, `name=S` and rating expressions out of a raw query string.
fn parse_query(query: &str) -> Result<AcceptQuery> {
    let mut parsed = AcceptQuery::default();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let Some((key, value)) = url::form_urlencoded::parse(pair.as_bytes()).next() else {
            continue;
        };

        if key.starts_with("rating") {
            // The whole pair is the expression: `rating>1800`, `rating=>1800`
            let expr = if pair.contains('=') {
                format!("{}={}", key, value)
            } else {
                key.into_owned()
            };
            parsed.rating = Some(RatingFilter::parse(&expr)?);
            continue;
        }

        match key.as_ref() {
            "id" => {
                let id = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| SkirmishError::InvalidUrl(format!("invalid game id: {:?}", value)))?;
                parsed.id = Some(id);
            }
            "name" => parsed.name = Some(value.into_owned()),
            other => warn!(section = "IMCS", "Ignoring unknown query parameter {:?}", other),
        }
    }

    Ok(parsed)
}
