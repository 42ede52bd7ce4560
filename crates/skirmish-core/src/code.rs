//! Line codes

use std::borrow::Cow;
use std::fmt;

/// The leading token of a protocol line.
///
/// Server status lines carry a number (`201 welcome`); lines exchanged
/// between players carry a one-character tag (`! e2e4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Code {
    Numeric(i64),
    Tag(Cow<'static, str>),
}

impl Code {
    /// Prompt for a move (`?`)
    pub const PROMPT: Code = Code::Tag(Cow::Borrowed("?"));
    /// A move (`!`)
    pub const MOVE: Code = Code::Tag(Cow::Borrowed("!"));
    /// A game result (`=`)
    pub const RESULT: Code = Code::Tag(Cow::Borrowed("="));
    /// End of a multi-line block (`.`)
    pub const END: Code = Code::Tag(Cow::Borrowed("."));

    /// Interpret a token: integers become numeric codes, anything else a tag.
    pub fn from_token(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(n) => Code::Numeric(n),
            Err(_) => Code::Tag(Cow::Owned(token.to_string())),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Code::Numeric(_))
    }
}

impl From<i64> for Code {
    fn from(n: i64) -> Self {
        Code::Numeric(n)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Numeric(n) => write!(f, "{}", n),
            Code::Tag(t) => f.write_str(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(Code::from_token("201"), Code::Numeric(201));
        assert_eq!(Code::from_token("!"), Code::MOVE);
        assert_eq!(Code::from_token("."), Code::END);
        assert_eq!(Code::from_token("quit"), Code::Tag("quit".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Code::Numeric(408).to_string(), "408");
        assert_eq!(Code::PROMPT.to_string(), "?");
    }
}
