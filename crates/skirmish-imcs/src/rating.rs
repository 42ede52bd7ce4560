//! Rating constraints for game search
//!
//! A constraint is a single comparison against the listing's rating:
//! `rating>1800`, `rating=>=1500` (the `rating=<expr>` query form),
//! `<1200`, or a bare number meaning equality. Nothing else is evaluated.

use skirmish_core::{Result, SkirmishError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    /// Longest operators first so `<=` is not read as `<`
    const OPERATORS: [(&'static str, Comparison); 5] = [
        ("<=", Comparison::Le),
        (">=", Comparison::Ge),
        ("==", Comparison::Eq),
        ("<", Comparison::Lt),
        (">", Comparison::Gt),
    ];

    fn symbol(self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Eq => "==",
        }
    }

    /// Split a leading operator off `text`
    fn split(text: &str) -> Option<(Comparison, &str)> {
        Self::OPERATORS
            .iter()
            .find_map(|(symbol, op)| text.strip_prefix(symbol).map(|rest| (*op, rest)))
    }
}

/// `rating <op> value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingFilter {
    pub op: Comparison,
    pub value: i64,
}

impl RatingFilter {
    pub fn parse(expr: &str) -> Result<Self> {
        let text = expr.trim();
        let text = text.strip_prefix("rating").map(str::trim_start).unwrap_or(text);

        let (op, rest) = if let Some(rest) = text.strip_prefix("==") {
            (Comparison::Eq, rest)
        } else if let Some(rest) = text.strip_prefix('=') {
            let rest = rest.trim_start();
            Comparison::split(rest).unwrap_or((Comparison::Eq, rest))
        } else {
            Comparison::split(text).unwrap_or((Comparison::Eq, text))
        };

        let value = rest
            .trim()
            .parse::<i64>()
            .map_err(|_| SkirmishError::InvalidUrl(format!("invalid rating expression: {:?}", expr)))?;

        Ok(Self { op, value })
    }

    pub fn matches(&self, rating: i64) -> bool {
        match self.op {
            Comparison::Lt => rating < self.value,
            Comparison::Le => rating <= self.value,
            Comparison::Gt => rating > self.value,
            Comparison::Ge => rating >= self.value,
            Comparison::Eq => rating == self.value,
        }
    }
}

impl FromStr for RatingFilter {
    type Err = SkirmishError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RatingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rating {} {}", self.op.symbol(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(expr: &str) -> RatingFilter {
        RatingFilter::parse(expr).unwrap()
    }

    #[test]
    fn test_operator_forms() {
        assert_eq!(filter("rating>1800"), RatingFilter { op: Comparison::Gt, value: 1800 });
        assert_eq!(filter(">1800"), RatingFilter { op: Comparison::Gt, value: 1800 });
        assert_eq!(filter("rating >= 1500"), RatingFilter { op: Comparison::Ge, value: 1500 });
        assert_eq!(filter("rating<=1200").op, Comparison::Le);
        assert_eq!(filter("rating<1200").op, Comparison::Lt);
        assert_eq!(filter("rating==1600").op, Comparison::Eq);
    }

    #[test]
    fn test_query_value_forms() {
        assert_eq!(filter("rating=>1800"), RatingFilter { op: Comparison::Gt, value: 1800 });
        assert_eq!(filter("rating=<=1500").op, Comparison::Le);
        assert_eq!(filter("rating=1650"), RatingFilter { op: Comparison::Eq, value: 1650 });
        assert_eq!(filter("1650"), RatingFilter { op: Comparison::Eq, value: 1650 });
    }

    #[test]
    fn test_matches() {
        let f = filter(">1600");
        assert!(f.matches(1800));
        assert!(!f.matches(1600));
        assert!(filter("<=1600").matches(1600));
        assert!(filter("==1600").matches(1600));
        assert!(!filter("==1600").matches(1601));
    }

    #[test]
    fn test_rejects_anything_else() {
        for expr in [
            "rating>1800 or True",
            "__import__('os')",
            "rating>",
            "rating===1800",
            "elo>1800",
            "rating>1800 and rating<2000",
            "",
        ] {
            assert!(
                matches!(RatingFilter::parse(expr), Err(SkirmishError::InvalidUrl(_))),
                "accepted {:?}",
                expr
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(filter("rating=>1800").to_string(), "rating > 1800");
    }
}
