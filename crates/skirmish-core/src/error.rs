//! Error types for skirmish

use crate::code::Code;
use thiserror::Error;

/// Result type for skirmish operations
pub type Result<T> = std::result::Result<T, SkirmishError>;

/// Skirmish error types
#[derive(Debug, Error)]
pub enum SkirmishError {
    /// A line did not match any expected shape
    #[error("Protocol error: {line:?}{}", explain_suffix(.explain))]
    Protocol { line: String, explain: Option<String> },

    /// A line's code was not among the codes the caller required
    #[error("Protocol error: {line:?}; expected codes: {}", format_codes(.expected))]
    ExpectedCode {
        code: Code,
        expected: Vec<Code>,
        line: String,
    },

    /// Server banner unrecognized or version unsupported
    #[error("Bad IMCS version: {0}")]
    BadVersion(String),

    /// Login or registration rejected by the server
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No game matched an accept request
    #[error("Game not found: {0}")]
    GameNotFound(String),

    /// Malformed player descriptor
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Socket, pipe or terminal failure
    #[error("Transport error: {0}")]
    Transport(String),
}

impl SkirmishError {
    pub fn protocol(line: impl Into<String>, explain: impl Into<String>) -> Self {
        SkirmishError::Protocol {
            line: line.into(),
            explain: Some(explain.into()),
        }
    }

    /// True for `Protocol` and its `ExpectedCode` specialization.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            SkirmishError::Protocol { .. } | SkirmishError::ExpectedCode { .. }
        )
    }
}

fn explain_suffix(explain: &Option<String>) -> String {
    explain
        .as_ref()
        .map(|e| format!("; {}", e))
        .unwrap_or_default()
}

fn format_codes(codes: &[Code]) -> String {
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    format!("[{}]", codes.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_code_message() {
        let err = SkirmishError::ExpectedCode {
            code: Code::Numeric(401),
            expected: vec![Code::Numeric(100), Code::RESULT],
            line: "401 bad".into(),
        };
        assert_eq!(
            err.to_string(),
            "Protocol error: \"401 bad\"; expected codes: [100, =]"
        );
        assert!(err.is_protocol());
    }

    #[test]
    fn test_protocol_message() {
        let err = SkirmishError::protocol(" x y", "unable to parse game listing.");
        assert_eq!(
            err.to_string(),
            "Protocol error: \" x y\"; unable to parse game listing."
        );

        let bare = SkirmishError::Protocol {
            line: "= ???".into(),
            explain: None,
        };
        assert_eq!(bare.to_string(), "Protocol error: \"= ???\"");
        assert!(!SkirmishError::GameNotFound("x".into()).is_protocol());
    }
}
