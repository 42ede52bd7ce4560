//! Parsed protocol lines

use skirmish_core::Code;

/// One protocol line split into its code and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub code: Code,
    pub body: String,
    /// The line as it was received, without its terminator
    pub raw: String,
}

impl Message {
    /// Split a line on its first space into code and body.
    pub fn parse(line: &str) -> Self {
        let stripped = line.trim_matches([' ', '\r', '\n']);
        let (code, body) = stripped.split_once(' ').unwrap_or((stripped, ""));

        Self {
            code: Code::from_token(code),
            body: body.to_string(),
            raw: line.to_string(),
        }
    }

    /// Format a line from a code and body
    pub fn format(code: &Code, body: &str) -> String {
        format!("{} {}", code, body)
    }
}
