//! IMCS client configuration

use crate::revision::Revision;
use skirmish_protocol::LineEnding;

/// Port used when a descriptor names none
pub const DEFAULT_IMCS_PORT: u16 = 3589;

#[derive(Debug, Clone)]
pub struct ImcsConfig {
    /// Port used when the URL has none
    pub port: u16,
    /// Revisions this client is willing to speak
    pub accepted_revisions: Vec<Revision>,
    /// Terminator written after each line
    pub line_ending: LineEnding,
}

impl Default for ImcsConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_IMCS_PORT,
            accepted_revisions: Revision::ALL.to_vec(),
            line_ending: LineEnding::CrLf,
        }
    }
}
