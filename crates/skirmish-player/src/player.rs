//! Player trait

use async_trait::async_trait;
use skirmish_core::Result;

/// What a player produced when asked to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A move, to be forwarded verbatim to the opponent
    Move(String),
    /// The raw result line (`= ...`): the game is over from this side's view
    GameOver(String),
}

/// A source and sink of moves for one side of a game
///
/// Implementations share no state with each other. A player is created for
/// one game side and dropped once the game loop returns.
#[async_trait]
pub trait Player: Send {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// Wait for this side's next move or its result line.
    ///
    /// Returns `None` when the underlying stream closed without data.
    async fn get_move(&mut self, prompt: &str) -> Result<Option<Reply>>;

    /// Tell this side about the opponent's move
    async fn send_move(&mut self, mv: &str) -> Result<()>;

    /// Wait for this side's raw result line. `None` when the stream closed.
    async fn get_result(&mut self) -> Result<Option<String>>;
}
