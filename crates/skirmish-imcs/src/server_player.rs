//! Player backed by an IMCS game in progress

use async_trait::async_trait;
use skirmish_core::{Code, Result};
use skirmish_player::{IoPlayer, Player, Reply};
use skirmish_protocol::Conversation;
use tracing::{info, warn};

/// Relays moves to and from an IMCS server.
///
/// The server prompts with `?` before it accepts a move; `send_move` absorbs
/// that prompt so the game loop never sees it. If the server announces the
/// result instead of prompting, the move is dropped and the result line is
/// handed out by the next `get_move` or `get_result`. If the connection
/// closes before the prompt, the move is dropped as well and every later
/// read reports the closed stream.
pub struct ServerPlayer {
    inner: IoPlayer,
    pending_result: Option<String>,
    closed: bool,
}

impl ServerPlayer {
    pub fn new(name: impl Into<String>, io: Conversation) -> Self {
        Self {
            inner: IoPlayer::new(name, io),
            pending_result: None,
            closed: false,
        }
    }
}

#[async_trait]
impl Player for ServerPlayer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get_move(&mut self, prompt: &str) -> Result<Option<Reply>> {
        if let Some(raw) = self.pending_result.take() {
            return Ok(Some(Reply::GameOver(raw)));
        }
        if self.closed {
            return Ok(None);
        }
        self.inner.get_move(prompt).await
    }

    async fn send_move(&mut self, mv: &str) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        let Some(received) = self
            .inner
            .conversation()
            .receive_until(&[Code::PROMPT, Code::RESULT])
            .await?
        else {
            warn!(section = %self.inner.name(), "Connection closed before move {:?} could be sent", mv);
            self.closed = true;
            return Ok(());
        };

        if received.message.code == Code::RESULT {
            info!(section = %self.inner.name(), "Game ended before move {:?} could be sent", mv);
            self.pending_result = Some(received.message.raw);
            return Ok(());
        }

        self.inner.send_move(mv).await
    }

    async fn get_result(&mut self) -> Result<Option<String>> {
        if let Some(raw) = self.pending_result.take() {
            return Ok(Some(raw));
        }
        if self.closed {
            return Ok(None);
        }
        self.inner.get_result().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::LogContext;
    use skirmish_player::play_game;
    use skirmish_protocol::LineEnding;
    use tokio_test::io::{Builder, Mock};

    fn player(mock: Mock) -> ServerPlayer {
        let io = Conversation::from_stream(mock, LogContext::new("IMCS", true));
        ServerPlayer::new("IMCS:alice", io)
    }

    #[tokio::test]
    async fn test_send_move_consumes_prompt() {
        let mock = Builder::new()
            .read(b"? 300.0 300.0\r\n")
            .write(b"! e2-e4\r\n")
            .read(b"! e7-e5\r\n")
            .build();
        let mut p = player(mock);

        p.send_move("e2-e4").await.unwrap();
        assert_eq!(
            p.get_move("Black to move.").await.unwrap(),
            Some(Reply::Move("e7-e5".into()))
        );
    }

    #[tokio::test]
    async fn test_result_instead_of_prompt() {
        let mock = Builder::new().read(b"= W wins\r\n").build();
        let mut p = player(mock);

        p.send_move("a2-a3").await.unwrap();
        assert_eq!(
            p.get_move("Black to move.").await.unwrap(),
            Some(Reply::GameOver("= W wins".into()))
        );
    }

    #[tokio::test]
    async fn test_pending_result_served_to_get_result() {
        let mock = Builder::new().read(b"= draw\r\n").build();
        let mut p = player(mock);

        p.send_move("a2-a3").await.unwrap();
        assert_eq!(p.get_result().await.unwrap().as_deref(), Some("= draw"));
    }

    #[tokio::test]
    async fn test_send_move_on_closed_connection() {
        let mock = Builder::new().build();
        let mut p = player(mock);

        p.send_move("a2-a3").await.unwrap();
        assert_eq!(p.get_move("Black to move.").await.unwrap(), None);
        assert_eq!(p.get_result().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_game_against_closed_connection_aborts() {
        let local = Builder::new().read(b"! e4\n").build();
        let mut white = IoPlayer::new(
            "white",
            Conversation::from_stream(local, LogContext::default()).with_line_ending(LineEnding::Lf),
        );
        let mut black = player(Builder::new().build());

        let result = play_game(&mut white, &mut black, false, &LogContext::new("Game", false))
            .await
            .unwrap();
        assert_eq!(result, None);
    }
}
