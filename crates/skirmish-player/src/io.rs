//! Players over a coded-line stream

use crate::player::{Player, Reply};
use async_trait::async_trait;
use skirmish_core::{Code, LogContext, Result};
use skirmish_protocol::{Conversation, LineEnding};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Player reading `!` move and `=` result lines from a stream and writing
/// the opponent's moves back as `!` lines.
pub struct IoPlayer {
    name: String,
    io: Conversation,
}

impl IoPlayer {
    pub fn new(name: impl Into<String>, io: Conversation) -> Self {
        Self {
            name: name.into(),
            io,
        }
    }

    /// The underlying conversation
    pub fn conversation(&mut self) -> &mut Conversation {
        &mut self.io
    }
}

#[async_trait]
impl Player for IoPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_move(&mut self, prompt: &str) -> Result<Option<Reply>> {
        debug!(section = %self.name, "{}", prompt);
        receive_reply(&mut self.io).await
    }

    async fn send_move(&mut self, mv: &str) -> Result<()> {
        self.io.send(&Code::MOVE, mv).await
    }

    async fn get_result(&mut self) -> Result<Option<String>> {
        receive_result(&mut self.io).await
    }
}

/// This process's standard input and output.
///
/// One `Terminal` lives for the whole run so input buffered during one game
/// is still there for the next. Every terminal player shares it.
#[derive(Clone)]
pub struct Terminal {
    io: Arc<Mutex<Conversation>>,
}

impl Terminal {
    pub fn new(log: &LogContext) -> Self {
        let io = Conversation::new(tokio::io::stdin(), tokio::io::stdout(), log.named("Terminal"))
            .with_line_ending(LineEnding::Lf);
        Self::from_conversation(io)
    }

    pub fn from_conversation(io: Conversation) -> Self {
        Self {
            io: Arc::new(Mutex::new(io)),
        }
    }

    /// A player on this terminal
    pub fn player(&self) -> TerminalPlayer {
        TerminalPlayer {
            terminal: self.clone(),
        }
    }
}

/// Player on the shared `Terminal`
pub struct TerminalPlayer {
    terminal: Terminal,
}

#[async_trait]
impl Player for TerminalPlayer {
    fn name(&self) -> &str {
        "Terminal"
    }

    async fn get_move(&mut self, prompt: &str) -> Result<Option<Reply>> {
        debug!(section = "Terminal", "{}", prompt);
        let mut io = self.terminal.io.lock().await;
        receive_reply(&mut io).await
    }

    async fn send_move(&mut self, mv: &str) -> Result<()> {
        let mut io = self.terminal.io.lock().await;
        io.send(&Code::MOVE, mv).await
    }

    async fn get_result(&mut self) -> Result<Option<String>> {
        let mut io = self.terminal.io.lock().await;
        receive_result(&mut io).await
    }
}

/// Wait for a `!` move or an `=` result line
async fn receive_reply(io: &mut Conversation) -> Result<Option<Reply>> {
    let Some(received) = io.receive_until(&[Code::MOVE, Code::RESULT]).await? else {
        return Ok(None);
    };

    let reply = if received.message.code == Code::MOVE {
        Reply::Move(received.message.body.trim().to_string())
    } else {
        Reply::GameOver(received.message.raw)
    };
    Ok(Some(reply))
}

async fn receive_result(io: &mut Conversation) -> Result<Option<String>> {
    let received = io.receive_until(&[Code::RESULT]).await?;
    Ok(received.map(|r| r.message.raw))
}
