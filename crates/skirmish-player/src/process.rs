//! Player backed by a spawned engine process

use crate::io::IoPlayer;
use crate::player::{Player, Reply};
use async_trait::async_trait;
use skirmish_core::{LogContext, Result, SkirmishError};
use skirmish_protocol::{Conversation, LineEnding};
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::info;

/// Player speaking the coded-line protocol over a child's stdin/stdout
pub struct ProcessPlayer {
    inner: IoPlayer,
    child: Child,
}

impl ProcessPlayer {
    /// Run `command` through the platform shell with piped standard streams.
    ///
    /// The player is named after the executable's base name, and the child
    /// is killed if it is still running when the player is dropped.
    pub fn spawn(command: &str, log: &LogContext) -> Result<Self> {
        let name = format!("Process:{}", command_name(command));

        let mut child = shell(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SkirmishError::Transport(format!("Failed to spawn {:?}: {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SkirmishError::Transport("No stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SkirmishError::Transport("No stdout".into()))?;

        info!(section = %name, "Started {:?} (pid {:?})", command, child.id());

        let io = Conversation::new(stdout, stdin, log.named(name.clone())).with_line_ending(LineEnding::Lf);
        Ok(Self {
            inner: IoPlayer::new(name, io),
            child,
        })
    }

    /// Process id of the child, if it is still running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}

#[async_trait]
impl Player for ProcessPlayer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get_move(&mut self, prompt: &str) -> Result<Option<Reply>> {
        self.inner.get_move(prompt).await
    }

    async fn send_move(&mut self, mv: &str) -> Result<()> {
        self.inner.send_move(mv).await
    }

    async fn get_result(&mut self) -> Result<Option<String>> {
        self.inner.get_result().await
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Base name of the first word of a command line
fn command_name(command: &str) -> &str {
    let program = command.split(' ').next().unwrap_or(command);
    Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program)
}
