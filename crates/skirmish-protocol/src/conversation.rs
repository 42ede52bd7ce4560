//! Coded-line conversation over a duplex byte stream
//!
//! The conversation is strictly request/response: every send is flushed
//! before the caller waits for the peer's answer, and nothing is buffered
//! across turns on the write side.

use crate::message::Message;
use skirmish_core::log::{RECEIVED, SENT};
use skirmish_core::{Code, LogContext, Result, SkirmishError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Buffered read half of a conversation
pub type BoxReader = Box<dyn AsyncBufRead + Send + Unpin>;
/// Write half of a conversation
pub type BoxWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Terminator appended to every line written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Result of `Conversation::receive_until`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    /// The line whose code ended the wait
    pub message: Message,
    /// Every line read during the wait, terminating line included, one per `\n`
    pub text: String,
}

impl Received {
    /// Lines read before the terminating one, in arrival order
    pub fn preceding_lines(&self) -> impl Iterator<Item = &str> {
        let mut lines: Vec<&str> = self.text.lines().collect();
        lines.pop();
        lines.into_iter()
    }
}

/// Reader/writer for `CODE body` lines
pub struct Conversation {
    reader: BoxReader,
    writer: BoxWriter,
    log: LogContext,
    line_ending: LineEnding,
}

impl Conversation {
    /// Create a conversation from separate read and write streams
    pub fn new<R, W>(reader: R, writer: W, log: LogContext) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            reader: Box::new(BufReader::new(reader)),
            writer: Box::new(writer),
            log,
            line_ending: LineEnding::default(),
        }
    }

    /// Create a conversation over a single duplex stream (socket, mock)
    pub fn from_stream<S>(stream: S, log: LogContext) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        Self::new(reader, writer, log)
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn log(&self) -> &LogContext {
        &self.log
    }

    /// Replace the logging context, e.g. once a username is known
    pub fn set_log(&mut self, log: LogContext) {
        self.log = log;
    }

    /// Read one line without its terminator. `None` when the stream closed.
    pub async fn receive_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line).await.map_err(|e| {
            SkirmishError::Transport(format!("{}: read failed: {}", self.log.name(), e))
        })?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']).to_string();
        self.log.wire(RECEIVED, &line);
        Ok(Some(line))
    }

    /// Read exactly one line and require its code to be one of `codes`.
    pub async fn expect(&mut self, codes: &[Code]) -> Result<Message> {
        let line = self.receive_line().await?.ok_or_else(|| SkirmishError::Protocol {
            line: String::new(),
            explain: Some(format!(
                "stream closed while expecting codes: {}",
                join_codes(codes)
            )),
        })?;

        let msg = Message::parse(&line);
        if codes.contains(&msg.code) {
            Ok(msg)
        } else {
            Err(SkirmishError::ExpectedCode {
                code: msg.code,
                expected: codes.to_vec(),
                line,
            })
        }
    }

    /// Read lines until one carries a code in `codes`, keeping everything read.
    ///
    /// Returns `None` when the stream ends before a terminating line arrives.
    pub async fn receive_until(&mut self, codes: &[Code]) -> Result<Option<Received>> {
        let mut text = String::new();
        loop {
            let Some(line) = self.receive_line().await? else {
                return Ok(None);
            };
            text.push_str(&line);
            text.push('\n');

            let message = Message::parse(&line);
            if codes.contains(&message.code) {
                return Ok(Some(Received { message, text }));
            }
        }
    }

    /// Write one line and flush it to the peer
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.log.wire(SENT, line);

        let mut data = String::with_capacity(line.len() + 2);
        data.push_str(line);
        data.push_str(self.line_ending.as_str());

        self.writer
            .write_all(data.as_bytes())
            .await
            .map_err(|e| SkirmishError::Transport(format!("{}: write failed: {}", self.log.name(), e)))?;
        self.writer
            .flush()
            .await
            .map_err(|e| SkirmishError::Transport(format!("{}: flush failed: {}", self.log.name(), e)))?;
        Ok(())
    }

    /// Write a `CODE body` line
    pub async fn send(&mut self, code: &Code, body: &str) -> Result<()> {
        self.send_line(&Message::format(code, body)).await
    }

    /// Shut down the write half
    pub async fn shutdown(&mut self) -> Result<()> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| SkirmishError::Transport(format!("{}: shutdown failed: {}", self.log.name(), e)))
    }
}

fn join_codes(codes: &[Code]) -> String {
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    format!("[{}]", codes.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    fn log() -> LogContext {
        LogContext::new("test", true)
    }

    #[tokio::test]
    async fn test_receive_line_strips_terminators() {
        let mock = Builder::new().read(b"100 imcs 2.5\r\n! e4\n").build();
        let mut conv = Conversation::from_stream(mock, log());

        assert_eq!(conv.receive_line().await.unwrap().as_deref(), Some("100 imcs 2.5"));
        assert_eq!(conv.receive_line().await.unwrap().as_deref(), Some("! e4"));
        assert_eq!(conv.receive_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expect_accepts_listed_code() {
        let mock = Builder::new().read(b"201 hello alice\r\n").build();
        let mut conv = Conversation::from_stream(mock, log());

        let msg = conv.expect(&[Code::Numeric(201), Code::Numeric(401)]).await.unwrap();
        assert_eq!(msg.code, Code::Numeric(201));
        assert_eq!(msg.body, "hello alice");
        assert_eq!(msg.raw, "201 hello alice");
    }

    #[tokio::test]
    async fn test_expect_rejects_other_code() {
        let mock = Builder::new().read(b"401 bad\r\n").build();
        let mut conv = Conversation::from_stream(mock, log());

        match conv.expect(&[Code::Numeric(100)]).await {
            Err(SkirmishError::ExpectedCode {
                code,
                expected,
                line,
            }) => {
                assert_eq!(code, Code::Numeric(401));
                assert_eq!(expected, vec![Code::Numeric(100)]);
                assert_eq!(line, "401 bad");
            }
            other => panic!("Expected ExpectedCode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_expect_on_closed_stream() {
        let mock = Builder::new().build();
        let mut conv = Conversation::from_stream(mock, log());

        let err = conv.expect(&[Code::Numeric(100)]).await.unwrap_err();
        assert!(err.is_protocol());
        assert!(err.to_string().contains("stream closed"));
    }

    #[tokio::test]
    async fn test_receive_until_accumulates_in_order() {
        let mock = Builder::new()
            .read(b" 1 alice W 1500\r\n")
            .read(b" 2 bob B 1800\r\n 3 carol ? 1650\r\n")
            .read(b".\r\n")
            .build();
        let mut conv = Conversation::from_stream(mock, log());

        let received = conv.receive_until(&[Code::END]).await.unwrap().unwrap();
        assert_eq!(received.message.code, Code::END);
        assert_eq!(
            received.text,
            " 1 alice W 1500\n 2 bob B 1800\n 3 carol ? 1650\n.\n"
        );

        let lines: Vec<&str> = received.preceding_lines().collect();
        assert_eq!(lines, vec![" 1 alice W 1500", " 2 bob B 1800", " 3 carol ? 1650"]);
    }

    #[tokio::test]
    async fn test_receive_until_stream_end() {
        let mock = Builder::new().read(b"? move\r\n").build();
        let mut conv = Conversation::from_stream(mock, log());

        assert_eq!(conv.receive_until(&[Code::RESULT]).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_send_uses_line_ending() {
        let mock = Builder::new()
            .write(b"offer W\r\n")
            .write(b"! e4\n")
            .build();
        let mut conv = Conversation::from_stream(mock, log());

        conv.send_line("offer W").await.unwrap();
        conv = conv.with_line_ending(LineEnding::Lf);
        conv.send(&Code::MOVE, "e4").await.unwrap();
    }
}
