//! Coded-line protocol engine
//!
//! Every line is `<CODE> <body>`. Numeric codes are server status codes;
//! one-character tags (`?`, `!`, `=`, `.`) mark prompt, move, result and
//! end-of-block lines.
//!
//! This crate provides:
//! - `Message` parsing
//! - `Conversation`, a blocking-style reader/writer over any duplex stream

pub mod conversation;
pub mod message;

pub use conversation::{BoxReader, BoxWriter, Conversation, LineEnding, Received};
pub use message::Message;
pub use skirmish_core::Code;
