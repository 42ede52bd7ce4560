//! # skirmish-player
//!
//! Move sources and the game loop that relays between them.
//!
//! This crate provides:
//! - `Player` trait hiding whether moves come from a terminal, a process or a server
//! - `IoPlayer` for any coded-line stream, `Terminal` for standard in/out
//! - `ProcessPlayer` for a spawned engine
//! - `play_game`, the alternating-turn loop

pub mod game;
pub mod io;
pub mod player;
pub mod process;

pub use game::play_game;
pub use io::{IoPlayer, Terminal, TerminalPlayer};
pub use player::{Player, Reply};
pub use process::ProcessPlayer;
