//! # skirmish-core
//!
//! Core types shared by every skirmish crate.
//!
//! This crate provides:
//! - Player colors and game results
//! - Line codes used by the coded-line protocol
//! - The error enum and result alias
//! - An explicit logging context passed to each component

pub mod code;
pub mod color;
pub mod error;
pub mod log;
pub mod outcome;

pub use code::Code;
pub use color::Color;
pub use error::{Result, SkirmishError};
pub use log::LogContext;
pub use outcome::GameResult;
