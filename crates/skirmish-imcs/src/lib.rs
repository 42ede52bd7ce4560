//! IMCS client and player resolution
//!
//! This crate provides:
//! - `ImcsClient`: connect, version check, login/register, list, offer, accept
//! - `ServerPlayer`: a `Player` backed by an IMCS game in progress
//! - `PlayerSpec`: parsing of `-`, `run CMD` and `imcs://` descriptors
//! - `resolve_players`: turning two descriptors into two players

pub mod client;
pub mod config;
pub mod descriptor;
pub mod listing;
pub mod rating;
pub mod resolve;
pub mod revision;
pub mod server_player;

pub use client::ImcsClient;
pub use config::{DEFAULT_IMCS_PORT, ImcsConfig};
pub use descriptor::{AcceptQuery, ImcsPath, ImcsUrl, PlayerSpec};
pub use listing::{Clocks, GameListing};
pub use rating::RatingFilter;
pub use resolve::{resolve_local, resolve_players, resolve_remote, start_game};
pub use revision::Revision;
pub use server_player::ServerPlayer;
