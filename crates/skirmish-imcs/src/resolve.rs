//! Turning descriptors into players
//!
//! Remote descriptors are resolved before local ones so that any server
//! handshake completes before local engines are started.

use crate::client::ImcsClient;
use crate::config::ImcsConfig;
use crate::server_player::ServerPlayer;
use crate::descriptor::{ImcsPath, ImcsUrl, PlayerSpec};
use skirmish_core::{Color, LogContext, Result, SkirmishError};
use skirmish_player::{Player, ProcessPlayer, Terminal};
use tracing::info;

/// Resolve both sides of a game, remote descriptors first.
///
/// `-` descriptors become players on `terminal`.
pub async fn resolve_players(
    white: &PlayerSpec,
    black: &PlayerSpec,
    config: &ImcsConfig,
    terminal: &Terminal,
    log: &LogContext,
) -> Result<(Box<dyn Player>, Box<dyn Player>)> {
    let mut white_player: Option<Box<dyn Player>> = None;
    let mut black_player: Option<Box<dyn Player>> = None;

    for (color, spec, slot) in [
        (Color::White, white, &mut white_player),
        (Color::Black, black, &mut black_player),
    ] {
        if let PlayerSpec::Remote(url) = spec {
            *slot = Some(Box::new(resolve_remote(color, url, config, log).await?));
        }
    }

    for (spec, slot) in [(white, &mut white_player), (black, &mut black_player)] {
        if slot.is_none() {
            *slot = Some(resolve_local(spec, terminal, log)?);
        }
    }

    match (white_player, black_player) {
        (Some(white), Some(black)) => Ok((white, black)),
        _ => Err(SkirmishError::InvalidUrl("unresolved player descriptor".into())),
    }
}

/// Build a terminal or process player
pub fn resolve_local(spec: &PlayerSpec, terminal: &Terminal, log: &LogContext) -> Result<Box<dyn Player>> {
    match spec {
        PlayerSpec::Terminal => Ok(Box::new(terminal.player())),
        PlayerSpec::Process(command) => Ok(Box::new(ProcessPlayer::spawn(command, log)?)),
        PlayerSpec::Remote(_) => Err(SkirmishError::InvalidUrl(
            "remote descriptor passed to local resolution".into(),
        )),
    }
}

/// Connect to the server named by `url` and start a game in which the
/// remote side plays `color`.
pub async fn resolve_remote(
    color: Color,
    url: &ImcsUrl,
    config: &ImcsConfig,
    log: &LogContext,
) -> Result<ServerPlayer> {
    let port = url.port.unwrap_or(config.port);
    let mut client = ImcsClient::connect(&url.host, port, config, log).await?;

    if let Some(username) = &url.username {
        client
            .login(username, url.password.as_deref().unwrap_or(""))
            .await?;
    }

    start_game(client, color, &url.path).await
}

/// Offer or accept a game on a connected client.
///
/// This client plays the opposite of `color`, so that both ends of the
/// relay meet on opposite colors of the same game.
pub async fn start_game(mut client: ImcsClient, color: Color, path: &ImcsPath) -> Result<ServerPlayer> {
    let own_color = color.invert();

    let query = match path {
        ImcsPath::Offer => return client.offer(own_color).await,
        ImcsPath::Accept(query) => query,
    };

    if let Some(id) = query.id {
        return client.accept(id, own_color).await;
    }

    let games = client.list_games().await?;
    info!(section = %client.name(), "{} open games listed", games.len());

    match query.find_match(&games, color) {
        Some(game) => {
            let id = game.id;
            client.accept(id, own_color).await
        }
        None => {
            client.disconnect().await?;
            Err(SkirmishError::GameNotFound(
                "no open game matches the requested constraints".into(),
            ))
        }
    }
}
