//! Game loop
//!
//! Drives two players through alternating turns, starting with White, until
//! the player to move reports a result line.

use crate::player::{Player, Reply};
use skirmish_core::{Color, GameResult, LogContext, Result};
use tracing::{info, warn};

/// Play one game between `white` and `black`.
///
/// Returns `Ok(None)` when the player to move closed its stream without
/// producing anything. With `strict`, the other player's own result line is
/// fetched and compared; a mismatch is only a warning and the mover's report
/// decides the game.
pub async fn play_game(
    white: &mut dyn Player,
    black: &mut dyn Player,
    strict: bool,
    log: &LogContext,
) -> Result<Option<GameResult>> {
    let mut current = Color::White;

    loop {
        let (mover, other): (&mut dyn Player, &mut dyn Player) = match current {
            Color::White => (&mut *white, &mut *black),
            Color::Black => (&mut *black, &mut *white),
        };

        info!(section = %log.name(), "Getting move for {}", current.name().to_lowercase());
        let prompt = format!("{} to move.", current);
        let Some(reply) = mover.get_move(&prompt).await? else {
            warn!(section = %log.name(), "Unable to fetch move from {}", mover.name());
            return Ok(None);
        };

        match reply {
            Reply::GameOver(raw) => {
                let result = GameResult::parse(&raw)?;
                if strict {
                    check_agreement(current, &raw, result, other, log).await?;
                }
                info!(section = %log.name(), "{}", result);
                return Ok(Some(result));
            }
            Reply::Move(mv) => {
                info!(
                    section = %log.name(),
                    "Sending move \"{}\" to {}",
                    mv,
                    current.invert().name().to_lowercase()
                );
                other.send_move(&mv).await?;
                current = current.invert();
            }
        }
    }
}

/// Compare the mover's result with the one the other side reports.
///
/// A missing or unreadable report from the other side counts as
/// disagreement.
async fn check_agreement(
    current: Color,
    raw: &str,
    result: GameResult,
    other: &mut dyn Player,
    log: &LogContext,
) -> Result<()> {
    let other_raw = other.get_result().await?;
    let other_result = other_raw
        .as_deref()
        .and_then(|line| GameResult::parse(line).ok());

    if other_result != Some(result) {
        warn!(section = %log.name(), "Player game end states do not agree");
        warn!(section = %log.name(), "\t{}: {:?}", current, raw);
        warn!(
            section = %log.name(),
            "\t{}: {:?}",
            current.invert(),
            other_raw.as_deref().unwrap_or("<no result>")
        );
    }
    Ok(())
}
