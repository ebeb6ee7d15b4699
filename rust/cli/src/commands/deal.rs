//! Deal command: settle the dealer and deal a single hand for inspection.

use crate::config;
use crate::driver;
use crate::error::CliError;
use crate::ui::format_cards;
use cribbage_engine::game::MatchEngine;
use std::io::Write;

/// Seats a full table, cuts for dealer and deals one hand. With a seed the
/// output is reproducible.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut engine = MatchEngine::with_config("deal", cfg.match_config(Some(base_seed)))?;
    driver::seat_and_start(&mut engine)?;
    driver::cut_until_dealer(&mut engine)?;
    engine.new_hand()?;

    let dealer = engine
        .current_dealer()
        .map(|d| d.to_string())
        .unwrap_or_default();
    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Dealer: {}", dealer)?;
    for p in engine.players() {
        writeln!(out, "Hand {}: {}", p.id(), format_cards(p.hand()))?;
    }
    writeln!(out, "Deck: {} cards", engine.deck().size())?;
    Ok(())
}
