//! Scripted players that walk a match from the lobby to pegging.
//!
//! Every accepted action is followed by a card conservation check, so the
//! drivers double as an end-to-end audit of the engine.

use crate::error::CliError;
use cribbage_engine::config::MatchConfig;
use cribbage_engine::game::{MatchEngine, Phase};
use cribbage_engine::player::PlayerId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seat ids used by the drivers: `p1`, `p2`, ...
pub fn seat_ids(count: usize) -> Vec<PlayerId> {
    (1..=count).map(|n| PlayerId::new(format!("p{}", n))).collect()
}

/// Fills every seat, readies everyone and starts the match.
pub fn seat_and_start(engine: &mut MatchEngine) -> Result<(), CliError> {
    let ids = seat_ids(engine.max_players());
    for id in &ids {
        engine.join(id.clone())?;
        audit(engine, "join")?;
    }
    for id in &ids {
        engine.mark_ready(id.clone())?;
        audit(engine, "ready")?;
    }
    engine.start()?;
    audit(engine, "start")
}

/// Cuts at random positions until a dealer is settled.
pub fn cut_until_dealer(engine: &mut MatchEngine) -> Result<(), CliError> {
    let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id().clone()).collect();
    while engine.phase() == Phase::CutForDealer {
        for id in &ids {
            if engine.phase() != Phase::CutForDealer {
                break;
            }
            if engine.player_cut(id.as_str()).is_none() {
                engine.cut_for_dealer_random(id.clone())?;
                audit(engine, "cut_for_dealer")?;
            }
        }
    }
    Ok(())
}

/// Every player throws random cards until the crib is full.
pub fn throw_random(engine: &mut MatchEngine, rng: &mut ChaCha20Rng) -> Result<(), CliError> {
    let kept = engine.config().kept_per_hand();
    let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id().clone()).collect();
    for id in &ids {
        loop {
            let hand = engine.hand(id.as_str()).unwrap_or_default();
            if hand.len() <= kept {
                break;
            }
            let card = hand[rng.random_range(0..hand.len())];
            engine.throw_to_crib(id.clone(), card)?;
            audit(engine, "throw_to_crib")?;
        }
    }
    Ok(())
}

/// Plays one match from an empty table to the hand-off to pegging.
pub fn play_to_pegging(id: &str, config: MatchConfig) -> Result<MatchEngine, CliError> {
    let mut chooser = ChaCha20Rng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
    let mut engine = MatchEngine::with_config(id, config)?;
    seat_and_start(&mut engine)?;
    cut_until_dealer(&mut engine)?;
    engine.new_hand()?;
    audit(&engine, "new_hand")?;
    throw_random(&mut engine, &mut chooser)?;
    let cutter = engine
        .next_dealer()
        .cloned()
        .ok_or_else(|| CliError::Engine("no player to cut the starter".into()))?;
    engine.cut_for_hand_random(cutter)?;
    audit(&engine, "cut_for_hand")?;
    Ok(engine)
}

fn audit(engine: &MatchEngine, after: &str) -> Result<(), CliError> {
    if engine.check_conservation() {
        Ok(())
    } else {
        Err(CliError::Engine(format!(
            "card conservation violated in {} after {}",
            engine.id(),
            after
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_through_to_pegging() {
        let engine = play_to_pegging("m1", MatchConfig::default().with_seed(5)).unwrap();
        assert_eq!(engine.phase(), Phase::Pegging);
        assert!(engine.starter().is_some());
        assert_eq!(engine.crib().len(), 4);
        for p in engine.players() {
            assert_eq!(p.hand().len(), 4);
        }
        assert!(engine.check_conservation());
    }

    #[test]
    fn same_seed_replays_the_same_match() {
        let a = play_to_pegging("m", MatchConfig::default().with_seed(99)).unwrap();
        let b = play_to_pegging("m", MatchConfig::default().with_seed(99)).unwrap();
        assert_eq!(a.match_record(), b.match_record());
    }

    #[test]
    fn three_seat_tables_fill_the_crib() {
        let config = MatchConfig {
            max_players: 3,
            cards_per_hand: 5,
            seed: Some(8),
        };
        let engine = play_to_pegging("m3", config).unwrap();
        assert_eq!(engine.phase(), Phase::Pegging);
        assert_eq!(engine.crib().len(), 6);
    }

    #[test]
    fn seat_ids_are_one_based() {
        let ids = seat_ids(2);
        assert_eq!(ids[0].as_str(), "p1");
        assert_eq!(ids[1].as_str(), "p2");
    }
}
