#![allow(dead_code)]

use cribbage_engine::cards::Card;
use cribbage_engine::config::MatchConfig;
use cribbage_engine::game::{MatchEngine, Phase};

pub const P1: &str = "p1";
pub const P2: &str = "p2";
pub const P3: &str = "p3";

/// Two players joined and ready, not yet started.
pub fn ready_match(seed: u64) -> MatchEngine {
    let mut game = MatchEngine::with_config("test-game", MatchConfig::default().with_seed(seed))
        .expect("default config is valid");
    game.join(P1).unwrap().mark_ready(P1).unwrap();
    game.join(P2).unwrap().mark_ready(P2).unwrap();
    assert!(game.is_full());
    assert!(game.all_ready());
    game
}

/// Started, with the deck back in canonical order so cuts are predictable.
pub fn cutting_match(seed: u64) -> MatchEngine {
    let mut game = ready_match(seed);
    game.start().unwrap();
    game.deck_mut().reset();
    game
}

/// P1 cuts the ace of clubs and P2 the two of clubs, so P1 is next to deal.
pub fn dealer_chosen_match(seed: u64) -> MatchEngine {
    let mut game = cutting_match(seed);
    game.cut_for_dealer(P1, 0).unwrap();
    game.cut_for_dealer(P2, 0).unwrap();
    assert_eq!(game.phase(), Phase::NewHand);
    game
}

pub fn dealt_match(seed: u64) -> MatchEngine {
    let mut game = dealer_chosen_match(seed);
    game.new_hand().unwrap();
    game
}

/// Both players throw their first two cards.
pub fn crib_thrown_match(seed: u64) -> MatchEngine {
    let mut game = dealt_match(seed);
    for player in [P1, P2] {
        for _ in 0..2 {
            let card = first_card(&game, player);
            game.throw_to_crib(player, card).unwrap();
        }
    }
    assert_eq!(game.phase(), Phase::CutForHand);
    game
}

pub fn first_card(game: &MatchEngine, player: &str) -> Card {
    game.hand(player).expect("player has a hand")[0]
}

pub fn card(id: u8) -> Card {
    Card::new(id).unwrap()
}
