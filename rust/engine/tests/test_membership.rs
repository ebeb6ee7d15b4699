mod helpers;

use cribbage_engine::config::MatchConfig;
use cribbage_engine::errors::MatchError;
use cribbage_engine::game::{MatchEngine, MatchStatus, Phase};
use cribbage_engine::player::PlayerStatus;
use helpers::{P1, P2, P3};

#[test]
fn new_match_starts_empty_and_open() {
    let game = MatchEngine::new("g");
    assert_eq!(game.max_players(), 2);
    assert_eq!(game.cards_per_hand(), 6);
    assert_eq!(game.phase(), Phase::NotStarted);
    assert_eq!(game.status(), MatchStatus::Open);
    assert_eq!(game.deck().size(), 52);
    assert!(game.is_empty());
    assert!(!game.is_full());
    assert!(game.crib().is_empty());
    assert!(game.current_dealer().is_none());
    assert!(game.next_dealer().is_none());
}

#[test]
fn players_join_and_leave() {
    let mut game = MatchEngine::new("g");
    game.join(P1).unwrap();
    assert_eq!(game.player(P1).map(|p| p.status()), Some(PlayerStatus::Joined));
    game.leave(P1).unwrap();
    assert!(game.player(P1).is_none());
    assert!(game.is_empty());
}

#[test]
fn joining_twice_is_rejected() {
    let mut game = MatchEngine::new("g");
    game.join(P1).unwrap();
    let err = game.join(P1).unwrap_err();
    assert_eq!(err.to_string(), format!("Player {} already joined game g", P1));
    assert_eq!(game.players().len(), 1);
}

#[test]
fn third_player_is_rejected_when_full() {
    let mut game = MatchEngine::new("g");
    game.join(P1).unwrap().join(P2).unwrap();
    assert!(game.is_full());
    let err = game.join(P3).unwrap_err();
    assert_eq!(err, MatchError::GameFull { game: "g".into() });
    assert_eq!(err.to_string(), "g is already full");
    assert!(game.player(P3).is_none());
}

#[test]
fn leaving_without_joining_is_rejected() {
    let mut game = MatchEngine::new("g");
    let err = game.leave(P1).unwrap_err();
    assert!(matches!(err, MatchError::NotAMember { .. }));
}

#[test]
fn ready_marks_status_and_is_idempotent() {
    let mut game = MatchEngine::new("g");
    game.join(P1).unwrap();
    game.mark_ready(P1).unwrap();
    assert_eq!(game.player(P1).map(|p| p.status()), Some(PlayerStatus::Ready));
    game.mark_ready(P1).unwrap();
    assert_eq!(game.player(P1).map(|p| p.status()), Some(PlayerStatus::Ready));
}

#[test]
fn ready_without_joining_is_rejected() {
    let mut game = MatchEngine::new("g");
    assert!(matches!(
        game.mark_ready(P1),
        Err(MatchError::NotAMember { .. })
    ));
}

#[test]
fn all_ready_needs_a_full_table() {
    let mut game = MatchEngine::new("g");
    game.join(P1).unwrap().mark_ready(P1).unwrap();
    assert!(!game.all_ready());
    game.join(P2).unwrap();
    assert!(!game.all_ready());
    game.mark_ready(P2).unwrap();
    assert!(game.all_ready());
}

#[test]
fn start_seats_everyone_and_opens_cut_for_dealer() {
    let mut game = helpers::ready_match(1);
    game.start().unwrap();
    assert_eq!(game.phase(), Phase::CutForDealer);
    assert_eq!(game.status(), MatchStatus::InProgress);
    assert!(game
        .players()
        .iter()
        .all(|p| p.status() == PlayerStatus::InGame));
    assert_eq!(game.deck().size(), 52);
}

#[test]
fn start_before_table_is_ready_is_rejected() {
    let mut game = MatchEngine::new("g");
    game.join(P1).unwrap().mark_ready(P1).unwrap();
    assert!(matches!(game.start(), Err(MatchError::NotReady { .. })));
    assert_eq!(game.phase(), Phase::NotStarted);
}

#[test]
fn three_seat_table_accepts_a_third_player() {
    let cfg = MatchConfig {
        max_players: 3,
        cards_per_hand: 5,
        seed: Some(3),
    };
    let mut game = MatchEngine::with_config("g3", cfg).unwrap();
    game.join(P1).unwrap().join(P2).unwrap().join(P3).unwrap();
    assert!(game.is_full());
    assert!(matches!(game.join("p4"), Err(MatchError::GameFull { .. })));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = MatchConfig {
        max_players: 5,
        cards_per_hand: 12,
        seed: None,
    };
    assert!(matches!(
        MatchEngine::with_config("g", cfg),
        Err(MatchError::InvalidConfig(_))
    ));
}
