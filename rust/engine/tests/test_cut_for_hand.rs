mod helpers;

use cribbage_engine::errors::MatchError;
use cribbage_engine::game::Phase;
use helpers::{crib_thrown_match, P3};

#[test]
fn non_dealer_cuts_the_starter() {
    let mut game = crib_thrown_match(5);
    assert!(game.starter().is_none());
    let cutter = game.next_dealer().cloned().unwrap();
    let expected = game.deck().peek(0).unwrap();
    game.cut_for_hand(cutter, 0).unwrap();
    assert_eq!(game.phase(), Phase::Pegging);
    assert_eq!(game.starter(), Some(expected));
    assert_eq!(game.deck().size(), 39);
    assert!(game.check_conservation());
}

#[test]
fn dealer_cannot_cut_the_starter() {
    let mut game = crib_thrown_match(5);
    let dealer = game.current_dealer().cloned().unwrap();
    let err = game.cut_for_hand(dealer, 0).unwrap_err();
    assert!(matches!(err, MatchError::InvalidCutter { .. }));
    assert_eq!(game.phase(), Phase::CutForHand);
    assert_eq!(game.deck().size(), 40);
}

#[test]
fn outsider_cannot_cut_the_starter() {
    let mut game = crib_thrown_match(5);
    assert!(matches!(
        game.cut_for_hand(P3, 0),
        Err(MatchError::NotAMember { .. })
    ));
}

#[test]
fn random_starter_cut_reaches_pegging() {
    let mut game = crib_thrown_match(6);
    let cutter = game.next_dealer().cloned().unwrap();
    game.cut_for_hand_random(cutter).unwrap();
    assert_eq!(game.phase(), Phase::Pegging);
    assert!(game.starter().is_some());
}

#[test]
fn pegging_accepts_no_further_cuts() {
    let mut game = crib_thrown_match(5);
    let cutter = game.next_dealer().cloned().unwrap();
    game.cut_for_hand(cutter.clone(), 0).unwrap();
    assert!(matches!(
        game.cut_for_hand(cutter, 0),
        Err(MatchError::WrongPhase {
            expected: Phase::CutForHand,
            actual: Phase::Pegging
        })
    ));
}

#[test]
fn rejected_random_starter_cut_keeps_the_draw_sequence() {
    let mut touched = crib_thrown_match(6);
    let mut untouched = touched.clone();
    let dealer = touched.current_dealer().cloned().unwrap();
    assert!(matches!(
        touched.cut_for_hand_random(dealer),
        Err(MatchError::InvalidCutter { .. })
    ));
    assert!(matches!(
        touched.cut_for_hand_random(P3),
        Err(MatchError::NotAMember { .. })
    ));

    let cutter = touched.next_dealer().cloned().unwrap();
    touched.cut_for_hand_random(cutter.clone()).unwrap();
    untouched.cut_for_hand_random(cutter).unwrap();
    assert_eq!(touched.starter(), untouched.starter());
    assert_eq!(touched.deck().cards(), untouched.deck().cards());
}
