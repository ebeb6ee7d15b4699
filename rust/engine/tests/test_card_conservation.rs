//! Drives matches with arbitrary (mostly illegal) action streams and checks
//! that every card stays accounted for and rejected actions change nothing.

use cribbage_engine::cards::Card;
use cribbage_engine::config::MatchConfig;
use cribbage_engine::game::{Command, MatchEngine};
use proptest::prelude::*;

const SEATS: [&str; 3] = ["p1", "p2", "p3"];

fn command_strategy() -> impl Strategy<Value = (usize, Command)> {
    let command = prop_oneof![
        Just(Command::Join),
        Just(Command::Leave),
        Just(Command::Ready),
        Just(Command::Start),
        proptest::option::of(0usize..60).prop_map(|index| Command::CutForDealer { index }),
        Just(Command::NewHand),
        (0u8..52).prop_map(|id| Command::ThrowToCrib {
            card: Card::new(id).unwrap()
        }),
        proptest::option::of(0usize..60).prop_map(|index| Command::CutForHand { index }),
    ];
    (0usize..SEATS.len(), command)
}

proptest! {
    #[test]
    fn cards_are_conserved_and_rejections_are_atomic(
        seed in any::<u64>(),
        commands in proptest::collection::vec(command_strategy(), 1..200),
    ) {
        let mut game = MatchEngine::with_config("prop", MatchConfig::default().with_seed(seed)).unwrap();
        for (seat, command) in commands {
            let before = game.snapshot();
            let history = game.history().len();
            match game.apply(SEATS[seat], command) {
                Ok(_) => prop_assert_eq!(game.history().len(), history + 1),
                Err(_) => {
                    prop_assert_eq!(game.snapshot(), before);
                    prop_assert_eq!(game.history().len(), history);
                }
            }
            prop_assert!(game.check_conservation());
            prop_assert!(game.crib().len() <= game.config().crib_size());
            for p in game.players() {
                prop_assert!(p.hand().len() <= game.cards_per_hand());
            }
        }
    }
}

#[test]
fn scripted_match_conserves_cards_at_every_step() {
    let mut game = MatchEngine::with_config("s", MatchConfig::default().with_seed(31)).unwrap();
    let mut steps = vec![
        ("p1", Command::Join),
        ("p2", Command::Join),
        ("p1", Command::Ready),
        ("p2", Command::Ready),
        ("p1", Command::Start),
    ];
    for (player, command) in steps.drain(..) {
        game.apply(player, command).unwrap();
        assert!(game.check_conservation());
    }
    while game.next_dealer().is_none() {
        for player in ["p1", "p2"] {
            if game.player_cut(player).is_none() && game.next_dealer().is_none() {
                game.apply(player, Command::CutForDealer { index: None }).unwrap();
                assert!(game.check_conservation());
            }
        }
    }
    game.apply("p1", Command::NewHand).unwrap();
    assert!(game.check_conservation());
    for player in ["p1", "p2", "p1", "p2"] {
        let card = game.hand(player).unwrap()[0];
        game.apply(player, Command::ThrowToCrib { card }).unwrap();
        assert!(game.check_conservation());
    }
    let cutter = game.next_dealer().cloned().unwrap();
    game.apply(cutter, Command::CutForHand { index: None }).unwrap();
    assert!(game.check_conservation());
    assert_eq!(game.history().len(), 5 + 2 + 1 + 4 + 1 + game.burned().len());
}
