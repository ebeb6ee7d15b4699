//! Random number generator inspection.
//!
//! Prints the first values of the ChaCha20 stream for a seed together with
//! the deck order a fresh seeded [`Deck`] shuffles to, so a seed can be
//! checked against recorded matches.

use crate::error::CliError;
use crate::ui::format_cards;
use cribbage_engine::deck::Deck;
use rand::{RngCore, SeedableRng};
use std::io::Write;

const PREVIEW_CARDS: usize = 13;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let vals: Vec<u64> = (0..5).map(|_| rng.next_u64()).collect();
    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;

    let mut deck = Deck::new_with_seed(s);
    deck.shuffle();
    let top = &deck.cards()[..PREVIEW_CARDS.min(deck.size())];
    writeln!(out, "Shuffled top: {}", format_cards(top))?;
    Ok(())
}
