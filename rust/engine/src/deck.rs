use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DeckError;

/// Shuffle passes applied by [`Deck::shuffle`].
pub const DEFAULT_SHUFFLE_PASSES: usize = 7;

/// Ordered pile of cards owned by a single match.
///
/// The front of the sequence is index 0. Cards leave the deck only through
/// [`Deck::pull`]; [`Deck::reset`] restores the canonical 52.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        // Keep canonical order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    pub fn shuffle(&mut self) {
        self.shuffle_passes(DEFAULT_SHUFFLE_PASSES);
    }

    /// Fisher–Yates over the current contents, `passes` times.
    pub fn shuffle_passes(&mut self, passes: usize) {
        for _ in 0..passes {
            self.cards.shuffle(&mut self.rng);
        }
    }

    /// Rotate so the card at `index` (mod size) becomes the top card.
    /// `None` picks a uniform random index.
    pub fn cut(&mut self, index: Option<usize>) {
        if self.cards.is_empty() {
            return;
        }
        let index = match index {
            Some(i) => i % self.cards.len(),
            None => self.random_index(),
        };
        self.cards.rotate_left(index);
    }

    pub fn peek(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn pull(&mut self, index: usize) -> Result<Card, DeckError> {
        if index >= self.cards.len() {
            return Err(DeckError::OutOfRange {
                index,
                size: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    /// Uniform index in `[0, size)`; 0 for an empty deck.
    pub fn random_index(&mut self) -> usize {
        if self.cards.is_empty() {
            0
        } else {
            self.rng.random_range(0..self.cards.len())
        }
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
