use serde::{Deserialize, Serialize};

use crate::cards::DECK_SIZE;
use crate::errors::MatchError;

/// Cards each player throws to the crib.
pub const DISCARDS_PER_PLAYER: usize = 2;

/// Table shape for a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub max_players: usize,
    pub cards_per_hand: usize,
    /// Deck seed; `None` seeds from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_players: 2,
            cards_per_hand: 6,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn discards_per_player(&self) -> usize {
        DISCARDS_PER_PLAYER
    }

    pub fn kept_per_hand(&self) -> usize {
        self.cards_per_hand.saturating_sub(DISCARDS_PER_PLAYER)
    }

    pub fn crib_size(&self) -> usize {
        self.max_players * DISCARDS_PER_PLAYER
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.max_players == 0 {
            return Err(MatchError::InvalidConfig(
                "max_players must be >=1".into(),
            ));
        }
        if self.cards_per_hand <= DISCARDS_PER_PLAYER {
            return Err(MatchError::InvalidConfig(format!(
                "cards_per_hand must be >{}",
                DISCARDS_PER_PLAYER
            )));
        }
        // every hand plus the starter has to come out of one deck
        let needed = self
            .max_players
            .checked_mul(self.cards_per_hand)
            .and_then(|n| n.checked_add(1));
        match needed {
            Some(n) if n <= DECK_SIZE => Ok(()),
            _ => Err(MatchError::InvalidConfig(format!(
                "{} players x {} cards does not fit in a {}-card deck",
                self.max_players, self.cards_per_hand, DECK_SIZE
            ))),
        }
    }
}
