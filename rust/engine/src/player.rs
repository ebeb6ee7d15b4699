use crate::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque player identifier handed to the engine by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle of a seat: joined the lobby, readied up, then seated in a running game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Joined but not ready
    Joined,
    /// Ready for the game to start
    Ready,
    /// Playing in a started game
    InGame,
}

/// Represents a seated player with their status, current hand and cut-for-dealer card.
/// Seat order is the order in which players joined.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    status: PlayerStatus,
    hand: Vec<Card>,
    cut: Option<Card>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            status: PlayerStatus::Joined,
            hand: Vec::new(),
            cut: None,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    pub fn holds(&self, c: Card) -> bool {
        self.hand.contains(&c)
    }

    /// Removes `c` from the hand, keeping the order of the remaining cards.
    pub fn take_card(&mut self, c: Card) -> Option<Card> {
        let pos = self.hand.iter().position(|&h| h == c)?;
        Some(self.hand.remove(pos))
    }

    pub fn clear_cards(&mut self) {
        self.hand.clear();
    }

    pub fn cut(&self) -> Option<Card> {
        self.cut
    }
    pub fn record_cut(&mut self, c: Card) {
        self.cut = Some(c);
    }
    pub fn clear_cut(&mut self) -> Option<Card> {
        self.cut.take()
    }
}
