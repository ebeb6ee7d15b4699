use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CardError;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Number of ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

/// Represents one of the four suits in a standard 52-card deck.
/// The declaration order is the canonical suit index used by [`Card`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣), cards 0..=12
    Clubs,
    /// Hearts suit (♥), cards 13..=25
    Hearts,
    /// Spades suit (♠), cards 26..=38
    Spades,
    /// Diamonds suit (♦), cards 39..=51
    Diamonds,
}

impl Suit {
    pub fn from_index(v: u8) -> Suit {
        match v {
            0 => Suit::Clubs,
            1 => Suit::Hearts,
            2 => Suit::Spades,
            _ => Suit::Diamonds,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
        }
    }
}

/// Represents the rank (face value) of a playing card from Ace through King.
/// Ranks ascend from Ace (0) to King (12); the lowest rank wins the cut for dealer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (0), always low in cribbage
    Ace = 0,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (10)
    Jack,
    /// Queen (11)
    Queen,
    /// King (12)
    King,
}

impl Rank {
    pub fn from_u8(v: u8) -> Rank {
        match v {
            0 => Rank::Ace,
            1 => Rank::Two,
            2 => Rank::Three,
            3 => Rank::Four,
            4 => Rank::Five,
            5 => Rank::Six,
            6 => Rank::Seven,
            7 => Rank::Eight,
            8 => Rank::Nine,
            9 => Rank::Ten,
            10 => Rank::Jack,
            11 => Rank::Queen,
            _ => Rank::King,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// Counting value used when pegging: Ace is 1, face cards are 10.
    pub fn pip_value(self) -> u8 {
        (self.value() + 1).min(10)
    }
}

/// A single playing card, carried on the wire as its plain integer id (0..=51).
///
/// `rank = id % 13` and `suit = id / 13`. Cards never change identity; they only
/// move between the deck, hands, the crib and the cut piles.
///
/// ```
/// use cribbage_engine::cards::{Card, Rank, Suit};
///
/// let card = Card::new(13).unwrap();
/// assert_eq!(card.rank(), Rank::Ace);
/// assert_eq!(card.suit(), Suit::Hearts);
/// assert_eq!(card.to_string(), "AH");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub fn new(id: u8) -> Result<Self, CardError> {
        if usize::from(id) < DECK_SIZE {
            Ok(Card(id))
        } else {
            Err(CardError::OutOfRange(id))
        }
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::from_u8(self.0 % RANKS_PER_SUIT)
    }

    pub fn suit(self) -> Suit {
        Suit::from_index(self.0 / RANKS_PER_SUIT)
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::new(id)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().symbol())
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// The canonical ascending sequence 0..=51.
pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE as u8).map(Card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rank_has_a_distinct_symbol() {
        let symbols: std::collections::HashSet<char> =
            all_ranks().iter().map(|r| r.symbol()).collect();
        assert_eq!(symbols.len(), 13);
    }

    #[test]
    fn rank_and_suit_follow_integer_layout() {
        let king_of_diamonds = Card::new(51).unwrap();
        assert_eq!(king_of_diamonds.rank(), Rank::King);
        assert_eq!(king_of_diamonds.suit(), Suit::Diamonds);

        let ten_of_spades = Card::new(2 * 13 + 9).unwrap();
        assert_eq!(ten_of_spades.to_string(), "TS");
    }

    #[test]
    fn full_deck_matches_suit_rank_grid() {
        let deck = full_deck();
        let mut i = 0;
        for &s in &all_suits() {
            for &r in &all_ranks() {
                assert_eq!(deck[i].suit(), s);
                assert_eq!(deck[i].rank(), r);
                i += 1;
            }
        }
    }

    #[test]
    fn rejects_ids_past_the_deck() {
        assert_eq!(Card::new(52), Err(CardError::OutOfRange(52)));
        assert!(serde_json::from_str::<Card>("60").is_err());
        assert_eq!(serde_json::to_string(&Card::new(7).unwrap()).unwrap(), "7");
    }

    #[test]
    fn pip_values_cap_at_ten() {
        assert_eq!(Rank::Ace.pip_value(), 1);
        assert_eq!(Rank::Nine.pip_value(), 9);
        assert_eq!(Rank::Ten.pip_value(), 10);
        assert_eq!(Rank::King.pip_value(), 10);
    }
}
