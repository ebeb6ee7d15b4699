use serde::Serialize;
use thiserror::Error;

use crate::cards::Card;
use crate::game::Phase;
use crate::player::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Card id {0} is outside 0..=51")]
    OutOfRange(u8),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DeckError {
    #[error("Deck index {index} out of range (size {size})")]
    OutOfRange { index: usize, size: usize },
}

/// Broad error category handed to the transport layer for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Membership,
    Cut,
    Throw,
    CutForHand,
    Range,
    Phase,
    Config,
    Dealing,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MatchError {
    #[error("Player {player} already joined game {game}")]
    AlreadyJoined { player: PlayerId, game: String },
    #[error("{game} is already full")]
    GameFull { game: String },
    #[error("{player} is not a player in game {game}")]
    NotAMember { player: PlayerId, game: String },
    #[error("Game {game} cannot start until every seat is filled and ready")]
    NotReady { game: String },
    #[error("Player {player} has already cut for dealer")]
    AlreadyCut { player: PlayerId },
    #[error("Player {player} has already thrown to the crib")]
    AlreadyThrown { player: PlayerId },
    #[error("Card {card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: Card },
    #[error("Player {player} may not cut the starter")]
    InvalidCutter { player: PlayerId },
    #[error("Action requires phase {expected:?} but game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Dealing failed: {0}")]
    Dealing(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::AlreadyJoined { .. }
            | MatchError::GameFull { .. }
            | MatchError::NotAMember { .. }
            | MatchError::NotReady { .. } => ErrorKind::Membership,
            MatchError::AlreadyCut { .. } => ErrorKind::Cut,
            MatchError::AlreadyThrown { .. } | MatchError::CardNotInHand { .. } => {
                ErrorKind::Throw
            }
            MatchError::InvalidCutter { .. } => ErrorKind::CutForHand,
            MatchError::WrongPhase { .. } => ErrorKind::Phase,
            MatchError::InvalidConfig(_) => ErrorKind::Config,
            MatchError::Dealing(_) => ErrorKind::Dealing,
            MatchError::Deck(_) => ErrorKind::Range,
        }
    }

    /// Only a dealing failure signals a broken engine invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MatchError::Dealing(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegistryError {
    #[error("No game with id {0}")]
    UnknownMatch(String),
    #[error("Connection {0} is not bound to a player")]
    UnknownConnection(String),
    #[error("A game with id {0} already exists")]
    DuplicateMatch(String),
    #[error(transparent)]
    Match(#[from] MatchError),
}
