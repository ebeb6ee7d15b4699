//! The match state machine.
//!
//! A [`MatchEngine`] walks a two-player (by default) cribbage match from the
//! lobby through the cut for dealer, the deal and the crib discards, up to the
//! hand-off into pegging:
//!
//! ```text
//! NotStarted -> CutForDealer -> NewHand -> ThrowCrib -> CutForHand -> Pegging
//!                  ^      |
//!                  +------+ tie on the lowest rank
//! ```
//!
//! Every action validates all of its preconditions before touching state, so a
//! rejected call leaves the engine exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::cards::{full_deck, Card};
use crate::config::MatchConfig;
use crate::deck::Deck;
use crate::errors::{DeckError, MatchError};
use crate::logger::{ActionRecord, MatchAction, MatchRecord};
use crate::player::{Player, PlayerId, PlayerStatus};

/// Match phase. `Pegging` is terminal for this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    CutForDealer,
    NewHand,
    ThrowCrib,
    CutForHand,
    Pegging,
}

/// Coarse lobby status shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Open,
    InProgress,
}

/// One client action, as decoded by the transport layer.
///
/// `index: None` asks the engine to pick a uniform random deck position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Join,
    Leave,
    Ready,
    Start,
    CutForDealer {
        #[serde(default)]
        index: Option<usize>,
    },
    NewHand,
    ThrowToCrib {
        card: Card,
    },
    CutForHand {
        #[serde(default)]
        index: Option<usize>,
    },
}

/// Server-authoritative state of a single match.
///
/// # Examples
///
/// ```
/// use cribbage_engine::game::{MatchEngine, Phase};
///
/// let mut game = MatchEngine::new("g1");
/// game.join("alice")?.join("bob")?;
/// game.mark_ready("alice")?.mark_ready("bob")?;
/// game.start()?;
/// assert_eq!(game.phase(), Phase::CutForDealer);
///
/// // canonical order: the ace of clubs is on top, and once it is pulled the
/// // two of clubs takes its place at index 0
/// game.deck_mut().reset();
/// game.cut_for_dealer("alice", 0)?;
/// game.cut_for_dealer("bob", 0)?;
/// assert_eq!(game.next_dealer().map(|p| p.as_str()), Some("alice"));
///
/// game.new_hand()?;
/// assert_eq!(game.deck().size(), 40);
/// # Ok::<(), cribbage_engine::errors::MatchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MatchEngine {
    id: String,
    config: MatchConfig,
    status: MatchStatus,
    phase: Phase,
    deck: Deck,
    /// Seats in join order
    players: Vec<Player>,
    crib: Vec<Card>,
    /// Cut-for-dealer cards cleared by a tie; they never return to the deck
    burned: Vec<Card>,
    starter: Option<Card>,
    current_dealer: Option<PlayerId>,
    next_dealer: Option<PlayerId>,
    history: Vec<ActionRecord>,
}

impl MatchEngine {
    /// New match with the default table (two players, six cards each).
    pub fn new(id: impl Into<String>) -> Self {
        let config = MatchConfig::default();
        Self::build(id.into(), config)
    }

    pub fn with_config(id: impl Into<String>, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self::build(id.into(), config))
    }

    fn build(id: String, config: MatchConfig) -> Self {
        let deck = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new(),
        };
        Self {
            id,
            config,
            status: MatchStatus::Open,
            phase: Phase::NotStarted,
            deck,
            players: Vec::with_capacity(config.max_players),
            crib: Vec::with_capacity(config.crib_size()),
            burned: Vec::new(),
            starter: None,
            current_dealer: None,
            next_dealer: None,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
    pub fn max_players(&self) -> usize {
        self.config.max_players
    }
    pub fn cards_per_hand(&self) -> usize {
        self.config.cards_per_hand
    }
    pub fn status(&self) -> MatchStatus {
        self.status
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    /// Direct deck access for table setup and tests. Pulling cards through this
    /// handle bypasses the engine's card accounting.
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id().as_str() == id)
    }
    pub fn hand(&self, id: &str) -> Option<&[Card]> {
        self.player(id).map(Player::hand)
    }
    pub fn player_cut(&self, id: &str) -> Option<Card> {
        self.player(id).and_then(Player::cut)
    }

    pub fn crib(&self) -> &[Card] {
        &self.crib
    }
    pub fn burned(&self) -> &[Card] {
        &self.burned
    }
    pub fn starter(&self) -> Option<Card> {
        self.starter
    }
    pub fn current_dealer(&self) -> Option<&PlayerId> {
        self.current_dealer.as_ref()
    }
    pub fn next_dealer(&self) -> Option<&PlayerId> {
        self.next_dealer.as_ref()
    }
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    pub fn is_full(&self) -> bool {
        self.players.len() == self.config.max_players
    }
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
    pub fn all_ready(&self) -> bool {
        self.is_full()
            && self
                .players
                .iter()
                .all(|p| p.status() == PlayerStatus::Ready)
    }

    // ---- membership -------------------------------------------------------

    pub fn join(&mut self, player: impl Into<PlayerId>) -> Result<&mut Self, MatchError> {
        let player = player.into();
        self.check_join(&player)
            .map_err(|e| self.rejected("join", Some(&player), e))?;
        self.players.push(Player::new(player.clone()));
        self.log_action(Some(player), MatchAction::Join);
        Ok(self)
    }

    fn check_join(&self, player: &PlayerId) -> Result<(), MatchError> {
        self.expect_phase(Phase::NotStarted)?;
        if self.seat_of(player).is_some() {
            return Err(MatchError::AlreadyJoined {
                player: player.clone(),
                game: self.id.clone(),
            });
        }
        if self.players.len() >= self.config.max_players {
            return Err(MatchError::GameFull {
                game: self.id.clone(),
            });
        }
        Ok(())
    }

    pub fn leave(&mut self, player: impl Into<PlayerId>) -> Result<&mut Self, MatchError> {
        let player = player.into();
        let seat = self
            .expect_phase(Phase::NotStarted)
            .and_then(|_| self.member_seat(&player))
            .map_err(|e| self.rejected("leave", Some(&player), e))?;
        self.players.remove(seat);
        self.log_action(Some(player), MatchAction::Leave);
        Ok(self)
    }

    /// Marks the player ready. Readying twice is accepted and changes nothing.
    pub fn mark_ready(&mut self, player: impl Into<PlayerId>) -> Result<&mut Self, MatchError> {
        let player = player.into();
        let seat = self
            .expect_phase(Phase::NotStarted)
            .and_then(|_| self.member_seat(&player))
            .map_err(|e| self.rejected("ready", Some(&player), e))?;
        self.players[seat].set_status(PlayerStatus::Ready);
        self.log_action(Some(player), MatchAction::Ready);
        Ok(self)
    }

    // ---- transitions ------------------------------------------------------

    /// Seats everyone, shuffles and opens the cut for dealer.
    pub fn start(&mut self) -> Result<&mut Self, MatchError> {
        self.expect_phase(Phase::NotStarted)
            .and_then(|_| {
                if self.all_ready() {
                    Ok(())
                } else {
                    Err(MatchError::NotReady {
                        game: self.id.clone(),
                    })
                }
            })
            .map_err(|e| self.rejected("start", None, e))?;
        for p in &mut self.players {
            p.set_status(PlayerStatus::InGame);
        }
        self.deck.shuffle();
        self.status = MatchStatus::InProgress;
        self.log_action(None, MatchAction::Start);
        self.set_phase(Phase::CutForDealer);
        Ok(self)
    }

    /// Draws the card at `index` as the player's cut for dealer, then settles
    /// the dealer once every seat has a cut. The lowest rank deals; players tied
    /// on the lowest rank lose their cuts (the cards are burned) and cut again.
    pub fn cut_for_dealer(
        &mut self,
        player: impl Into<PlayerId>,
        index: usize,
    ) -> Result<&mut Self, MatchError> {
        let player = player.into();
        let seat = self
            .check_cut_for_dealer(&player, Some(index))
            .map_err(|e| self.rejected("cut_for_dealer", Some(&player), e))?;
        let card = self.deck.pull(index)?;
        self.players[seat].record_cut(card);
        debug!(game = %self.id, player = %player, %card, "cut for dealer");
        self.log_action(Some(player), MatchAction::CutForDealer { card });
        self.settle_dealer();
        Ok(self)
    }

    /// Like [`cut_for_dealer`](Self::cut_for_dealer) at a uniform random
    /// index. The index is only drawn once the cut is known to be legal, so a
    /// rejected call leaves the deck RNG untouched.
    pub fn cut_for_dealer_random(
        &mut self,
        player: impl Into<PlayerId>,
    ) -> Result<&mut Self, MatchError> {
        let player = player.into();
        self.check_cut_for_dealer(&player, None)
            .map_err(|e| self.rejected("cut_for_dealer", Some(&player), e))?;
        let index = self.deck.random_index();
        self.cut_for_dealer(player, index)
    }

    fn check_cut_for_dealer(
        &self,
        player: &PlayerId,
        index: Option<usize>,
    ) -> Result<usize, MatchError> {
        self.expect_phase(Phase::CutForDealer)?;
        if let Some(seat) = self.seat_of(player) {
            if self.players[seat].cut().is_some() {
                return Err(MatchError::AlreadyCut {
                    player: player.clone(),
                });
            }
        }
        let seat = self.member_seat(player)?;
        if let Some(index) = index {
            self.check_index(index)?;
        }
        Ok(seat)
    }

    fn settle_dealer(&mut self) {
        let cuts: Option<Vec<Card>> = self.players.iter().map(Player::cut).collect();
        let Some(cuts) = cuts else {
            return;
        };
        let Some(lowest) = cuts.iter().map(|c| c.rank()).min() else {
            return;
        };
        let tied: Vec<usize> = cuts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.rank() == lowest)
            .map(|(seat, _)| seat)
            .collect();

        if let [winner] = tied[..] {
            let dealer = self.players[winner].id().clone();
            info!(game = %self.id, dealer = %dealer, rank = ?lowest, "dealer chosen");
            self.next_dealer = Some(dealer);
            self.set_phase(Phase::NewHand);
        } else {
            for &seat in &tied {
                if let Some(card) = self.players[seat].clear_cut() {
                    self.burned.push(card);
                }
            }
            info!(
                game = %self.id,
                tied = tied.len(),
                rank = ?lowest,
                "tie on the cut for dealer, tied players cut again"
            );
        }
    }

    /// Rotates the dealer, rebuilds and shuffles the deck and deals every seat
    /// `cards_per_hand` cards, one at a time starting left of the dealer.
    pub fn new_hand(&mut self) -> Result<&mut Self, MatchError> {
        let dealer_seat = self
            .check_new_hand()
            .map_err(|e| self.rejected("new_hand", None, e))?;
        let seats = self.players.len();

        self.crib.clear();
        self.burned.clear();
        self.starter = None;
        for p in &mut self.players {
            p.clear_cards();
            p.clear_cut();
        }

        let dealer = self.players[dealer_seat].id().clone();
        self.next_dealer = Some(self.players[(dealer_seat + 1) % seats].id().clone());
        self.current_dealer = Some(dealer.clone());

        self.deck.reset();
        self.deck.shuffle();
        self.deal(dealer_seat)?;

        info!(
            game = %self.id,
            dealer = %dealer,
            deck = self.deck.size(),
            "hand dealt"
        );
        self.log_action(None, MatchAction::NewHand { dealer });
        self.set_phase(Phase::ThrowCrib);
        Ok(self)
    }

    fn check_new_hand(&self) -> Result<usize, MatchError> {
        self.expect_phase(Phase::NewHand)?;
        let next = self
            .next_dealer
            .as_ref()
            .ok_or_else(|| MatchError::Dealing("no dealer has been chosen".into()))?;
        self.seat_of(next)
            .ok_or_else(|| MatchError::Dealing(format!("dealer {} has no seat", next)))
    }

    fn deal(&mut self, dealer_seat: usize) -> Result<(), MatchError> {
        let seats = self.players.len();
        let per_hand = self.config.cards_per_hand;
        let mut seat = dealer_seat + 1;
        while self.players.iter().any(|p| p.hand().len() < per_hand) {
            let Some(player) = self.players.get_mut(seat % seats) else {
                error!(game = %self.id, seat, "seat lookup failed while dealing");
                return Err(MatchError::Dealing(format!("no player at seat {}", seat % seats)));
            };
            if player.hand().len() < per_hand {
                let card = self.deck.pull(0).map_err(|e: DeckError| {
                    error!(game = %self.id, error = %e, "deck ran out while dealing");
                    MatchError::Dealing(e.to_string())
                })?;
                player.give_card(card);
            }
            seat += 1;
        }
        Ok(())
    }

    /// Moves `card` from the player's hand to the crib. Once every hand is down
    /// to the kept size the match moves on to the starter cut.
    pub fn throw_to_crib(
        &mut self,
        player: impl Into<PlayerId>,
        card: Card,
    ) -> Result<&mut Self, MatchError> {
        let player = player.into();
        let seat = self
            .check_throw(&player, card)
            .map_err(|e| self.rejected("throw_to_crib", Some(&player), e))?;
        if let Some(card) = self.players[seat].take_card(card) {
            self.crib.push(card);
        }
        debug!(game = %self.id, player = %player, %card, crib = self.crib.len(), "thrown to crib");
        self.log_action(Some(player), MatchAction::ThrowToCrib { card });

        let kept = self.config.kept_per_hand();
        if self.players.iter().all(|p| p.hand().len() == kept) {
            self.set_phase(Phase::CutForHand);
        }
        Ok(self)
    }

    fn check_throw(&self, player: &PlayerId, card: Card) -> Result<usize, MatchError> {
        self.expect_phase(Phase::ThrowCrib)?;
        let seat = self.member_seat(player)?;
        let seated = &self.players[seat];
        if seated.hand().len() <= self.config.kept_per_hand() {
            return Err(MatchError::AlreadyThrown {
                player: player.clone(),
            });
        }
        if !seated.holds(card) {
            return Err(MatchError::CardNotInHand {
                player: player.clone(),
                card,
            });
        }
        Ok(seat)
    }

    /// The pone (the player after the dealer) cuts the starter from `index`.
    pub fn cut_for_hand(
        &mut self,
        player: impl Into<PlayerId>,
        index: usize,
    ) -> Result<&mut Self, MatchError> {
        let player = player.into();
        self.check_cut_for_hand(&player, Some(index))
            .map_err(|e| self.rejected("cut_for_hand", Some(&player), e))?;
        let card = self.deck.pull(index)?;
        self.starter = Some(card);
        info!(game = %self.id, player = %player, starter = %card, "starter cut");
        self.log_action(Some(player), MatchAction::CutForHand { card });
        self.set_phase(Phase::Pegging);
        Ok(self)
    }

    pub fn cut_for_hand_random(
        &mut self,
        player: impl Into<PlayerId>,
    ) -> Result<&mut Self, MatchError> {
        let player = player.into();
        self.check_cut_for_hand(&player, None)
            .map_err(|e| self.rejected("cut_for_hand", Some(&player), e))?;
        let index = self.deck.random_index();
        self.cut_for_hand(player, index)
    }

    fn check_cut_for_hand(&self, player: &PlayerId, index: Option<usize>) -> Result<(), MatchError> {
        self.expect_phase(Phase::CutForHand)?;
        self.member_seat(player)?;
        if self.next_dealer.as_ref() != Some(player) {
            return Err(MatchError::InvalidCutter {
                player: player.clone(),
            });
        }
        match index {
            Some(index) => self.check_index(index),
            None => Ok(()),
        }
    }

    /// Single entry point for the transport layer: one decoded client action.
    pub fn apply(
        &mut self,
        player: impl Into<PlayerId>,
        command: Command,
    ) -> Result<&mut Self, MatchError> {
        let player = player.into();
        match command {
            Command::Join => self.join(player),
            Command::Leave => self.leave(player),
            Command::Ready => self.mark_ready(player),
            Command::Start => self.start(),
            Command::CutForDealer { index: Some(i) } => self.cut_for_dealer(player, i),
            Command::CutForDealer { index: None } => self.cut_for_dealer_random(player),
            Command::NewHand => self.new_hand(),
            Command::ThrowToCrib { card } => self.throw_to_crib(player, card),
            Command::CutForHand { index: Some(i) } => self.cut_for_hand(player, i),
            Command::CutForHand { index: None } => self.cut_for_hand_random(player),
        }
    }

    // ---- views ------------------------------------------------------------

    /// Full server-side view, including every hand and the deck order.
    pub fn snapshot(&self) -> MatchSnapshot {
        self.build_snapshot(None)
    }

    /// View for one client: only the viewer's own hand is revealed, the crib
    /// and the deck are reduced to counts.
    pub fn snapshot_for(&self, viewer: &str) -> MatchSnapshot {
        self.build_snapshot(Some(viewer))
    }

    fn build_snapshot(&self, viewer: Option<&str>) -> MatchSnapshot {
        let reveal = |id: &PlayerId| viewer.is_none_or(|v| v == id.as_str());
        MatchSnapshot {
            id: self.id.clone(),
            status: self.status,
            phase: self.phase,
            max_players: self.config.max_players,
            cards_per_hand: self.config.cards_per_hand,
            players: self
                .players
                .iter()
                .map(|p| SeatView {
                    id: p.id().clone(),
                    status: p.status(),
                    hand_size: p.hand().len(),
                    hand: reveal(p.id()).then(|| p.hand().to_vec()),
                    cut: p.cut(),
                })
                .collect(),
            crib_size: self.crib.len(),
            crib: viewer.is_none().then(|| self.crib.clone()),
            deck_size: self.deck.size(),
            deck: viewer.is_none().then(|| self.deck.cards().to_vec()),
            burned: self.burned.clone(),
            starter: self.starter,
            current_dealer: self.current_dealer.clone(),
            next_dealer: self.next_dealer.clone(),
        }
    }

    /// Every card the engine is tracking, in no particular order.
    pub fn accounted_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.cards().to_vec();
        for p in &self.players {
            cards.extend_from_slice(p.hand());
            cards.extend(p.cut());
        }
        cards.extend_from_slice(&self.crib);
        cards.extend_from_slice(&self.burned);
        cards.extend(self.starter);
        cards
    }

    /// True when deck, hands, crib, cuts, burned cards and starter partition
    /// the 52 canonical cards exactly.
    pub fn check_conservation(&self) -> bool {
        let mut cards = self.accounted_cards();
        cards.sort();
        cards == full_deck()
    }

    pub fn match_record(&self) -> MatchRecord {
        MatchRecord {
            match_id: self.id.clone(),
            seed: self.config.seed,
            actions: self.history.clone(),
            dealer: self.current_dealer.clone(),
            starter: self.starter,
            crib: self.crib.clone(),
            ts: None,
            meta: None,
        }
    }

    // ---- helpers ----------------------------------------------------------

    fn seat_of(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == player)
    }

    fn member_seat(&self, player: &PlayerId) -> Result<usize, MatchError> {
        self.seat_of(player).ok_or_else(|| MatchError::NotAMember {
            player: player.clone(),
            game: self.id.clone(),
        })
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), MatchError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(MatchError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<(), MatchError> {
        if index < self.deck.size() {
            Ok(())
        } else {
            Err(DeckError::OutOfRange {
                index,
                size: self.deck.size(),
            }
            .into())
        }
    }

    fn set_phase(&mut self, next: Phase) {
        info!(game = %self.id, from = ?self.phase, to = ?next, "phase change");
        self.phase = next;
    }

    fn log_action(&mut self, player: Option<PlayerId>, action: MatchAction) {
        let seq = u32::try_from(self.history.len() + 1).unwrap_or(u32::MAX);
        debug!(game = %self.id, seq, player = ?player, action = ?action, "action accepted");
        self.history.push(ActionRecord {
            seq,
            player,
            phase: self.phase,
            action,
        });
    }

    fn rejected(&self, action: &str, player: Option<&PlayerId>, err: MatchError) -> MatchError {
        warn!(
            game = %self.id,
            action,
            player = ?player.map(PlayerId::as_str),
            kind = ?err.kind(),
            error = %err,
            "action rejected"
        );
        err
    }
}

/// Serializable view of a match pushed to clients after every accepted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: String,
    pub status: MatchStatus,
    pub phase: Phase,
    pub max_players: usize,
    pub cards_per_hand: usize,
    pub players: Vec<SeatView>,
    pub crib_size: usize,
    /// `None` when hidden from the viewer
    pub crib: Option<Vec<Card>>,
    pub deck_size: usize,
    /// `None` when hidden from the viewer
    pub deck: Option<Vec<Card>>,
    pub burned: Vec<Card>,
    pub starter: Option<Card>,
    pub current_dealer: Option<PlayerId>,
    pub next_dealer: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub status: PlayerStatus,
    pub hand_size: usize,
    pub hand: Option<Vec<Card>>,
    pub cut: Option<Card>,
}
