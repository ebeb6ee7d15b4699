//! # cribbage-engine: Cribbage Match Engine Core
//!
//! A server-authoritative state machine for two-player cribbage. Tracks seat
//! membership, shuffles and partitions the 52-card deck, settles the cut for
//! dealer (with redraws on ties), deals hands, collects crib discards and hands
//! off to pegging once the starter is cut.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card codec: integer ids 0..=51 to rank and suit
//! - [`deck`] - Ordered deck with shuffle/cut/peek/pull on a ChaCha20 RNG
//! - [`game`] - The [`game::MatchEngine`] phase machine and client views
//! - [`player`] - Player ids, seat status and hands
//! - [`config`] - Table shape (players, hand size) and validation
//! - [`logger`] - Action history and JSONL match records
//! - [`registry`] - Keyed store of live matches for the transport layer
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cribbage_engine::config::MatchConfig;
//! use cribbage_engine::game::{MatchEngine, Phase};
//!
//! let mut game = MatchEngine::with_config("demo", MatchConfig::default().with_seed(7))?;
//! game.join("p1")?.join("p2")?;
//! game.mark_ready("p1")?.mark_ready("p2")?;
//! game.start()?;
//!
//! while game.phase() == Phase::CutForDealer {
//!     for id in ["p1", "p2"] {
//!         if game.phase() == Phase::CutForDealer && game.player_cut(id).is_none() {
//!             game.cut_for_dealer_random(id)?;
//!         }
//!     }
//! }
//! game.new_hand()?;
//! assert!(game.check_conservation());
//! # Ok::<(), cribbage_engine::errors::MatchError>(())
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod game;
pub mod logger;
pub mod player;
pub mod registry;
