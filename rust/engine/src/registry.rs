//! Keyed store of live matches and the connection → player map.
//!
//! The registry sits between the transport layer and the engines: it owns
//! every [`MatchEngine`], resolves which player a connection speaks for and
//! forwards one [`Command`] at a time. Like the engine it is single-threaded;
//! callers serialize access per registry.

use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::MatchConfig;
use crate::errors::RegistryError;
use crate::game::{Command, MatchEngine, MatchSnapshot};
use crate::player::PlayerId;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 8;

/// Short random identifier: 8 lowercase base-36 characters.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: HashMap<String, MatchEngine>,
    connections: HashMap<String, PlayerId>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a match under a fresh id and returns the id.
    pub fn create(&mut self, config: MatchConfig) -> Result<String, RegistryError> {
        let mut id = generate_id();
        while self.matches.contains_key(&id) {
            id = generate_id();
        }
        let engine = MatchEngine::with_config(id.clone(), config)?;
        info!(game = %id, max_players = config.max_players, "match created");
        self.matches.insert(id.clone(), engine);
        Ok(id)
    }

    pub fn insert(&mut self, engine: MatchEngine) -> Result<(), RegistryError> {
        if self.matches.contains_key(engine.id()) {
            return Err(RegistryError::DuplicateMatch(engine.id().to_string()));
        }
        self.matches.insert(engine.id().to_string(), engine);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&MatchEngine> {
        self.matches.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut MatchEngine> {
        self.matches.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<MatchEngine> {
        let removed = self.matches.remove(id);
        if removed.is_some() {
            info!(game = %id, "match removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.matches.keys().map(String::as_str)
    }

    pub fn bind_connection(&mut self, connection: impl Into<String>, player: impl Into<PlayerId>) {
        let connection = connection.into();
        let player = player.into();
        debug!(connection = %connection, player = %player, "connection bound");
        self.connections.insert(connection, player);
    }

    pub fn unbind_connection(&mut self, connection: &str) -> Option<PlayerId> {
        self.connections.remove(connection)
    }

    pub fn player_for(&self, connection: &str) -> Option<&PlayerId> {
        self.connections.get(connection)
    }

    /// Routes one client action to its match and returns the acting player's
    /// view of the result.
    pub fn dispatch(
        &mut self,
        match_id: &str,
        connection: &str,
        command: Command,
    ) -> Result<MatchSnapshot, RegistryError> {
        let player = self
            .connections
            .get(connection)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownConnection(connection.to_string()))?;
        let engine = self
            .matches
            .get_mut(match_id)
            .ok_or_else(|| RegistryError::UnknownMatch(match_id.to_string()))?;
        let engine = engine.apply(player.clone(), command)?;
        Ok(engine.snapshot_for(player.as_str()))
    }
}
