use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use scoreline_core::{Entity, PlayerName};
use scoreline_goals::{MatchContext, MatchRegistry, PlayerRegistry};

use crate::store::StoreError;

/// In-memory roster for tests/dev. Keeps registration order.
///
/// Lookups read through a poisoned lock: writers only push whole entries, so
/// the roster is never left half-updated. Registration reports the poison.
#[derive(Debug, Default)]
pub struct InMemoryPlayerRegistry {
    players: RwLock<Vec<PlayerName>>,
}

impl InMemoryPlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player. Returns `Ok(false)` if the name (case-insensitively) is already registered.
    pub fn register(&self, player: PlayerName) -> Result<bool, StoreError> {
        let mut players = self.players.write().map_err(|_| StoreError::LockPoisoned)?;
        if players.contains(&player) {
            return Ok(false);
        }
        players.push(player);
        Ok(true)
    }
}

impl FromIterator<PlayerName> for InMemoryPlayerRegistry {
    fn from_iter<I: IntoIterator<Item = PlayerName>>(iter: I) -> Self {
        let mut players: Vec<PlayerName> = Vec::new();
        for player in iter {
            if !players.contains(&player) {
                players.push(player);
            }
        }
        Self {
            players: RwLock::new(players),
        }
    }
}

impl PlayerRegistry for InMemoryPlayerRegistry {
    fn exists(&self, player: &PlayerName) -> bool {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(player)
    }

    fn players(&self) -> Vec<PlayerName> {
        self.players.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// In-memory match schedule for tests/dev. One match per date.
#[derive(Debug, Default)]
pub struct InMemoryMatchRegistry {
    matches: RwLock<BTreeMap<NaiveDate, MatchContext>>,
}

impl InMemoryMatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a match. Returns `Ok(false)` if a match on that date already exists.
    pub fn register(&self, match_ctx: MatchContext) -> Result<bool, StoreError> {
        let mut matches = self.matches.write().map_err(|_| StoreError::LockPoisoned)?;
        if matches.contains_key(&match_ctx.id()) {
            return Ok(false);
        }
        matches.insert(match_ctx.id(), match_ctx);
        Ok(true)
    }
}

impl FromIterator<MatchContext> for InMemoryMatchRegistry {
    fn from_iter<I: IntoIterator<Item = MatchContext>>(iter: I) -> Self {
        let mut matches = BTreeMap::new();
        for match_ctx in iter {
            matches.entry(match_ctx.id()).or_insert(match_ctx);
        }
        Self {
            matches: RwLock::new(matches),
        }
    }
}

impl MatchRegistry for InMemoryMatchRegistry {
    fn lookup(&self, match_date: NaiveDate) -> Option<MatchContext> {
        self.matches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&match_date)
            .cloned()
    }
}
