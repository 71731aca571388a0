//! Read-only loaders for the roster and schedule documents.
//!
//! Both files use the `{"assets": [...]}` layout the ledger uses. Players are
//! `{"name": "..."}`, matches are `{"match_date", "opponent": {"name"}, "is_home"}`.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use scoreline_core::{OpponentName, PlayerName};
use scoreline_goals::MatchContext;

use super::in_memory::{InMemoryMatchRegistry, InMemoryPlayerRegistry};
use crate::config::StoreConfig;
use crate::store::StoreError;

#[derive(Deserialize)]
struct Document<T> {
    #[serde(default = "Vec::new")]
    assets: Vec<T>,
}

#[derive(Deserialize)]
struct NamedRecord {
    name: String,
}

#[derive(Deserialize)]
struct MatchRecord {
    match_date: NaiveDate,
    opponent: NamedRecord,
    is_home: bool,
}

fn read_assets<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        debug!(path = %path.display(), "registry file missing; starting empty");
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let doc: Document<T> = serde_json::from_str(&raw)?;
    Ok(doc.assets)
}

fn invalid_name(err: scoreline_core::DomainError) -> StoreError {
    StoreError::Serialization(serde::de::Error::custom(err))
}

/// Load `players.json` into an in-memory roster.
pub fn load_players(path: &Path) -> Result<InMemoryPlayerRegistry, StoreError> {
    let records: Vec<NamedRecord> = read_assets(path)?;
    let registry = InMemoryPlayerRegistry::new();
    for record in records {
        registry.register(PlayerName::new(record.name).map_err(invalid_name)?)?;
    }
    Ok(registry)
}

/// Load `matches.json` into an in-memory schedule.
pub fn load_matches(path: &Path) -> Result<InMemoryMatchRegistry, StoreError> {
    let records: Vec<MatchRecord> = read_assets(path)?;
    let registry = InMemoryMatchRegistry::new();
    for record in records {
        let opponent = OpponentName::new(record.opponent.name).map_err(invalid_name)?;
        registry.register(MatchContext::new(record.match_date, opponent, record.is_home))?;
    }
    Ok(registry)
}

/// Roster and schedule loaded from the configured assets directory.
pub struct JsonRegistryFiles {
    pub players: InMemoryPlayerRegistry,
    pub matches: InMemoryMatchRegistry,
}

impl JsonRegistryFiles {
    pub fn load(config: &StoreConfig) -> Result<Self, StoreError> {
        if !config.local_access {
            return Err(StoreError::PermissionDenied("no local access".to_string()));
        }
        Ok(Self {
            players: load_players(&config.players_path())?,
            matches: load_matches(&config.matches_path())?,
        })
    }
}
