//! Configuration loading and representation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_ASSETS_DIR: &str = "SCORELINE_ASSETS_DIR";
pub const ENV_LOCAL_ACCESS: &str = "SCORELINE_LOCAL_ACCESS";

pub const GOALS_FILE: &str = "goals.json";
pub const PLAYERS_FILE: &str = "players.json";
pub const MATCHES_FILE: &str = "matches.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Where the JSON assets live and whether this process may touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub assets_dir: PathBuf,
    /// When false, loading and saving the ledger is denied.
    pub local_access: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            local_access: false,
        }
    }
}

impl StoreConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_ASSETS_DIR).filter(|v| !v.trim().is_empty()) {
            config.assets_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(ENV_LOCAL_ACCESS) {
            config.local_access = parse_bool(ENV_LOCAL_ACCESS, &raw)?;
        }

        Ok(config)
    }

    pub fn with_assets_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.assets_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_local_access(mut self, local_access: bool) -> Self {
        self.local_access = local_access;
        self
    }

    pub fn goals_path(&self) -> PathBuf {
        self.assets_dir.join(GOALS_FILE)
    }

    pub fn players_path(&self) -> PathBuf {
        self.assets_dir.join(PLAYERS_FILE)
    }

    pub fn matches_path(&self) -> PathBuf {
        self.assets_dir.join(MATCHES_FILE)
    }
}

impl core::fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "---------- SETTINGS ----------")?;
        writeln!(f, "[Settings parameter] assets_dir: {}", self.assets_dir.display())?;
        write!(f, "[Settings parameter] local_access: {}", self.local_access)
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_deny_local_access() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(!config.local_access);
        assert_eq!(config.goals_path(), PathBuf::from("assets/goals.json"));
    }

    #[test]
    fn reads_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (ENV_ASSETS_DIR, "/tmp/scoreline"),
            (ENV_LOCAL_ACCESS, "True"),
        ]))
        .unwrap();
        assert!(config.local_access);
        assert_eq!(config.players_path(), PathBuf::from("/tmp/scoreline/players.json"));
    }

    #[test]
    fn rejects_garbage_booleans() {
        let err = StoreConfig::from_lookup(lookup(&[(ENV_LOCAL_ACCESS, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_LOCAL_ACCESS, .. }));
    }

    #[test]
    fn display_lists_settings() {
        let text = StoreConfig::default().to_string();
        assert!(text.starts_with("---------- SETTINGS ----------"));
        assert!(text.contains("local_access: false"));
    }
}
