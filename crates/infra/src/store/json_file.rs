use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use scoreline_goals::GoalLedger;

use super::r#trait::{LedgerStore, StoreError};
use crate::config::StoreConfig;

/// Ledger stored as a pretty-printed JSON document (`{"assets": [...]}`).
///
/// A missing file loads as an empty ledger. Without local access every load
/// and save is denied.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
    local_access: bool,
}

impl JsonFileLedgerStore {
    pub fn new(path: impl Into<PathBuf>, local_access: bool) -> Self {
        Self {
            path: path.into(),
            local_access,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.goals_path(), config.local_access)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_access(&self) -> Result<(), StoreError> {
        if self.local_access {
            Ok(())
        } else {
            Err(StoreError::PermissionDenied("no local access".to_string()))
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl LedgerStore for JsonFileLedgerStore {
    fn load(&self) -> Result<GoalLedger, StoreError> {
        self.ensure_access()?;

        if !self.path.exists() {
            debug!(path = %self.path.display(), "ledger file missing; starting empty");
            return Ok(GoalLedger::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let ledger: GoalLedger = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), goals = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    fn save(&self, ledger: &GoalLedger) -> Result<(), StoreError> {
        if let Err(err) = self.ensure_access() {
            warn!(path = %self.path.display(), "save skipped: local access is disabled");
            return Err(err);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), goals = ledger.len(), "ledger saved");
        Ok(())
    }
}
