use std::sync::RwLock;

use scoreline_goals::GoalLedger;

use super::r#trait::{LedgerStore, StoreError};

/// In-memory ledger store.
///
/// Intended for tests/dev. `read_only` stores refuse saves, which lets callers
/// exercise the permission-denied path without touching a filesystem.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    ledger: RwLock<GoalLedger>,
    read_only: bool,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: GoalLedger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Number of goals currently stored.
    pub fn len(&self) -> Result<usize, StoreError> {
        let ledger = self.ledger.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ledger.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self) -> Result<GoalLedger, StoreError> {
        let ledger = self.ledger.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ledger.clone())
    }

    fn save(&self, ledger: &GoalLedger) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::PermissionDenied(
                "in-memory store is read-only".to_string(),
            ));
        }
        let mut stored = self.ledger.write().map_err(|_| StoreError::LockPoisoned)?;
        *stored = ledger.clone();
        Ok(())
    }
}
