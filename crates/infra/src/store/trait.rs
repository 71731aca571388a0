use std::sync::Arc;

use thiserror::Error;

use scoreline_goals::GoalLedger;

/// Ledger persistence error.
///
/// These are **infrastructure errors** (access, IO, encoding) as opposed to
/// goal rejections.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Whole-ledger persistence.
///
/// Callers load a snapshot, let the engine decide, apply the change and save
/// the result. There is no partial write: `save` replaces the stored ledger.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> Result<GoalLedger, StoreError>;

    fn save(&self, ledger: &GoalLedger) -> Result<(), StoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn load(&self) -> Result<GoalLedger, StoreError> {
        (**self).load()
    }

    fn save(&self, ledger: &GoalLedger) -> Result<(), StoreError> {
        (**self).save(ledger)
    }
}
