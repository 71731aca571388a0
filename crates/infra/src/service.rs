//! Goal service: the write-serialising facade over store and registries.
//!
//! Every mutation runs the same pipeline:
//!
//! ```text
//! candidate
//!   -> lock
//!   -> load ledger snapshot
//!   -> look up match
//!   -> decide (pure, scoreline-goals engine)
//!   -> apply to snapshot
//!   -> save whole ledger
//! ```
//!
//! A single process-wide lock covers the load/decide/save window, so two
//! concurrent proposals for the same match can never both claim one order.
//! If the save fails the change has not taken effect.

use std::sync::Mutex;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use scoreline_goals::{
    CountKind, GoalEvent, GoalLedger, GoalRejection, LedgerChange, MatchRegistry, PlayerRegistry,
    PlayerStat, decide_append, decide_removal, masked_stats, rank_players,
};

use crate::store::{LedgerStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The goal engine refused the change.
    #[error(transparent)]
    Rejected(#[from] GoalRejection),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("write lock poisoned")]
    LockPoisoned,
}

impl ServiceError {
    pub fn rejection(&self) -> Option<&GoalRejection> {
        match self {
            ServiceError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct GoalService<S, P, M> {
    store: S,
    players: P,
    matches: M,
    write_lock: Mutex<()>,
}

impl<S, P, M> GoalService<S, P, M> {
    pub fn new(store: S, players: P, matches: M) -> Self {
        Self {
            store,
            players,
            matches,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S, P, M> GoalService<S, P, M>
where
    S: LedgerStore,
    P: PlayerRegistry,
    M: MatchRegistry,
{
    /// Validate a candidate goal and record it.
    ///
    /// Returns the goal as committed, with its score filled in when the
    /// candidate carried none.
    pub fn propose_goal(&self, candidate: GoalEvent) -> Result<GoalEvent, ServiceError> {
        let _guard = self.write_lock.lock().map_err(|_| ServiceError::LockPoisoned)?;

        let mut ledger = self.store.load()?;
        let match_date = candidate.match_date();
        let match_ctx = self
            .matches
            .lookup(match_date)
            .ok_or(GoalRejection::MatchNotFound(match_date))?;

        let change = decide_append(candidate, &match_ctx, &ledger, &self.players)
            .inspect_err(|reason| log_rejection("propose", match_date, reason))?;

        let committed = change.goal().clone();
        self.commit(&mut ledger, &change)?;
        info!(
            %match_date,
            order = committed.order(),
            score = ?committed.score().map(|s| s.to_string()),
            team_goal = committed.is_team_goal(),
            "goal recorded"
        );
        Ok(committed)
    }

    /// Remove the most recent goal of a match.
    ///
    /// Returns the goal as it was stored.
    pub fn remove_last_goal(&self, target: GoalEvent) -> Result<GoalEvent, ServiceError> {
        let _guard = self.write_lock.lock().map_err(|_| ServiceError::LockPoisoned)?;

        let mut ledger = self.store.load()?;
        let match_date = target.match_date();

        let change = decide_removal(&target, &ledger)
            .inspect_err(|reason| log_rejection("remove", match_date, reason))?;

        let removed = change.goal().clone();
        self.commit(&mut ledger, &change)?;
        info!(%match_date, order = removed.order(), "goal removed");
        Ok(removed)
    }

    /// Goals of one match in scoring order.
    pub fn list_goals_for_match(&self, match_date: NaiveDate) -> Result<Vec<GoalEvent>, ServiceError> {
        let ledger = self.store.load()?;
        let mut goals: Vec<GoalEvent> = ledger
            .events_for_match(match_date)
            .into_iter()
            .cloned()
            .collect();
        goals.sort_by_key(|g| g.key());
        Ok(goals)
    }

    /// Per-player totals, highest first.
    ///
    /// With `masked` set, every roster player is reported with
    /// [`scoreline_goals::MASKED_COUNT`] in shuffled order and the ledger is
    /// not read.
    pub fn compute_stats(&self, kind: CountKind, masked: bool) -> Result<Vec<PlayerStat>, ServiceError> {
        let roster = self.players.players();
        if masked {
            debug!(?kind, players = roster.len(), "serving masked stats");
            return Ok(masked_stats(&roster, &mut rand::thread_rng()));
        }

        let ledger = self.store.load()?;
        Ok(rank_players(&ledger, kind, &roster))
    }

    fn commit(&self, ledger: &mut GoalLedger, change: &LedgerChange) -> Result<(), ServiceError> {
        ledger.apply(change);
        self.store.save(ledger).map_err(|err| {
            warn!(change = change.change_type(), error = %err, "save failed; change discarded");
            ServiceError::Store(err)
        })
    }
}

fn log_rejection(action: &'static str, match_date: NaiveDate, reason: &GoalRejection) {
    info!(action, %match_date, code = reason.code(), reason = %reason, "goal rejected");
}
