//! The goal ledger: every recorded goal across all matches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::goal::{GoalEvent, GoalKey};
use crate::rejection::GoalRejection;
use crate::score::Score;

/// A change the validation engine has accepted.
///
/// The engine decides, the ledger applies. Nothing else mutates a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    GoalRecorded(GoalEvent),
    /// Carries the goal as stored in the ledger.
    GoalRemoved(GoalEvent),
}

impl LedgerChange {
    /// The goal being recorded or removed.
    pub fn goal(&self) -> &GoalEvent {
        match self {
            LedgerChange::GoalRecorded(goal) | LedgerChange::GoalRemoved(goal) => goal,
        }
    }

    pub fn change_type(&self) -> &'static str {
        match self {
            LedgerChange::GoalRecorded(_) => "goal.recorded",
            LedgerChange::GoalRemoved(_) => "goal.removed",
        }
    }
}

/// Insertion-ordered collection of recorded goals.
///
/// Goals are partitioned logically by match date. Insertion order is not
/// necessarily score order, so every "last goal" query scans by order.
///
/// Every goal held here has a score; loading a document with an unscored goal fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerDocument")]
pub struct GoalLedger {
    #[serde(rename = "assets")]
    goals: Vec<GoalEvent>,
}

#[derive(Deserialize)]
struct LedgerDocument {
    #[serde(default)]
    assets: Vec<GoalEvent>,
}

impl TryFrom<LedgerDocument> for GoalLedger {
    type Error = GoalRejection;

    fn try_from(doc: LedgerDocument) -> Result<Self, Self::Error> {
        if let Some(unscored) = doc.assets.iter().find(|g| g.score().is_none()) {
            return Err(GoalRejection::InvalidScore(format!(
                "recorded goal on {} has no score",
                unscored.match_date()
            )));
        }
        Ok(Self { goals: doc.assets })
    }
}

impl GoalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[GoalEvent] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Goals of one match, in insertion order.
    pub fn events_for_match(&self, match_date: NaiveDate) -> Vec<&GoalEvent> {
        self.goals
            .iter()
            .filter(|g| g.match_date() == match_date)
            .collect()
    }

    /// The highest-order goal of a match.
    pub fn last_event_for_match(&self, match_date: NaiveDate) -> Option<&GoalEvent> {
        self.goals
            .iter()
            .filter(|g| g.match_date() == match_date)
            .filter_map(|g| g.order().map(|order| (order, g)))
            .max_by_key(|(order, _)| *order)
            .map(|(_, g)| g)
    }

    /// Score after the last goal of a match, or the `0-0` baseline.
    pub fn last_score_for_match(&self, match_date: NaiveDate) -> Score {
        self.last_event_for_match(match_date)
            .and_then(|g| g.score())
            .unwrap_or_else(Score::initial)
    }

    pub fn contains(&self, key: GoalKey) -> bool {
        self.goals.iter().any(|g| g.key() == Some(key))
    }

    /// Evolve the ledger by one accepted change.
    pub fn apply(&mut self, change: &LedgerChange) {
        match change {
            LedgerChange::GoalRecorded(goal) => self.goals.push(goal.clone()),
            LedgerChange::GoalRemoved(goal) => {
                let key = goal.key();
                if let Some(idx) = self.goals.iter().position(|g| key.is_some() && g.key() == key) {
                    self.goals.remove(idx);
                }
            }
        }
    }
}

impl FromIterator<GoalEvent> for GoalLedger {
    /// Builds a ledger without validation; unscored goals are dropped.
    fn from_iter<I: IntoIterator<Item = GoalEvent>>(iter: I) -> Self {
        Self {
            goals: iter.into_iter().filter(|g| g.score().is_some()).collect(),
        }
    }
}
