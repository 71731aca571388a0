//! Rejection taxonomy for goal proposals and removals.

use chrono::NaiveDate;
use thiserror::Error;

use scoreline_core::PlayerName;

use crate::score::Score;

/// Which side a goal is attributed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScoringSide {
    Team,
    Opponent,
}

impl core::fmt::Display for ScoringSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScoringSide::Team => f.write_str("team"),
            ScoringSide::Opponent => f.write_str("opponent"),
        }
    }
}

/// Why a goal was not accepted (or not removed).
///
/// Every variant is deterministic for a given ledger snapshot and carries enough
/// context to explain the decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GoalRejection {
    #[error("invalid score '{0}'")]
    InvalidScore(String),

    #[error("cannot have an assist without a goal scorer")]
    AssistWithoutScorer,

    #[error("invalid goal on {match_date}: score {candidate} cannot be the first score in a match")]
    NonFirstGoal { match_date: NaiveDate, candidate: Score },

    #[error("invalid goal on {match_date}: score {candidate} cannot follow {previous}")]
    OutOfSequenceGoal {
        match_date: NaiveDate,
        previous: Score,
        candidate: Score,
    },

    #[error(
        "invalid score {candidate} after {previous} on {match_date}: team and opponent scores cannot both stay the same"
    )]
    BothSidesUnchanged {
        match_date: NaiveDate,
        previous: Score,
        candidate: Score,
    },

    #[error(
        "invalid score {candidate} after {previous} on {match_date}: team and opponent scores cannot both change"
    )]
    BothSidesChanged {
        match_date: NaiveDate,
        previous: Score,
        candidate: Score,
    },

    #[error(
        "invalid score {candidate} after {previous} on {match_date}: {side} goal, so {side} score should increase"
    )]
    WrongSideIncremented {
        match_date: NaiveDate,
        side: ScoringSide,
        previous: Score,
        candidate: Score,
    },

    #[error("goal number {order} on {match_date} already exists")]
    DuplicateGoal { match_date: NaiveDate, order: u32 },

    #[error("a player named {0} does not exist")]
    UnknownPlayer(PlayerName),

    #[error("not the last goal in the match on {match_date} ({goal_count} goals recorded)")]
    NotLastGoal {
        match_date: NaiveDate,
        order: Option<u32>,
        goal_count: usize,
    },

    #[error("goal number {order} on {match_date} does not exist")]
    GoalNotFound { match_date: NaiveDate, order: u32 },

    #[error("no match found for {0}")]
    MatchNotFound(NaiveDate),
}

impl GoalRejection {
    /// Stable machine-readable code, e.g. for drivers that map rejections to responses.
    pub fn code(&self) -> &'static str {
        match self {
            GoalRejection::InvalidScore(_) => "invalid_score",
            GoalRejection::AssistWithoutScorer => "assist_without_scorer",
            GoalRejection::NonFirstGoal { .. } => "non_first_goal",
            GoalRejection::OutOfSequenceGoal { .. } => "out_of_sequence_goal",
            GoalRejection::BothSidesUnchanged { .. } => "both_sides_unchanged",
            GoalRejection::BothSidesChanged { .. } => "both_sides_changed",
            GoalRejection::WrongSideIncremented { .. } => "wrong_side_incremented",
            GoalRejection::DuplicateGoal { .. } => "duplicate_goal",
            GoalRejection::UnknownPlayer(_) => "unknown_player",
            GoalRejection::NotLastGoal { .. } => "not_last_goal",
            GoalRejection::GoalNotFound { .. } => "goal_not_found",
            GoalRejection::MatchNotFound(_) => "match_not_found",
        }
    }
}
