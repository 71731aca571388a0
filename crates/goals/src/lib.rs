//! Goal domain module.
//!
//! This crate contains the goal-sequence rules and score derivation for a
//! team's matches, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod engine;
pub mod fixture;
pub mod goal;
pub mod ledger;
pub mod registry;
pub mod rejection;
pub mod rules;
pub mod score;
pub mod stats;

pub use engine::{decide_append, decide_removal, resolve_score};
pub use fixture::{Fixture, MatchContext};
pub use goal::{GoalEvent, GoalKey};
pub use ledger::{GoalLedger, LedgerChange};
pub use registry::{MatchRegistry, PlayerRegistry};
pub use rejection::{GoalRejection, ScoringSide};
pub use rules::{AwayFixtureRule, HomeFixtureRule, ScoreConsistencyRule, ScoreDelta, rule_for};
pub use score::Score;
pub use stats::{CountKind, MASKED_COUNT, PlayerStat, masked_stats, player_counts, rank_players};
