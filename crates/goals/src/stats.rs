//! Per-player goal and assist counts folded from the ledger.

use core::cmp::Reverse;
use core::str::FromStr;
use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use scoreline_core::{DomainError, PlayerName};

use crate::goal::GoalEvent;
use crate::ledger::GoalLedger;

/// Count shown in place of real numbers when stats are masked.
pub const MASKED_COUNT: i64 = -1;

/// What to count per player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountKind {
    Goal,
    Assist,
}

impl CountKind {
    fn player_of(self, goal: &GoalEvent) -> Option<&PlayerName> {
        match self {
            CountKind::Goal => goal.scored_by(),
            CountKind::Assist => goal.assisted_by(),
        }
    }
}

impl FromStr for CountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goal" | "goals" => Ok(CountKind::Goal),
            "assist" | "assists" => Ok(CountKind::Assist),
            other => Err(DomainError::validation(format!(
                "count kind must be 'goal' or 'assist', got '{other}'"
            ))),
        }
    }
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub player: PlayerName,
    pub count: i64,
}

impl PlayerStat {
    pub fn new(player: PlayerName, count: i64) -> Self {
        Self { player, count }
    }

    /// Same player with the count replaced.
    pub fn with_count(self, count: i64) -> Self {
        Self { count, ..self }
    }
}

/// Occurrences per player, in order of first appearance in the ledger.
pub fn player_counts(ledger: &GoalLedger, kind: CountKind) -> Vec<(PlayerName, u32)> {
    let mut counts: Vec<(PlayerName, u32)> = Vec::new();
    let mut index: HashMap<&PlayerName, usize> = HashMap::new();
    for player in ledger.goals().iter().filter_map(|g| kind.player_of(g)) {
        match index.get(player) {
            Some(&at) => counts[at].1 += 1,
            None => {
                index.insert(player, counts.len());
                counts.push((player.clone(), 1));
            }
        }
    }
    counts
}

/// Ranked counts for every player seen in the ledger or listed in `roster`.
///
/// Roster players without occurrences get a count of zero. Sorting is
/// descending by count. Ties follow roster order, and players missing from
/// the roster come after every roster player in ledger order.
pub fn rank_players(ledger: &GoalLedger, kind: CountKind, roster: &[PlayerName]) -> Vec<PlayerStat> {
    let mut counts: HashMap<PlayerName, u32> = HashMap::new();
    let mut unrostered: Vec<PlayerName> = Vec::new();
    for (player, n) in player_counts(ledger, kind) {
        if !roster.contains(&player) {
            unrostered.push(player.clone());
        }
        counts.insert(player, n);
    }

    let mut stats: Vec<PlayerStat> = roster
        .iter()
        .chain(unrostered.iter())
        .map(|player| {
            let n = counts.remove(player).unwrap_or(0);
            PlayerStat::new(player.clone(), i64::from(n))
        })
        .collect();

    stats.sort_by_key(|s| Reverse(s.count));
    stats
}

/// The roster with every count hidden and the order shuffled.
pub fn masked_stats<R: Rng + ?Sized>(roster: &[PlayerName], rng: &mut R) -> Vec<PlayerStat> {
    let mut stats: Vec<PlayerStat> = roster
        .iter()
        .map(|player| PlayerStat::new(player.clone(), 0).with_count(MASKED_COUNT))
        .collect();
    stats.shuffle(rng);
    stats
}
