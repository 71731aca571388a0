use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use scoreline_core::PlayerName;

use crate::rejection::{GoalRejection, ScoringSide};
use crate::score::Score;

/// Identity of a goal: its match and its position within that match.
///
/// Ordering is by date first, then by order, so goals from different matches
/// never interleave when sorted together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoalKey {
    pub match_date: NaiveDate,
    pub order: u32,
}

/// One scoring occurrence in a match.
///
/// A goal without a scorer is an opponent goal. The score is optional while the
/// goal is only a proposal; the engine fills it in before the goal is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GoalRecord", into = "GoalRecord")]
pub struct GoalEvent {
    match_date: NaiveDate,
    scored_by: Option<PlayerName>,
    assisted_by: Option<PlayerName>,
    score: Option<Score>,
}

/// Wire form of a goal. The derived `is_team_goal` and `order` fields are
/// written for readers but ignored when reading back.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoalRecord {
    match_date: NaiveDate,
    #[serde(default)]
    scored_by: Option<PlayerName>,
    #[serde(default)]
    assisted_by: Option<PlayerName>,
    #[serde(default)]
    score: Option<Score>,
    #[serde(default, skip_deserializing)]
    is_team_goal: bool,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    order: Option<u32>,
}

impl TryFrom<GoalRecord> for GoalEvent {
    type Error = GoalRejection;

    fn try_from(record: GoalRecord) -> Result<Self, Self::Error> {
        GoalEvent::new(
            record.match_date,
            record.scored_by,
            record.assisted_by,
            record.score,
        )
    }
}

impl From<GoalEvent> for GoalRecord {
    fn from(goal: GoalEvent) -> Self {
        GoalRecord {
            is_team_goal: goal.is_team_goal(),
            order: goal.order(),
            match_date: goal.match_date,
            scored_by: goal.scored_by,
            assisted_by: goal.assisted_by,
            score: goal.score,
        }
    }
}

impl GoalEvent {
    /// Build a goal. An assist requires a scorer.
    pub fn new(
        match_date: NaiveDate,
        scored_by: Option<PlayerName>,
        assisted_by: Option<PlayerName>,
        score: Option<Score>,
    ) -> Result<Self, GoalRejection> {
        if assisted_by.is_some() && scored_by.is_none() {
            return Err(GoalRejection::AssistWithoutScorer);
        }
        Ok(Self {
            match_date,
            scored_by,
            assisted_by,
            score,
        })
    }

    /// Opponent goal with no score yet.
    pub fn opponent(match_date: NaiveDate) -> Self {
        Self {
            match_date,
            scored_by: None,
            assisted_by: None,
            score: None,
        }
    }

    /// Team goal with no assist and no score yet.
    pub fn team(match_date: NaiveDate, scored_by: PlayerName) -> Self {
        Self {
            match_date,
            scored_by: Some(scored_by),
            assisted_by: None,
            score: None,
        }
    }

    /// Same goal with the given score attached.
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = Some(score);
        self
    }

    pub fn match_date(&self) -> NaiveDate {
        self.match_date
    }

    pub fn scored_by(&self) -> Option<&PlayerName> {
        self.scored_by.as_ref()
    }

    pub fn assisted_by(&self) -> Option<&PlayerName> {
        self.assisted_by.as_ref()
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn is_team_goal(&self) -> bool {
        self.scored_by.is_some()
    }

    pub fn is_opponent_goal(&self) -> bool {
        !self.is_team_goal()
    }

    pub fn side(&self) -> ScoringSide {
        if self.is_team_goal() {
            ScoringSide::Team
        } else {
            ScoringSide::Opponent
        }
    }

    /// Position within the match. `None` until the score is resolved.
    pub fn order(&self) -> Option<u32> {
        self.score.map(|s| s.order())
    }

    pub fn key(&self) -> Option<GoalKey> {
        self.order().map(|order| GoalKey {
            match_date: self.match_date,
            order,
        })
    }
}

impl core::fmt::Display for GoalEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let date = self.match_date.format("%d-%m-%Y");
        match self.order() {
            Some(order) => write!(f, "{} goal on {date}", ordinal(order)),
            None => write!(f, "unscored goal on {date}"),
        }
    }
}

/// `1` -> `1st`, `12` -> `12th`, `23` -> `23rd`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
