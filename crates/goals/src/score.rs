use core::str::FromStr;
use serde::{Deserialize, Serialize};

use scoreline_core::ValueObject;

use crate::rejection::GoalRejection;

/// An absolute match score as shown on the scoreboard (home column first).
///
/// `0-0` is never a recorded score. It exists only as the [`Score::initial`]
/// baseline used before the first goal of a match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawScore")]
pub struct Score {
    home: u32,
    away: u32,
}

#[derive(Deserialize)]
struct RawScore {
    home: u32,
    away: u32,
}

impl TryFrom<RawScore> for Score {
    type Error = GoalRejection;

    fn try_from(raw: RawScore) -> Result<Self, Self::Error> {
        Score::new(raw.home, raw.away)
    }
}

impl ValueObject for Score {}

impl Score {
    /// Build a recorded score.
    ///
    /// `0-0` is rejected, and so is any pair whose order would not leave room
    /// for one more goal in a `u32`.
    pub fn new(home: u32, away: u32) -> Result<Self, GoalRejection> {
        if home == 0 && away == 0 {
            return Err(GoalRejection::InvalidScore("0-0".to_string()));
        }
        match home.checked_add(away) {
            Some(total) if total < u32::MAX => Ok(Self { home, away }),
            _ => Err(GoalRejection::InvalidScore(format!("{home}-{away}"))),
        }
    }

    /// The "no goals yet" baseline. Never persisted.
    pub const fn initial() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn is_initial(&self) -> bool {
        self.home == 0 && self.away == 0
    }

    pub fn home(&self) -> u32 {
        self.home
    }

    pub fn away(&self) -> u32 {
        self.away
    }

    /// Total goals by both sides, i.e. the 1-based position of the goal that produced this score.
    ///
    /// Never overflows: construction keeps `home + away` below `u32::MAX`.
    pub fn order(&self) -> u32 {
        self.home + self.away
    }

    /// The score after one more goal.
    ///
    /// The team's goals land in its own column: home for a home fixture, away
    /// otherwise. Opponent goals land in the other column.
    pub fn next(self, team_scored: bool, is_home: bool) -> Result<Score, GoalRejection> {
        let overflow = || GoalRejection::InvalidScore(format!("{self} has no next score"));
        let (home, away) = if team_scored == is_home {
            (self.home.checked_add(1).ok_or_else(overflow)?, self.away)
        } else {
            (self.home, self.away.checked_add(1).ok_or_else(overflow)?)
        };
        Score::new(home, away).map_err(|_| overflow())
    }
}

impl core::fmt::Display for Score {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Parses the scoreboard form `"H-A"`, e.g. `"2-1"`.
impl FromStr for Score {
    type Err = GoalRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GoalRejection::InvalidScore(s.to_string());

        let (home, away) = s.trim().split_once('-').ok_or_else(invalid)?;
        let home = home.trim().parse::<u32>().map_err(|_| invalid())?;
        let away = away.trim().parse::<u32>().map_err(|_| invalid())?;

        Score::new(home, away).map_err(|_| invalid())
    }
}
