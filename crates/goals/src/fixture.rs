use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use scoreline_core::{Entity, OpponentName};

/// Whether the tracked team plays at home or away.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixture {
    Home,
    Away,
}

/// A scheduled match, as owned by the match registry.
///
/// The goal engine only reads the date and the orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    pub match_date: NaiveDate,
    pub opponent: OpponentName,
    pub is_home: bool,
}

impl MatchContext {
    pub fn new(match_date: NaiveDate, opponent: OpponentName, is_home: bool) -> Self {
        Self {
            match_date,
            opponent,
            is_home,
        }
    }

    pub fn is_away(&self) -> bool {
        !self.is_home
    }

    pub fn fixture(&self) -> Fixture {
        if self.is_home {
            Fixture::Home
        } else {
            Fixture::Away
        }
    }
}

impl Entity for MatchContext {
    type Id = NaiveDate;

    fn id(&self) -> Self::Id {
        self.match_date
    }
}

impl core::fmt::Display for MatchContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let venue = if self.is_home { "vs" } else { "at" };
        write!(
            f,
            "match on {} {venue} {}",
            self.match_date.format("%Y-%m-%d"),
            self.opponent
        )
    }
}
