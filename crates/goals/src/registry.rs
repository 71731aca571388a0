//! Collaborator contracts the goal engine reads from.

use chrono::NaiveDate;

use scoreline_core::PlayerName;

use crate::fixture::MatchContext;

/// Roster of the tracked team.
pub trait PlayerRegistry {
    /// Whether the player is on the roster (case-insensitive).
    fn exists(&self, player: &PlayerName) -> bool;

    /// All players, in registry order.
    fn players(&self) -> Vec<PlayerName>;
}

/// Scheduled matches, keyed by date.
pub trait MatchRegistry {
    fn lookup(&self, match_date: NaiveDate) -> Option<MatchContext>;
}

impl<R: PlayerRegistry + ?Sized> PlayerRegistry for &R {
    fn exists(&self, player: &PlayerName) -> bool {
        (**self).exists(player)
    }

    fn players(&self) -> Vec<PlayerName> {
        (**self).players()
    }
}

impl<R: MatchRegistry + ?Sized> MatchRegistry for &R {
    fn lookup(&self, match_date: NaiveDate) -> Option<MatchContext> {
        (**self).lookup(match_date)
    }
}

impl<R: PlayerRegistry + ?Sized> PlayerRegistry for std::sync::Arc<R> {
    fn exists(&self, player: &PlayerName) -> bool {
        (**self).exists(player)
    }

    fn players(&self) -> Vec<PlayerName> {
        (**self).players()
    }
}

impl<R: MatchRegistry + ?Sized> MatchRegistry for std::sync::Arc<R> {
    fn lookup(&self, match_date: NaiveDate) -> Option<MatchContext> {
        (**self).lookup(match_date)
    }
}

impl PlayerRegistry for [PlayerName] {
    fn exists(&self, player: &PlayerName) -> bool {
        self.contains(player)
    }

    fn players(&self) -> Vec<PlayerName> {
        self.to_vec()
    }
}

impl PlayerRegistry for Vec<PlayerName> {
    fn exists(&self, player: &PlayerName) -> bool {
        self.as_slice().exists(player)
    }

    fn players(&self) -> Vec<PlayerName> {
        self.clone()
    }
}
