//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Matches are entities keyed by their date; goals are keyed by
/// `(match_date, order)` once their score is known.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
