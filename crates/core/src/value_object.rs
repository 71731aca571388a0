//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A score of `2-1`
/// is the same score wherever it appears; "advancing" a score produces a new
/// value rather than mutating the old one.
///
/// The trait requires `Clone + PartialEq + Debug` so values can be copied into
/// rejections and log fields freely.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
