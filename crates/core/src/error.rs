//! Domain error model.

use thiserror::Error;

/// Domain-level error for malformed input.
///
/// Covers failures that happen before any goal validation gate runs: names that
/// are blank, values that do not parse. Goal-specific rejections live with the
/// goal engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A name was blank or otherwise unusable as a registry key.
    #[error("invalid name: {0}")]
    InvalidName(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidName(msg.into())
    }
}
