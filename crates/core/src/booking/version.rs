//! Optimistic concurrency for booking updates.
//!
//! Every stored booking carries a `version` that the store bumps on each write.
//! An update may name the version it was based on; if the stored record has moved
//! on since, the update is rejected instead of silently overwriting the other
//! session's edit. Updates that name no version overwrite (last write wins).
//!
//! This is part of the Functional Core - all functions are pure with no side effects.

use thiserror::Error;

/// The stored record changed after the caller read it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Version conflict: expected {expected}, found {actual}")]
pub struct VersionConflict {
    pub expected: u64,
    pub actual: u64,
}

/// Outcome of comparing a stored version with the one an update was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    /// The update was based on the stored version.
    Current,
    /// The update named no version.
    Unchecked,
    /// The stored version moved on.
    Stale(VersionConflict),
}

impl VersionCheck {
    /// Converts the check into a result, treating unchecked updates as accepted.
    pub fn into_result(self) -> Result<(), VersionConflict> {
        match self {
            VersionCheck::Current | VersionCheck::Unchecked => Ok(()),
            VersionCheck::Stale(conflict) => Err(conflict),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, VersionCheck::Stale(_))
    }
}

/// Compares the stored version with the version an update expects.
///
/// # Examples
///
/// ```
/// use workshop_core::booking::{check_version, VersionCheck};
///
/// assert_eq!(check_version(3, Some(3)), VersionCheck::Current);
/// assert_eq!(check_version(3, None), VersionCheck::Unchecked);
/// assert!(check_version(4, Some(3)).is_stale());
/// ```
pub fn check_version(stored: u64, expected: Option<u64>) -> VersionCheck {
    match expected {
        None => VersionCheck::Unchecked,
        Some(expected) if expected == stored => VersionCheck::Current,
        Some(expected) => VersionCheck::Stale(VersionConflict {
            expected,
            actual: stored,
        }),
    }
}

/// The version a record gets after a successful write.
pub fn next_version(stored: u64) -> u64 {
    stored.saturating_add(1)
}
