use thiserror::Error;

use super::lifecycle::Role;
use super::types::RecordKind;

/// Errors raised by local validation, before any Data Store call is made.
///
/// These are always recoverable by correcting the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("End time must be after start time")]
    InvalidOrder,
    #[error("Reservation must last at least 30 minutes")]
    TooShort,
    #[error("Reservation cannot last longer than 120 minutes")]
    TooLong,
    #[error("This booking can no longer be cancelled")]
    NotCancellable,
    #[error("A {role} cannot change the status from {from} to {to}")]
    TransitionNotAllowed {
        role: Role,
        from: &'static str,
        to: &'static str,
    },
    #[error("The {0} schedule is read-only")]
    ReadOnly(Role),
    #[error("A {role} is not allowed to {action}")]
    Forbidden { role: Role, action: &'static str },
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Error returned when a status string does not name a known status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind} status: {value}")]
pub struct ParseStatusError {
    pub kind: RecordKind,
    pub value: String,
}

/// Error returned when a role string does not name a known role.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);
