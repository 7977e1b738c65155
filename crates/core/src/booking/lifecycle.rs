//! Status state machines for reservations and repair jobs.
//!
//! Staff (managers) may set any status by editing a booking; the only refused
//! staff change is cancelling something that is already cancelled. Clients may
//! only cancel, and only from a cancellable status. Mechanic schedules are
//! read-only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ParseRoleError, ParseStatusError, ValidationError};
use super::types::{RecordKind, RepairJobStatus, ReservationStatus};

/// The role of whoever is looking at or mutating the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Mechanic,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Mechanic => "mechanic",
            Role::Client => "client",
        }
    }

    /// Returns true for workshop staff allowed to edit any booking.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "mechanic" => Ok(Role::Mechanic),
            "client" => Ok(Role::Client),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A booking status with a lifecycle.
pub trait StatusLifecycle:
    Copy + Eq + fmt::Display + FromStr<Err = ParseStatusError> + 'static
{
    /// The record kind this status belongs to.
    const KIND: RecordKind;

    /// Status a freshly created booking starts in.
    fn initial(created_by: Role) -> Self;

    /// The cancelled status.
    fn cancelled() -> Self;

    /// Terminal statuses have no workflow step out of them.
    fn is_terminal(self) -> bool;

    /// Whether a client may cancel a booking currently in this status.
    fn client_cancellable(self) -> bool;

    fn name(self) -> &'static str;
}

impl StatusLifecycle for ReservationStatus {
    const KIND: RecordKind = RecordKind::Reservation;

    fn initial(created_by: Role) -> Self {
        if created_by.is_staff() {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Unconfirmed
        }
    }

    fn cancelled() -> Self {
        ReservationStatus::Cancelled
    }

    fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }

    fn client_cancellable(self) -> bool {
        !self.is_terminal()
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl StatusLifecycle for RepairJobStatus {
    const KIND: RecordKind = RecordKind::RepairJob;

    fn initial(_created_by: Role) -> Self {
        RepairJobStatus::Upcoming
    }

    fn cancelled() -> Self {
        RepairJobStatus::Cancelled
    }

    fn is_terminal(self) -> bool {
        matches!(
            self,
            RepairJobStatus::Cancelled | RepairJobStatus::Completed
        )
    }

    fn client_cancellable(self) -> bool {
        self == RepairJobStatus::Upcoming
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

/// Checks whether `role` may move a booking from `current` to `target`.
///
/// Returns the reason when the transition is refused.
pub fn check_transition<S: StatusLifecycle>(
    role: Role,
    current: S,
    target: S,
) -> Result<(), ValidationError> {
    let not_allowed = || ValidationError::TransitionNotAllowed {
        role,
        from: current.name(),
        to: target.name(),
    };

    match role {
        Role::Mechanic => Err(ValidationError::ReadOnly(role)),
        Role::Manager => {
            if current == S::cancelled() && target == S::cancelled() {
                Err(not_allowed())
            } else {
                Ok(())
            }
        }
        Role::Client => {
            if target != S::cancelled() {
                return Err(not_allowed());
            }
            if !current.client_cancellable() {
                return Err(ValidationError::NotCancellable);
            }
            Ok(())
        }
    }
}

/// Returns true when `role` may move a booking from `current` to `target`.
pub fn can_transition<S: StatusLifecycle>(role: Role, current: S, target: S) -> bool {
    check_transition(role, current, target).is_ok()
}

/// Boundary form of [`can_transition`] taking status names.
///
/// Unknown status names are never a legal transition.
pub fn can_transition_named(role: Role, kind: RecordKind, current: &str, target: &str) -> bool {
    fn parsed<S: StatusLifecycle>(role: Role, current: &str, target: &str) -> bool {
        match (current.parse::<S>(), target.parse::<S>()) {
            (Ok(current), Ok(target)) => can_transition(role, current, target),
            _ => false,
        }
    }

    match kind {
        RecordKind::Reservation => parsed::<ReservationStatus>(role, current, target),
        RecordKind::RepairJob => parsed::<RepairJobStatus>(role, current, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_statuses() {
        assert_eq!(
            ReservationStatus::initial(Role::Manager),
            ReservationStatus::Confirmed
        );
        assert_eq!(
            ReservationStatus::initial(Role::Client),
            ReservationStatus::Unconfirmed
        );
        assert_eq!(
            RepairJobStatus::initial(Role::Client),
            RepairJobStatus::Upcoming
        );
    }

    #[test]
    fn test_manager_may_set_any_status() {
        for current in ReservationStatus::ALL {
            for target in ReservationStatus::ALL {
                let expected = !(current == ReservationStatus::Cancelled
                    && target == ReservationStatus::Cancelled);
                assert_eq!(
                    can_transition(Role::Manager, current, target),
                    expected,
                    "{current} -> {target}"
                );
            }
        }
        assert!(can_transition(
            Role::Manager,
            RepairJobStatus::Completed,
            RepairJobStatus::InProgress
        ));
    }

    #[test]
    fn test_client_reservation_cancel() {
        assert!(can_transition(
            Role::Client,
            ReservationStatus::Unconfirmed,
            ReservationStatus::Cancelled
        ));
        assert!(can_transition(
            Role::Client,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled
        ));
        assert_eq!(
            check_transition(
                Role::Client,
                ReservationStatus::Cancelled,
                ReservationStatus::Cancelled
            ),
            Err(ValidationError::NotCancellable)
        );
        assert!(!can_transition(
            Role::Client,
            ReservationStatus::Unconfirmed,
            ReservationStatus::Confirmed
        ));
    }

    #[test]
    fn test_client_repair_job_law() {
        for current in RepairJobStatus::ALL {
            for target in RepairJobStatus::ALL {
                let allowed = can_transition(Role::Client, current, target);
                let expected = current == RepairJobStatus::Upcoming
                    && target == RepairJobStatus::Cancelled;
                assert_eq!(allowed, expected, "{current} -> {target}");
            }
        }
    }

    #[test]
    fn test_client_cannot_cancel_in_progress_job() {
        assert!(!can_transition(
            Role::Client,
            RepairJobStatus::InProgress,
            RepairJobStatus::Cancelled
        ));
        assert_eq!(
            check_transition(
                Role::Client,
                RepairJobStatus::InProgress,
                RepairJobStatus::Cancelled
            ),
            Err(ValidationError::NotCancellable)
        );
    }

    #[test]
    fn test_mechanic_is_read_only() {
        assert_eq!(
            check_transition(
                Role::Mechanic,
                RepairJobStatus::Upcoming,
                RepairJobStatus::InProgress
            ),
            Err(ValidationError::ReadOnly(Role::Mechanic))
        );
    }

    #[test]
    fn test_can_transition_named() {
        assert!(can_transition_named(
            Role::Client,
            RecordKind::RepairJob,
            "upcoming",
            "cancelled"
        ));
        assert!(!can_transition_named(
            Role::Client,
            RecordKind::RepairJob,
            "in_progress",
            "cancelled"
        ));
        assert!(can_transition_named(
            Role::Manager,
            RecordKind::Reservation,
            "Unconfirmed",
            "COMPLETED"
        ));
        assert!(!can_transition_named(
            Role::Manager,
            RecordKind::Reservation,
            "upcoming",
            "cancelled"
        ));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Mechanic".parse::<Role>(), Ok(Role::Mechanic));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(ParseRoleError("admin".to_string()))
        );
    }
}
