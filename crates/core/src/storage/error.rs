use thiserror::Error;

use crate::booking::VersionConflict;

/// Errors that can occur when constructing a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date range: start date must be before or equal to end date")]
    InvalidRange,
}

/// Errors that can occur during Data Store operations.
///
/// `ConnectionFailed`, `Unauthorized` and `Server` are transport failures: the
/// request never produced a usable answer. The rest describe the data itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} {id} was modified by someone else (expected version {expected}, found {actual})")]
    Conflict {
        entity_type: &'static str,
        id: String,
        expected: u64,
        actual: u64,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Not authorized: {0}")]
    Unauthorized(String),
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Builds a conflict error from a failed version check.
    pub fn conflict(entity_type: &'static str, id: impl ToString, conflict: VersionConflict) -> Self {
        RepositoryError::Conflict {
            entity_type,
            id: id.to_string(),
            expected: conflict.expected,
            actual: conflict.actual,
        }
    }

    /// Returns true for network, auth and server failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RepositoryError::ConnectionFailed(_)
                | RepositoryError::Unauthorized(_)
                | RepositoryError::Server { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_error_display() {
        assert_eq!(
            DateRangeError::InvalidRange.to_string(),
            "Invalid date range: start date must be before or equal to end date"
        );
    }

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::not_found("Reservation", "abc-123");
        assert_eq!(error.to_string(), "Reservation not found: abc-123");
        assert!(error.is_not_found());
        assert!(!error.is_transport());
    }

    #[test]
    fn test_repository_error_conflict_display() {
        let error = RepositoryError::conflict(
            "RepairJob",
            "job-1",
            VersionConflict {
                expected: 2,
                actual: 3,
            },
        );
        assert_eq!(
            error.to_string(),
            "RepairJob job-1 was modified by someone else (expected version 2, found 3)"
        );
    }

    #[test]
    fn test_repository_error_server_display() {
        let error = RepositoryError::Server {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(error.to_string(), "Server returned 502: bad gateway");
    }

    #[test]
    fn test_transport_classification() {
        assert!(RepositoryError::ConnectionFailed("timeout after 30s".to_string()).is_transport());
        assert!(RepositoryError::Unauthorized("token expired".to_string()).is_transport());
        assert!(!RepositoryError::InvalidData("date out of range".to_string()).is_transport());
        assert!(!RepositoryError::Serialization("missing field".to_string()).is_transport());
    }
}
