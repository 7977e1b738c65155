//! Pure functions for mapping repository errors to and from HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`RepositoryError`] variants,
//! following the Functional Core pattern - pure functions with no side effects.

use crate::booking::ValidationError;

use super::RepositoryError;

/// Header carrying the caller's role (`manager`, `mechanic` or `client`).
pub const ROLE_HEADER: &str = "x-workshop-role";
/// Header carrying the caller's email, used for record scoping.
pub const EMAIL_HEADER: &str = "x-workshop-email";
/// Header carrying the caller's username, used for mechanic scoping.
pub const USERNAME_HEADER: &str = "x-workshop-username";

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Conflict` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `Unauthorized` -> 401 (Unauthorized)
/// - `Server` -> the upstream status
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use workshop_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("Reservation", "abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::Conflict { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::Unauthorized(_) => 401,
        RepositoryError::Server { status, .. } => *status,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Maps a [`ValidationError`] to an HTTP status code.
///
/// - `ReadOnly`, `Forbidden` -> 403 (Forbidden)
/// - `NotCancellable`, `TransitionNotAllowed` -> 409 (Conflict)
/// - duration and missing-field errors -> 422 (Unprocessable Entity)
pub fn validation_error_to_status_code(error: &ValidationError) -> u16 {
    match error {
        ValidationError::ReadOnly(_) | ValidationError::Forbidden { .. } => 403,
        ValidationError::NotCancellable | ValidationError::TransitionNotAllowed { .. } => 409,
        ValidationError::InvalidOrder
        | ValidationError::TooShort
        | ValidationError::TooLong
        | ValidationError::MissingField(_) => 422,
    }
}

/// Maps a non-2xx HTTP response to a [`RepositoryError`].
///
/// Used by HTTP Data Store clients. `entity_type` and `id` describe the resource
/// that was requested, for the not-found case.
pub fn status_code_to_repository_error(
    status: u16,
    message: String,
    entity_type: &'static str,
    id: &str,
) -> RepositoryError {
    match status {
        400 | 422 => RepositoryError::InvalidData(message),
        401 | 403 => RepositoryError::Unauthorized(message),
        404 => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        _ => RepositoryError::Server { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::not_found("Reservation", "res-123");
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Client",
            id: "client-456".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);

        let error = RepositoryError::Conflict {
            entity_type: "RepairJob",
            id: "job-1".to_string(),
            expected: 1,
            actual: 2,
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("connection refused".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_server_error_keeps_upstream_status() {
        let error = RepositoryError::Server {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 502);
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = RepositoryError::InvalidData("visit_end is malformed".to_string());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_validation_errors_map_by_cause() {
        use crate::booking::Role;

        assert_eq!(validation_error_to_status_code(&ValidationError::TooShort), 422);
        assert_eq!(validation_error_to_status_code(&ValidationError::NotCancellable), 409);
        assert_eq!(
            validation_error_to_status_code(&ValidationError::ReadOnly(Role::Mechanic)),
            403
        );
    }

    #[test]
    fn test_status_code_to_repository_error() {
        assert_eq!(
            status_code_to_repository_error(404, String::new(), "RepairJob", "job-9"),
            RepositoryError::not_found("RepairJob", "job-9")
        );
        assert!(matches!(
            status_code_to_repository_error(401, "expired".to_string(), "RepairJob", "job-9"),
            RepositoryError::Unauthorized(_)
        ));
        assert_eq!(
            status_code_to_repository_error(500, "boom".to_string(), "Reservation", ""),
            RepositoryError::Server {
                status: 500,
                message: "boom".to_string()
            }
        );
    }
}
