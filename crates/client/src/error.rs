//! Client error types.

use thiserror::Error;
use workshop_core::schedule::ScheduleError;
use workshop_core::storage::{status_code_to_repository_error, RepositoryError};

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl From<RepositoryError> for ClientError {
    fn from(err: RepositoryError) -> Self {
        ClientError::Schedule(err.into())
    }
}

impl ClientError {
    /// Converts a transport-level failure into the Data Store error taxonomy.
    ///
    /// `entity_type` and `id` describe the requested resource.
    pub fn into_repository_error(self, entity_type: &'static str, id: &str) -> RepositoryError {
        match self {
            ClientError::Request(err) if err.is_decode() => {
                RepositoryError::Serialization(err.to_string())
            }
            ClientError::Request(err) => RepositoryError::ConnectionFailed(err.to_string()),
            ClientError::ServerError { status, message } => {
                status_code_to_repository_error(status, message, entity_type, id)
            }
            ClientError::NotFound { .. } => RepositoryError::not_found(entity_type, id),
            ClientError::Json(err) => RepositoryError::Serialization(err.to_string()),
            ClientError::InvalidInput(message) => RepositoryError::InvalidData(message),
            ClientError::Schedule(ScheduleError::Repository(err)) => err,
            ClientError::Schedule(err) => RepositoryError::InvalidData(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_by_status() {
        let err = ClientError::ServerError {
            status: 409,
            message: "Reservation was modified by someone else".to_string(),
        };
        assert!(matches!(
            err.into_repository_error("Reservation", "abc"),
            RepositoryError::Server { status: 409, .. }
        ));

        let err = ClientError::ServerError {
            status: 401,
            message: "expired".to_string(),
        };
        assert!(err
            .into_repository_error("Reservation", "abc")
            .is_transport());
    }

    #[test]
    fn test_not_found_keeps_entity() {
        let err = ClientError::NotFound {
            resource: "/api/repair-jobs/abc".to_string(),
        };
        assert_eq!(
            err.into_repository_error("RepairJob", "abc"),
            RepositoryError::not_found("RepairJob", "abc")
        );
    }

    #[test]
    fn test_invalid_input_is_invalid_data() {
        let err = ClientError::InvalidInput("bad date".to_string());
        assert_eq!(
            err.into_repository_error("Reservation", ""),
            RepositoryError::InvalidData("bad date".to_string())
        );
    }
}
