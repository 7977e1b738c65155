use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use workshop_core::booking::ValidationError;
use workshop_core::schedule::ScheduleError;
use workshop_core::storage::{
    repository_error_to_status_code, validation_error_to_status_code, DateRangeError,
    RepositoryError,
};

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(err) = self.0.downcast_ref::<ScheduleError>() {
            match err {
                ScheduleError::Validation(err) => validation_error_to_status_code(err),
                ScheduleError::Repository(err) => repository_error_to_status_code(err),
            }
        } else if let Some(err) = self.0.downcast_ref::<ValidationError>() {
            validation_error_to_status_code(err)
        } else if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(err)
        } else if self.0.downcast_ref::<DateRangeError>().is_some() {
            400
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = %status_code, error = %self.0, "Request rejected");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::booking::Role;

    #[test]
    fn test_schedule_errors_map_through_their_source() {
        let err = AppError::from(ScheduleError::Validation(ValidationError::TooShort));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::from(ScheduleError::Repository(RepositoryError::not_found(
            "Reservation",
            "abc",
        )));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error_maps_directly() {
        let err = AppError::from(ValidationError::ReadOnly(Role::Mechanic));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unknown_error_is_internal() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
