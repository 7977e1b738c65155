mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{DateRangeError, RepositoryError, Result};
pub use http_mapping::{
    repository_error_to_status_code, status_code_to_repository_error,
    validation_error_to_status_code, EMAIL_HEADER, ROLE_HEADER, USERNAME_HEADER,
};
pub use traits::{DataStore, RepairJobRepository, ReferenceRepository, ReservationRepository};
pub use types::DateRange;
