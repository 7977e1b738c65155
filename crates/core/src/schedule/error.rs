use thiserror::Error;

use crate::booking::ValidationError;
use crate::storage::RepositoryError;

/// Errors returned by coordinator mutations.
///
/// `Validation` errors are raised before the Data Store is contacted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ScheduleError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ScheduleError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
