pub mod error;
pub mod health;
pub mod references;
pub mod repair_jobs;
pub mod reservations;
pub mod schedule;

pub use error::AppError;
