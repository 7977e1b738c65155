mod error;
mod index;
mod lifecycle;
mod mock_data;
mod requests;
mod types;
mod validation;
mod version;

pub use error::{ParseRoleError, ParseStatusError, ValidationError};
pub use index::ReferenceIndex;
pub use lifecycle::{can_transition, can_transition_named, check_transition, Role, StatusLifecycle};
pub use mock_data::{generate_seed_data, SeedData};
pub use requests::{
    ClientSelection, CreateRepairJobRequest, CreateReservationRequest, NewClient,
    NewReservationRecords, UpdateRepairJobRequest, UpdateReservationRequest,
};
pub use types::{
    BookingStatus, Car, Client, Mechanic, RecordKind, RepairJob, RepairJobStatus, Reservation,
    ReservationStatus, Service,
};
pub use validation::{
    validate_duration, validate_repair_job, validate_repair_job_window, validate_reservation,
    validate_reservation_window, MAX_RESERVATION_MINUTES, MIN_RESERVATION_MINUTES,
};
pub use version::{check_version, next_version, VersionCheck, VersionConflict};
