//! workshop_core - scheduling and booking-lifecycle engine for the workshop dashboard.
//!
//! The `booking` and `schedule` modules are the functional core: pure functions over
//! plain data. Only [`schedule::SchedulingCoordinator`] touches the Data Store boundary
//! defined in [`storage`].

pub mod booking;
pub mod schedule;
pub mod serde;
pub mod storage;
