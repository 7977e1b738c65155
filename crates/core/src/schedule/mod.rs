//! Schedule assembly: turning stored bookings into a role-scoped calendar view.

mod coordinator;
mod error;
mod event;
mod filter;
mod notify;
mod scope;
mod view;
mod window;

pub use coordinator::SchedulingCoordinator;
pub use error::{Result, ScheduleError};
pub use event::{
    transform_all, CalendarEvent, EventResource, DEFAULT_REPAIR_JOB_MINUTES,
    DEFAULT_RESERVATION_MINUTES,
};
pub use filter::{
    active_filter_count, apply_filters, has_active_filters, matches_filters, Filterable,
    ScheduleFilter,
};
pub use notify::{CollectingNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use scope::{is_visible, scope_records, CallerIdentity, Scoped};
pub use view::{ApplyOutcome, ScheduleView, ScheduleViewState};
pub use window::{
    default_max_time, default_min_time, Direction, Granularity, ParseGranularityError, ViewWindow,
};
