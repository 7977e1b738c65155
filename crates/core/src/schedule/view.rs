//! Loaded schedule views and the state that displays them.

use serde::Serialize;

use crate::booking::RecordKind;

use super::event::{CalendarEvent, EventResource};
use super::filter::{matches_filters, ScheduleFilter};
use super::scope::{is_visible, CallerIdentity};
use super::window::ViewWindow;

/// The result of one `load_view` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub events: Vec<CalendarEvent>,
    /// True when the caller may not edit anything shown.
    pub read_only: bool,
    pub window: ViewWindow,
    /// Monotonic load counter used to discard superseded results.
    pub generation: u64,
    /// Record kinds whose fetch failed during this load.
    pub failed: Vec<RecordKind>,
    /// The caller and constraints the events were selected with.
    pub identity: CallerIdentity,
    pub filter: ScheduleFilter,
    pub search_text: String,
}

impl ScheduleView {
    pub fn events_of(&self, kind: RecordKind) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }

    /// True when `event` would have been loaded into this view.
    fn admits(&self, event: &CalendarEvent) -> bool {
        let selected = match &event.resource {
            EventResource::Reservation(reservation) => {
                is_visible(&self.identity, reservation)
                    && matches_filters(reservation, &self.filter, &self.search_text)
            }
            EventResource::RepairJob(job) => {
                is_visible(&self.identity, job)
                    && matches_filters(job, &self.filter, &self.search_text)
            }
        };
        selected && self.window.date_range().overlaps(event.start, event.end)
    }
}

/// Outcome of offering a view to [`ScheduleViewState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer load was issued after this one; the view was dropped.
    Superseded,
}

/// The view currently on screen.
#[derive(Debug, Clone, Default)]
pub struct ScheduleViewState {
    current: Option<ScheduleView>,
}

impl ScheduleViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ScheduleView> {
        self.current.as_ref()
    }

    /// Installs `view` if it belongs to the newest load issued.
    ///
    /// For each kind listed in `view.failed`, events of that kind from the
    /// previous view are kept when they still overlap the new window and
    /// still pass the new view's scope and filters.
    pub fn apply(&mut self, mut view: ScheduleView, latest_generation: u64) -> ApplyOutcome {
        let stale_against_current = self
            .current
            .as_ref()
            .is_some_and(|current| current.generation >= view.generation);
        if view.generation != latest_generation || stale_against_current {
            tracing::debug!(
                generation = view.generation,
                latest_generation,
                "Dropping superseded schedule view"
            );
            return ApplyOutcome::Superseded;
        }

        if let Some(previous) = self.current.take() {
            if view.is_partial() {
                let retained: Vec<_> = previous
                    .events
                    .into_iter()
                    .filter(|event| view.failed.contains(&event.kind) && view.admits(event))
                    .collect();
                view.events.extend(retained);
                view.events.sort_by_key(|event| event.start);
            }
        }

        self.current = Some(view);
        ApplyOutcome::Applied
    }
}
