//! The scheduling coordinator.
//!
//! Loads both booking collections from the Data Store, scopes them to the caller,
//! filters and projects them into calendar events. Mutations are validated
//! locally before the first Data Store call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::booking::{
    check_transition, validate_repair_job, validate_reservation, CreateRepairJobRequest,
    ClientSelection, CreateReservationRequest, RecordKind, RepairJob, RepairJobStatus, Reservation,
    ReservationStatus, Role, StatusLifecycle, UpdateRepairJobRequest, UpdateReservationRequest,
    ValidationError,
};
use crate::storage::{
    DataStore, ReferenceRepository, RepairJobRepository, RepositoryError, ReservationRepository,
};

use super::error::{Result, ScheduleError};
use super::event::transform_all;
use super::filter::{apply_filters, ScheduleFilter};
use super::notify::{Notification, Notifier, TracingNotifier};
use super::scope::{is_visible, scope_records, CallerIdentity};
use super::view::ScheduleView;
use super::window::{Direction, ViewWindow};

pub struct SchedulingCoordinator {
    store: Arc<dyn DataStore>,
    notifier: Arc<dyn Notifier>,
    generation: AtomicU64,
}

impl SchedulingCoordinator {
    /// Creates a coordinator that reports notifications through tracing.
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            notifier: Arc::new(TracingNotifier),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &Arc<dyn DataStore> {
        &self.store
    }

    /// The generation of the most recently started load.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Loads the schedule visible to `identity` inside `window`.
    ///
    /// Reservations and repair jobs are fetched concurrently. If one fetch
    /// fails, that kind contributes no events, a warning notification is
    /// raised and the kind is listed in `failed`; the other kind still renders.
    pub async fn load_view(
        &self,
        identity: &CallerIdentity,
        filter: &ScheduleFilter,
        search_text: &str,
        window: ViewWindow,
    ) -> ScheduleView {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (reservations, repair_jobs) = tokio::join!(
            self.store.list_reservations(),
            self.store.list_repair_jobs()
        );

        let mut failed = Vec::new();
        let reservations = reservations.unwrap_or_else(|err| {
            self.report_fetch_failure(RecordKind::Reservation, &err);
            failed.push(RecordKind::Reservation);
            Vec::new()
        });
        let repair_jobs = repair_jobs.unwrap_or_else(|err| {
            self.report_fetch_failure(RecordKind::RepairJob, &err);
            failed.push(RecordKind::RepairJob);
            Vec::new()
        });

        let reservations = apply_filters(
            &scope_records(identity, reservations),
            filter,
            search_text,
        );
        let repair_jobs = apply_filters(&scope_records(identity, repair_jobs), filter, search_text);

        let range = window.date_range();
        let events: Vec<_> = transform_all(&reservations, &repair_jobs)
            .into_iter()
            .filter(|event| range.overlaps(event.start, event.end))
            .collect();

        tracing::debug!(
            generation,
            role = %identity.role,
            granularity = %window.granularity,
            events = events.len(),
            failed = failed.len(),
            "Loaded schedule view"
        );

        ScheduleView {
            events,
            read_only: identity.read_only(),
            window,
            generation,
            failed,
            identity: identity.clone(),
            filter: filter.clone(),
            search_text: search_text.to_string(),
        }
    }

    /// Loads the neighbouring window.
    pub async fn navigate(
        &self,
        identity: &CallerIdentity,
        filter: &ScheduleFilter,
        search_text: &str,
        window: ViewWindow,
        direction: Direction,
    ) -> ScheduleView {
        self.load_view(identity, filter, search_text, window.navigate(direction))
            .await
    }

    fn report_fetch_failure(&self, kind: RecordKind, err: &RepositoryError) {
        let what = match kind {
            RecordKind::Reservation => "Reservations",
            RecordKind::RepairJob => "Repair jobs",
        };
        tracing::warn!(kind = %kind, error = %err, "Failed to fetch bookings");
        self.notifier.notify(Notification::warning(
            format!("{what} unavailable"),
            format!("{what} could not be loaded: {err}"),
        ));
    }

    // Reservations

    pub async fn create_reservation(
        &self,
        identity: &CallerIdentity,
        mut request: CreateReservationRequest,
    ) -> Result<Reservation> {
        let role = identity.role;
        ensure_writable(role).inspect_err(log_rejection)?;
        request.validate().inspect_err(log_rejection)?;
        if role == Role::Client {
            self.ensure_own_client(identity, &mut request.client).await?;
        }

        request.status = match role {
            Role::Client => Some(ReservationStatus::initial(role)),
            _ => Some(request.status.unwrap_or(ReservationStatus::initial(role))),
        };

        let reservation = self.store.create_reservation(&request).await?;
        tracing::info!(id = %reservation.id, %role, status = %reservation.status, "Created reservation");
        Ok(reservation)
    }

    /// Clients may only book for themselves. A new client registered by a
    /// client takes the caller's email when none is given.
    async fn ensure_own_client(
        &self,
        identity: &CallerIdentity,
        selection: &mut ClientSelection,
    ) -> Result<()> {
        let owned = match selection {
            ClientSelection::Existing { client_id, .. } => self
                .store
                .list_clients()
                .await?
                .iter()
                .find(|client| client.id == *client_id)
                .and_then(|client| client.email.as_deref())
                .is_some_and(|email| identity.has_email(email)),
            ClientSelection::New(client) => {
                if client.email.is_none() {
                    client.email = identity.email.as_deref().map(|own| own.trim().to_string());
                }
                client
                    .email
                    .as_deref()
                    .is_some_and(|email| identity.has_email(email))
            }
        };
        if !owned {
            return Err(forbidden(identity.role, "book for another client"));
        }
        Ok(())
    }

    pub async fn update_reservation(
        &self,
        identity: &CallerIdentity,
        id: Uuid,
        mut request: UpdateReservationRequest,
    ) -> Result<Reservation> {
        let role = identity.role;
        ensure_writable(role).inspect_err(log_rejection)?;
        if role == Role::Client && !is_status_only_reservation_edit(&request) {
            return Err(forbidden(role, "edit booking details"));
        }

        let current = self
            .store
            .get_reservation(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Reservation", id))?;
        if !is_visible(identity, &current) {
            return Err(forbidden(role, "edit another client's booking"));
        }

        if let Some(target) = request.status {
            check_transition(role, current.status, target).inspect_err(log_rejection)?;
        }
        if request.visit_start.is_some() || request.visit_end.is_some() {
            validate_reservation(&request.preview(&current)).inspect_err(log_rejection)?;
        }
        if request.expected_version.is_none() {
            request.expected_version = Some(current.version);
        }

        let updated = self.store.update_reservation(id, &request).await?;
        tracing::info!(%id, %role, status = %updated.status, version = updated.version, "Updated reservation");
        Ok(updated)
    }

    /// Cancels a reservation. Cancelling never deletes.
    pub async fn cancel_reservation(
        &self,
        identity: &CallerIdentity,
        id: Uuid,
        expected_version: Option<u64>,
    ) -> Result<Reservation> {
        let mut request = UpdateReservationRequest::status(ReservationStatus::Cancelled);
        request.expected_version = expected_version;
        self.update_reservation(identity, id, request).await
    }

    /// Deletes a reservation. Managers only.
    pub async fn delete_reservation(&self, identity: &CallerIdentity, id: Uuid) -> Result<()> {
        ensure_can_delete(identity.role).inspect_err(log_rejection)?;
        self.store.delete_reservation(id).await?;
        tracing::info!(%id, "Deleted reservation");
        Ok(())
    }

    /// Looks up a reservation for a detail view.
    ///
    /// A missing id, or one the caller may not see, is `Ok(None)`.
    pub async fn reservation_detail(
        &self,
        identity: &CallerIdentity,
        id: Uuid,
    ) -> std::result::Result<Option<Reservation>, RepositoryError> {
        match self.store.get_reservation(id).await {
            Ok(found) => Ok(found.filter(|reservation| is_visible(identity, reservation))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    // Repair jobs

    pub async fn create_repair_job(
        &self,
        identity: &CallerIdentity,
        mut request: CreateRepairJobRequest,
    ) -> Result<RepairJob> {
        let role = identity.role;
        ensure_writable(role).inspect_err(log_rejection)?;
        if !role.is_staff() {
            return Err(forbidden(role, "create repair jobs"));
        }
        request.validate().inspect_err(log_rejection)?;
        request.status = Some(request.status.unwrap_or(RepairJobStatus::initial(role)));

        let job = self.store.create_repair_job(&request).await?;
        tracing::info!(id = %job.id, %role, status = %job.status, "Created repair job");
        Ok(job)
    }

    pub async fn update_repair_job(
        &self,
        identity: &CallerIdentity,
        id: Uuid,
        mut request: UpdateRepairJobRequest,
    ) -> Result<RepairJob> {
        let role = identity.role;
        ensure_writable(role).inspect_err(log_rejection)?;
        if role == Role::Client && !is_status_only_repair_job_edit(&request) {
            return Err(forbidden(role, "edit booking details"));
        }

        let current = self
            .store
            .get_repair_job(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("RepairJob", id))?;
        if !is_visible(identity, &current) {
            return Err(forbidden(role, "edit another client's booking"));
        }

        if let Some(target) = request.status {
            check_transition(role, current.status, target).inspect_err(log_rejection)?;
        }
        if request.start.is_some() || request.end.is_some() {
            validate_repair_job(&request.preview(&current)).inspect_err(log_rejection)?;
        }
        if request.expected_version.is_none() {
            request.expected_version = Some(current.version);
        }

        let updated = self.store.update_repair_job(id, &request).await?;
        tracing::info!(%id, %role, status = %updated.status, version = updated.version, "Updated repair job");
        Ok(updated)
    }

    /// Cancels a repair job. Clients may only cancel upcoming jobs.
    pub async fn cancel_repair_job(
        &self,
        identity: &CallerIdentity,
        id: Uuid,
        expected_version: Option<u64>,
    ) -> Result<RepairJob> {
        let mut request = UpdateRepairJobRequest::status(RepairJobStatus::Cancelled);
        request.expected_version = expected_version;
        self.update_repair_job(identity, id, request).await
    }

    /// Deletes a repair job. Managers only.
    pub async fn delete_repair_job(&self, identity: &CallerIdentity, id: Uuid) -> Result<()> {
        ensure_can_delete(identity.role).inspect_err(log_rejection)?;
        self.store.delete_repair_job(id).await?;
        tracing::info!(%id, "Deleted repair job");
        Ok(())
    }

    /// Looks up a repair job for a detail view. Missing is `Ok(None)`.
    pub async fn repair_job_detail(
        &self,
        identity: &CallerIdentity,
        id: Uuid,
    ) -> std::result::Result<Option<RepairJob>, RepositoryError> {
        match self.store.get_repair_job(id).await {
            Ok(found) => Ok(found.filter(|job| is_visible(identity, job))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn ensure_writable(role: Role) -> std::result::Result<(), ValidationError> {
    if role == Role::Mechanic {
        return Err(ValidationError::ReadOnly(role));
    }
    Ok(())
}

fn ensure_can_delete(role: Role) -> std::result::Result<(), ValidationError> {
    ensure_writable(role)?;
    if !role.is_staff() {
        return Err(ValidationError::Forbidden {
            role,
            action: "delete bookings",
        });
    }
    Ok(())
}

fn forbidden(role: Role, action: &'static str) -> ScheduleError {
    let err = ValidationError::Forbidden { role, action };
    log_rejection(&err);
    err.into()
}

fn log_rejection(err: &ValidationError) {
    tracing::debug!(error = %err, "Rejected booking change");
}

fn is_status_only_reservation_edit(request: &UpdateReservationRequest) -> bool {
    *request
        == UpdateReservationRequest {
            status: request.status,
            expected_version: request.expected_version,
            ..Default::default()
        }
}

fn is_status_only_repair_job_edit(request: &UpdateRepairJobRequest) -> bool {
    *request
        == UpdateRepairJobRequest {
            status: request.status,
            expected_version: request.expected_version,
            ..Default::default()
        }
}
