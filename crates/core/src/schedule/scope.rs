//! Role-based visibility of bookings.
//!
//! Managers see everything. Mechanics see bookings assigned to them, matched by
//! the mechanic snapshot's email or username. Clients see their own bookings,
//! matched by the client snapshot's email.

use serde::{Deserialize, Serialize};

use crate::booking::{Client, Mechanic, RepairJob, Reservation, Role};

/// Who is asking for the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl CallerIdentity {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            email: None,
            username: None,
        }
    }

    pub fn manager() -> Self {
        Self::new(Role::Manager)
    }

    pub fn mechanic(email: impl Into<String>) -> Self {
        Self::new(Role::Mechanic).with_email(email)
    }

    pub fn client(email: impl Into<String>) -> Self {
        Self::new(Role::Client).with_email(email)
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Mechanic views cannot be edited.
    pub fn read_only(&self) -> bool {
        self.role == Role::Mechanic
    }

    /// True when `email` is this caller's email, ignoring case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email()
            .is_some_and(|own| own.eq_ignore_ascii_case(email.trim()))
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn is_mechanic(&self, mechanic: Option<&Mechanic>) -> bool {
        let Some(mechanic) = mechanic else {
            return false;
        };
        let by_email = self
            .email()
            .is_some_and(|email| mechanic.email.trim().eq_ignore_ascii_case(email));
        let by_username = self.username().is_some_and(|username| {
            mechanic
                .username
                .as_deref()
                .is_some_and(|own| own.trim().eq_ignore_ascii_case(username))
        });
        by_email || by_username
    }

    fn is_client(&self, client: Option<&Client>) -> bool {
        client
            .and_then(|c| c.email.as_deref())
            .is_some_and(|own| self.has_email(own))
    }
}

/// A booking with the associations visibility depends on.
pub trait Scoped {
    fn mechanic(&self) -> Option<&Mechanic>;
    fn client(&self) -> Option<&Client>;
}

impl Scoped for Reservation {
    fn mechanic(&self) -> Option<&Mechanic> {
        self.mechanic.as_ref()
    }

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }
}

impl Scoped for RepairJob {
    fn mechanic(&self) -> Option<&Mechanic> {
        self.mechanic.as_ref()
    }

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }
}

/// Returns true if the caller may see the record.
pub fn is_visible<T: Scoped>(identity: &CallerIdentity, record: &T) -> bool {
    match identity.role {
        Role::Manager => true,
        Role::Mechanic => identity.is_mechanic(record.mechanic()),
        Role::Client => identity.is_client(record.client()),
    }
}

/// Keeps the records visible to the caller, in input order.
pub fn scope_records<T: Scoped + Clone>(identity: &CallerIdentity, records: Vec<T>) -> Vec<T> {
    if identity.role == Role::Manager {
        return records;
    }
    records
        .into_iter()
        .filter(|record| is_visible(identity, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marta() -> Mechanic {
        Mechanic::new("Marta Ruiz", "Marta.Ruiz@workshop.test").with_username("marta")
    }

    fn jonas() -> Mechanic {
        Mechanic::new("Jonas Berg", "jonas.berg@workshop.test")
    }

    #[test]
    fn test_manager_sees_everything() {
        let jobs = vec![
            RepairJob::new(None, None).with_mechanic(marta()),
            RepairJob::new(None, None),
        ];

        assert_eq!(scope_records(&CallerIdentity::manager(), jobs.clone()), jobs);
    }

    #[test]
    fn test_mechanic_sees_only_own_records() {
        let own = RepairJob::new(None, None).with_mechanic(marta());
        let other = RepairJob::new(None, None).with_mechanic(jonas());
        let unassigned = RepairJob::new(None, None);

        let scoped = scope_records(
            &CallerIdentity::mechanic("marta.ruiz@WORKSHOP.test"),
            vec![own.clone(), other, unassigned],
        );

        assert_eq!(scoped, vec![own]);
    }

    #[test]
    fn test_mechanic_matches_by_username() {
        let own = Reservation::new(None, None).with_mechanic(marta());
        let identity = CallerIdentity::new(Role::Mechanic).with_username("MARTA");

        assert!(is_visible(&identity, &own));
        assert!(identity.read_only());
    }

    #[test]
    fn test_mechanic_without_identity_sees_nothing() {
        let own = Reservation::new(None, None).with_mechanic(marta());
        let identity = CallerIdentity::new(Role::Mechanic).with_email("  ");

        assert!(!is_visible(&identity, &own));
    }

    #[test]
    fn test_client_sees_own_bookings() {
        let ana = Client::new("Ana").with_email("ana@example.com");
        let bruno = Client::new("Bruno").with_email("bruno@example.com");
        let reservations = vec![
            Reservation::new(None, None).with_client(ana.clone()),
            Reservation::new(None, None).with_client(bruno),
        ];

        let identity = CallerIdentity::client("ANA@example.com");
        let scoped = scope_records(&identity, reservations.clone());

        assert_eq!(scoped, vec![reservations[0].clone()]);
        assert!(!identity.read_only());
    }
}
