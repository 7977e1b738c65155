//! Application state.
//!
//! Shared by all request handlers: the Data Store, the scheduling coordinator
//! built on top of it, and the loaded configuration.

use std::sync::Arc;

use chrono::Utc;
use workshop_core::booking::generate_seed_data;
use workshop_core::schedule::SchedulingCoordinator;

use crate::config::Config;
use crate::storage::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub coordinator: Arc<SchedulingCoordinator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: InMemoryStore, config: Config) -> Self {
        let store = Arc::new(store);
        let coordinator = Arc::new(SchedulingCoordinator::new(store.clone()));

        Self {
            store,
            coordinator,
            config: Arc::new(config),
        }
    }

    /// Creates state holding demo data spread around today.
    pub fn with_demo_data(config: Config) -> Self {
        let seed = generate_seed_data(Utc::now().date_naive());
        tracing::info!(
            clients = seed.clients.len(),
            reservations = seed.reservations.len(),
            repair_jobs = seed.repair_jobs.len(),
            "Seeding demo data"
        );
        Self::new(InMemoryStore::from_seed(seed), config)
    }

    /// Creates state as the configuration asks, seeded or empty.
    pub fn from_config(config: Config) -> Self {
        if config.seed_demo_data {
            Self::with_demo_data(config)
        } else {
            Self::new(InMemoryStore::new(), config)
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryStore::new(), Config::default())
    }
}
