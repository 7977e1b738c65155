//! In-memory storage backend.
//!
//! Stores all data in HashMaps wrapped in `Arc<RwLock<_>>`. Data is not persisted
//! and will be lost when the process exits.
//!
//! # Example
//!
//! ```rust,ignore
//! use workshop::storage::InMemoryStore;
//!
//! let store = InMemoryStore::from_seed(generate_seed_data(today));
//! ```

mod repository;

pub use repository::InMemoryStore;
