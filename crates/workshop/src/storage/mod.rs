//! Data Store implementations for the reference backend.

pub mod inmemory;

pub use inmemory::InMemoryStore;
