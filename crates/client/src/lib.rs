//! workshop_client - HTTP Data Store and CLI for the workshop scheduling API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;
pub mod store;

pub use client::WorkshopClient;
pub use error::{ClientError, Result};
pub use store::HttpDataStore;
