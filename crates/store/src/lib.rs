//! SQLite record store for the launch tracker.

pub mod client;
pub mod config;
pub mod health;
pub mod insert;
pub mod query;
pub mod record_store;
pub mod schema;

pub use client::*;
pub use config::*;
pub use record_store::RecordStore;
