//! Ingestion and aggregation services.
//!
//! Both services receive their record store at construction; nothing here
//! reaches for a global handle.

pub mod aggregation;
pub mod ingestion;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregation::{AggregationService, StatsFailurePolicy};
pub use ingestion::IngestionService;
