//! Core types, validation, and errors for the launch tracker.

pub mod error;
pub mod limits;
pub mod records;
pub mod submission;

pub use error::{Error, Result};
pub use records::*;
pub use submission::*;
