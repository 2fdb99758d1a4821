//! Shared utilities for the flock dashboard
//!
//! This crate provides:
//! - ID types (AnimalId, RecordId)
//! - Calendar-date arithmetic (age, days until, shifting, display)
//! - Clock access with a mock-time override for development
//! - Error types
//! - Default paths for configuration and herd data

mod dates;
mod error;
mod ids;
mod paths;
mod time;

pub use dates::*;
pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
