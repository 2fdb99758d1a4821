//! Rule engine and aggregation for the flock dashboard
//!
//! This crate turns a validated herd snapshot and an instant into views:
//! - Movement alerts from an ordered rule table
//! - Urgency tiers for signed day offsets
//! - Occupancy, summary counts and per-pen groupings
//! - Breeding season phase and estrus forecast

mod aggregate;
mod breeding;
mod engine;
mod rules;
mod urgency;

pub use aggregate::*;
pub use breeding::*;
pub use engine::*;
pub use rules::*;
pub use urgency::*;
