//! Record shapes for the flock dashboard
//!
//! This crate defines the types exchanged between the data supply, the rule
//! engine and rendering:
//! - Herd records (pens, animals, vaccinations, tasks, feed plans, breeding season)
//! - Movement alerts and urgency tiers
//! - Derived views (occupancy, summary counts, board columns)

mod alerts;
mod types;
mod views;

pub use alerts::*;
pub use types::*;
pub use views::*;

/// Current snapshot document version
pub const SNAPSHOT_VERSION: u32 = 1;
