//! Clock access for flock
//!
//! The rule engine never reads the clock; callers obtain "now" here once and
//! pass it down explicitly.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `FLOCK_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for replaying a herd snapshot
//! as of a past or future day.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2026-01-23 08:00:00`)
//!
//! Example:
//! ```bash
//! FLOCK_MOCK_TIME="2026-01-23 08:00:00" flockctl --herd herd.json
//! ```

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::sync::OnceLock;

use crate::{FlockError, Result};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "FLOCK_MOCK_TIME";

/// Format accepted for mock time and `--now` overrides
pub const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match parse_instant(&mock_time_str) {
                    Ok(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(chrono::Local::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    Err(e) => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = INSTANT_FORMAT,
                            error = %e,
                            "Invalid mock time"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Parse a local `YYYY-MM-DD HH:MM:SS` instant.
pub fn parse_instant(s: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), INSTANT_FORMAT)
        .map_err(|_| FlockError::invalid_date(s))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| FlockError::invalid_date(s))
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(INSTANT_FORMAT).to_string()
}
