//! Breeding season phase and estrus forecasting

use chrono::NaiveDate;
use flock_api::{Animal, BreedingSeason, BreedingStatus, EstrusForecast, SeasonPhase, Sex};
use flock_util::shift_date;

use crate::classify_urgency;

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Where `today` falls relative to the current and next season
pub fn season_phase(season: &BreedingSeason, today: NaiveDate) -> SeasonPhase {
    let windows = [
        (season.current_start, season.current_end),
        (season.next_start, season.next_end),
    ];

    for (start, end) in windows {
        if today < start {
            return SeasonPhase::BeforeSeason {
                start,
                starts_in_days: days_between(today, start),
            };
        }
        if today <= end {
            return SeasonPhase::InSeason {
                end,
                ends_in_days: days_between(today, end),
            };
        }
    }

    SeasonPhase::Ended
}

/// First `last + k * cycle_days` with `k >= 1` that is on or after `today`.
///
/// Returns `None` for a zero cycle length.
pub fn next_estrus(last: NaiveDate, cycle_days: u32, today: NaiveDate) -> Option<NaiveDate> {
    if cycle_days == 0 {
        return None;
    }
    let cycle = i64::from(cycle_days);
    let elapsed = days_between(last, today);
    let cycles = if elapsed <= 0 {
        1
    } else {
        (elapsed + cycle - 1) / cycle
    };
    Some(shift_date(last, cycles.saturating_mul(cycle)))
}

/// Next expected heat for every female that is not recorded as bred.
///
/// Offsets are whole calendar days from `today`, so a heat expected today has
/// offset 0. Sorted by offset, ties keep herd order.
pub fn estrus_forecast(
    herd: &[Animal],
    cycle_days: u32,
    today: NaiveDate,
) -> Vec<EstrusForecast> {
    let mut forecasts: Vec<EstrusForecast> = herd
        .iter()
        .filter(|a| a.sex == Sex::Female && a.bred_status != Some(BreedingStatus::Bred))
        .filter_map(|a| {
            let last = a.last_estrus_date?;
            let next = next_estrus(last, cycle_days, today)?;
            let day_offset = days_between(today, next);
            Some(EstrusForecast {
                animal_id: a.id.clone(),
                tag: a.tag.clone(),
                pen_id: a.pen,
                last_estrus: last,
                next_estrus: next,
                day_offset,
                urgency: classify_urgency(day_offset),
            })
        })
        .collect();

    forecasts.sort_by_key(|f| f.day_offset);
    forecasts
}
