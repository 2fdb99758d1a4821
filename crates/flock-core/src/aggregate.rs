//! Aggregation of herd records into display views
//!
//! Everything here is a pure projection of its inputs. Pen ordering for board
//! and task views is always passed in by the caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use flock_api::{
    Animal, AnimalCard, BoardColumn, CleaningTask, FeedPlan, HealthSummary, HerdSummary,
    MovementAlert, OccupancyTone, Pen, PenId, PenOccupancy, PenTasks, SickAnimal, Vaccination,
    VaccinationRow,
};
use flock_util::{age_in_days, days_until};

use crate::classify_urgency;

/// Fill percentage at or above which a pen is shown as full
pub const DANGER_PERCENT: u32 = 90;
/// Fill percentage at or above which a pen is shown as filling up
pub const WARN_PERCENT: u32 = 75;

/// Display name for a pen, falling back to its id
pub fn label_for_pen(pens: &[Pen], id: PenId) -> String {
    pens.iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.as_str().to_string())
}

/// Rounded `head_count / capacity * 100`, half up. `None` for zero capacity.
pub fn occupancy_percent(head_count: usize, capacity: u32) -> Option<u32> {
    if capacity == 0 {
        return None;
    }
    let count = head_count as u64;
    let capacity = u64::from(capacity);
    let percent = (200 * count + capacity) / (2 * capacity);
    Some(u32::try_from(percent).unwrap_or(u32::MAX))
}

pub fn occupancy_tone(percent: Option<u32>) -> OccupancyTone {
    match percent {
        None => OccupancyTone::Unconfigured,
        Some(p) if p >= DANGER_PERCENT => OccupancyTone::Danger,
        Some(p) if p >= WARN_PERCENT => OccupancyTone::Warn,
        Some(_) => OccupancyTone::Ok,
    }
}

/// Occupancy of every pen, in pen list order
pub fn pen_occupancy(pens: &[Pen], herd: &[Animal]) -> Vec<PenOccupancy> {
    pens.iter()
        .map(|pen| {
            let head_count = herd.iter().filter(|a| a.pen == pen.id).count();
            let percent = occupancy_percent(head_count, pen.capacity);
            PenOccupancy {
                pen_id: pen.id,
                name: pen.name.clone(),
                head_count,
                capacity: pen.capacity,
                percent,
                tone: occupancy_tone(percent),
                note: pen.note.clone(),
            }
        })
        .collect()
}

/// Partition the herd by current pen, keeping herd order inside each pen
pub fn group_by_pen(herd: &[Animal]) -> BTreeMap<PenId, Vec<&Animal>> {
    let mut groups: BTreeMap<PenId, Vec<&Animal>> = BTreeMap::new();
    for animal in herd {
        groups.entry(animal.pen).or_default().push(animal);
    }
    groups
}

pub fn animal_card(animal: &Animal, now: &DateTime<Local>) -> AnimalCard {
    AnimalCard {
        id: animal.id.clone(),
        tag: animal.tag.clone(),
        sex: animal.sex,
        age_days: animal.birth_date.map(|born| age_in_days(born, now)),
        status: animal.status,
        purpose: animal.purpose,
        weight_kg: animal.weight_kg,
        expected_due_date: animal.expected_due_date,
        days_to_due: animal.expected_due_date.map(|due| days_until(due, now)),
    }
}

/// One column per pen in `pen_order`.
///
/// Animals in pens missing from the order do not appear on the board.
pub fn board_columns(
    pen_order: &[PenId],
    pens: &[Pen],
    herd: &[Animal],
    now: &DateTime<Local>,
) -> Vec<BoardColumn> {
    let groups = group_by_pen(herd);

    pen_order
        .iter()
        .map(|&pen_id| BoardColumn {
            pen_id,
            name: label_for_pen(pens, pen_id),
            animals: groups
                .get(&pen_id)
                .map(|animals| animals.iter().map(|a| animal_card(a, now)).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Vaccinations with resolved tags and urgency, in input order
pub fn vaccination_rows(
    vaccinations: &[Vaccination],
    herd: &[Animal],
    now: &DateTime<Local>,
) -> Vec<VaccinationRow> {
    vaccinations
        .iter()
        .map(|v| {
            let day_offset = days_until(v.due_date, now);
            let tag = herd
                .iter()
                .find(|a| a.id == v.animal_id)
                .map(|a| a.tag.clone())
                .unwrap_or_else(|| v.animal_id.to_string());

            VaccinationRow {
                id: v.id.clone(),
                animal_id: v.animal_id.clone(),
                tag,
                label: v.label.clone(),
                due_date: v.due_date,
                day_offset,
                urgency: classify_urgency(day_offset),
                status: v.status,
            }
        })
        .collect()
}

pub fn health_summary(herd: &[Animal], pens: &[Pen]) -> HealthSummary {
    let animals: Vec<SickAnimal> = herd
        .iter()
        .filter(|a| a.is_sick())
        .map(|a| SickAnimal {
            id: a.id.clone(),
            tag: a.tag.clone(),
            pen_id: a.pen,
            pen_name: label_for_pen(pens, a.pen),
        })
        .collect();

    HealthSummary {
        sick_count: animals.len(),
        animals,
    }
}

/// Headline counts.
///
/// Upcoming vaccinations are those with a day offset in `[0, window_days]`,
/// whatever their recorded status.
pub fn summarize(
    herd: &[Animal],
    alerts: &[MovementAlert],
    vaccinations: &[VaccinationRow],
    window_days: i64,
) -> HerdSummary {
    HerdSummary {
        total_animals: herd.len(),
        ready_today: alerts.iter().filter(|a| a.day_offset == 0).count(),
        overdue_moves: alerts.iter().filter(|a| a.day_offset < 0).count(),
        sick_animals: herd.iter().filter(|a| a.is_sick()).count(),
        upcoming_vaccinations: vaccinations
            .iter()
            .filter(|v| (0..=window_days).contains(&v.day_offset))
            .count(),
    }
}

/// Cleaning tasks and feed plans per pen, in `pen_order`.
///
/// Pens with no work are left out.
pub fn pen_tasks(
    pen_order: &[PenId],
    pens: &[Pen],
    cleaning: &[CleaningTask],
    feed_plans: &[FeedPlan],
) -> Vec<PenTasks> {
    pen_order
        .iter()
        .filter_map(|&pen_id| {
            let cleaning: Vec<CleaningTask> = cleaning
                .iter()
                .filter(|t| t.pen_id == pen_id)
                .cloned()
                .collect();
            let feed_plans: Vec<FeedPlan> = feed_plans
                .iter()
                .filter(|p| p.pen_id == pen_id)
                .cloned()
                .collect();

            if cleaning.is_empty() && feed_plans.is_empty() {
                return None;
            }

            Some(PenTasks {
                pen_id,
                pen_name: label_for_pen(pens, pen_id),
                cleaning,
                feed_plans,
            })
        })
        .collect()
}
