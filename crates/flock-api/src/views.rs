//! Derived, read-only views for rendering

use chrono::{DateTime, Local, NaiveDate};
use flock_util::{AnimalId, RecordId};
use serde::{Deserialize, Serialize};

use crate::{
    CleaningTask, FeedPlan, HealthStatus, MovementAlert, PenId, Purpose, Sex, Urgency,
    VaccinationStatus,
};

/// Display classification of pen fill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyTone {
    Ok,
    Warn,
    Danger,
    /// Capacity is zero or missing; no percentage can be computed
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenOccupancy {
    pub pen_id: PenId,
    pub name: String,
    pub head_count: usize,
    pub capacity: u32,
    /// Rounded fill percentage; `None` when capacity is not configured
    pub percent: Option<u32>,
    pub tone: OccupancyTone,
    pub note: Option<String>,
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerdSummary {
    pub total_animals: usize,
    pub ready_today: usize,
    pub overdue_moves: usize,
    pub sick_animals: usize,
    pub upcoming_vaccinations: usize,
}

/// Animal as shown on a board column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalCard {
    pub id: AnimalId,
    pub tag: String,
    pub sex: Sex,
    pub age_days: Option<i64>,
    pub status: HealthStatus,
    pub purpose: Purpose,
    pub weight_kg: Option<f64>,
    pub expected_due_date: Option<NaiveDate>,
    pub days_to_due: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardColumn {
    pub pen_id: PenId,
    pub name: String,
    pub animals: Vec<AnimalCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationRow {
    pub id: RecordId,
    pub animal_id: AnimalId,
    /// Animal tag, or the animal id if the animal is not in the herd
    pub tag: String,
    pub label: String,
    pub due_date: NaiveDate,
    pub day_offset: i64,
    pub urgency: Urgency,
    pub status: VaccinationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickAnimal {
    pub id: AnimalId,
    pub tag: String,
    pub pen_id: PenId,
    pub pen_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub sick_count: usize,
    pub animals: Vec<SickAnimal>,
}

/// Cleaning and feeding work for one pen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenTasks {
    pub pen_id: PenId,
    pub pen_name: String,
    pub cleaning: Vec<CleaningTask>,
    pub feed_plans: Vec<FeedPlan>,
}

/// Where "today" falls relative to the breeding seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SeasonPhase {
    BeforeSeason { start: NaiveDate, starts_in_days: i64 },
    InSeason { end: NaiveDate, ends_in_days: i64 },
    Ended,
}

/// Next expected heat of a non-bred female
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstrusForecast {
    pub animal_id: AnimalId,
    pub tag: String,
    pub pen_id: PenId,
    pub last_estrus: NaiveDate,
    pub next_estrus: NaiveDate,
    pub day_offset: i64,
    pub urgency: Urgency,
}

/// Everything the rendering layer needs for one evaluation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub evaluated_at: DateTime<Local>,
    pub summary: HerdSummary,
    pub occupancy: Vec<PenOccupancy>,
    pub alerts: Vec<MovementAlert>,
    pub board: Vec<BoardColumn>,
    pub vaccinations: Vec<VaccinationRow>,
    pub health: HealthSummary,
    pub pen_tasks: Vec<PenTasks>,
    pub season: Option<SeasonPhase>,
    pub estrus: Vec<EstrusForecast>,
}
