//! Herd records as consumed by the core

use chrono::NaiveDate;
use flock_util::{AnimalId, FlockError, Locale, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of pen identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PenId {
    Main,
    LatePregnancy,
    Birthing,
    Nursing,
    Weaning,
    Fattening,
    Studs,
    Isolation,
}

impl PenId {
    pub const ALL: [PenId; 8] = [
        PenId::Main,
        PenId::LatePregnancy,
        PenId::Birthing,
        PenId::Nursing,
        PenId::Weaning,
        PenId::Fattening,
        PenId::Studs,
        PenId::Isolation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PenId::Main => "main",
            PenId::LatePregnancy => "latePregnancy",
            PenId::Birthing => "birthing",
            PenId::Nursing => "nursing",
            PenId::Weaning => "weaning",
            PenId::Fattening => "fattening",
            PenId::Studs => "studs",
            PenId::Isolation => "isolation",
        }
    }

    /// Fallback display name when a pen record carries none
    pub fn default_name(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, PenId::Main) => "Main flock pen",
            (Locale::En, PenId::LatePregnancy) => "Late pregnancy pen",
            (Locale::En, PenId::Birthing) => "Birthing boxes",
            (Locale::En, PenId::Nursing) => "Nursing pen",
            (Locale::En, PenId::Weaning) => "Weaning pen",
            (Locale::En, PenId::Fattening) => "Fattening/sale pen",
            (Locale::En, PenId::Studs) => "Stud pen",
            (Locale::En, PenId::Isolation) => "Isolation pen",
            (Locale::Ar, PenId::Main) => "حظيرة القطيع الرئيسي",
            (Locale::Ar, PenId::LatePregnancy) => "حظيرة الحمل المتأخر",
            (Locale::Ar, PenId::Birthing) => "بوكسات ولادة",
            (Locale::Ar, PenId::Nursing) => "حظيرة نفاس/رضاعة",
            (Locale::Ar, PenId::Weaning) => "حظيرة فطام",
            (Locale::Ar, PenId::Fattening) => "حظيرة تسمين/بيع الذكور",
            (Locale::Ar, PenId::Studs) => "حظيرة فحول مستقلة",
            (Locale::Ar, PenId::Isolation) => "حظيرة عزل/مرض",
        }
    }
}

impl fmt::Display for PenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PenId {
    type Err = FlockError;

    /// Accepts camelCase, snake_case and kebab-case spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "main" => Ok(PenId::Main),
            "latepregnancy" => Ok(PenId::LatePregnancy),
            "birthing" => Ok(PenId::Birthing),
            "nursing" => Ok(PenId::Nursing),
            "weaning" => Ok(PenId::Weaning),
            "fattening" => Ok(PenId::Fattening),
            "studs" | "stud" => Ok(PenId::Studs),
            "isolation" => Ok(PenId::Isolation),
            _ => Err(FlockError::unknown_pen(s)),
        }
    }
}

/// Pen record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pen {
    pub id: PenId,
    pub name: String,
    /// Head capacity. Zero means capacity not configured.
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Pen {
    pub fn new(id: PenId, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            note: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Sick,
}

/// Purpose classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    #[default]
    Flock,
    Meat,
    Stud,
    Newborn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingStatus {
    Bred,
    NotBred,
}

/// Animal record
///
/// `birth_date` is mandatory at the import boundary; it is optional here so
/// that directly supplied records without one are still evaluated by the
/// rules that do not depend on age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub tag: String,
    pub sex: Sex,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub pen: PenId,
    #[serde(default)]
    pub status: HealthStatus,
    #[serde(default)]
    pub purpose: Purpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bred_status: Option<BreedingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_estrus_date: Option<NaiveDate>,
}

impl Animal {
    /// A healthy flock animal with no optional fields set
    pub fn new(
        id: impl Into<AnimalId>,
        tag: impl Into<String>,
        sex: Sex,
        birth_date: NaiveDate,
        pen: PenId,
    ) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            sex,
            birth_date: Some(birth_date),
            pen,
            status: HealthStatus::Healthy,
            purpose: Purpose::Flock,
            weight_kg: None,
            expected_due_date: None,
            mother_tag: None,
            father_tag: None,
            bred_status: None,
            last_estrus_date: None,
        }
    }

    pub fn with_status(mut self, status: HealthStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_purpose(mut self, purpose: Purpose) -> Self {
        self.purpose = purpose;
        self
    }

    pub fn with_expected_due_date(mut self, date: NaiveDate) -> Self {
        self.expected_due_date = Some(date);
        self
    }

    pub fn with_last_estrus(mut self, date: NaiveDate, bred: BreedingStatus) -> Self {
        self.last_estrus_date = Some(date);
        self.bred_status = Some(bred);
        self
    }

    pub fn is_sick(&self) -> bool {
        self.status == HealthStatus::Sick
    }
}

/// Vaccination status as recorded by the farm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccinationStatus {
    Upcoming,
    Overdue,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: RecordId,
    pub animal_id: AnimalId,
    pub label: String,
    pub due_date: NaiveDate,
    pub status: VaccinationStatus,
}

/// Cleaning task status as recorded by the farm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Today,
    Overdue,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningTask {
    pub id: RecordId,
    pub pen_id: PenId,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPlan {
    pub id: RecordId,
    pub pen_id: PenId,
    pub ration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Current and next breeding season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingSeason {
    pub current_start: NaiveDate,
    pub current_end: NaiveDate,
    pub next_start: NaiveDate,
    pub next_end: NaiveDate,
    /// Average estrus cycle length
    pub cycle_days: u32,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// A complete, validated herd snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HerdSnapshot {
    #[serde(default)]
    pub pens: Vec<Pen>,
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub vaccinations: Vec<Vaccination>,
    #[serde(default)]
    pub cleaning_tasks: Vec<CleaningTask>,
    #[serde(default)]
    pub feed_plans: Vec<FeedPlan>,
    #[serde(default)]
    pub breeding_season: Option<BreedingSeason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_id_parses_common_spellings() {
        assert_eq!("latePregnancy".parse::<PenId>().unwrap(), PenId::LatePregnancy);
        assert_eq!("late_pregnancy".parse::<PenId>().unwrap(), PenId::LatePregnancy);
        assert_eq!("Late-Pregnancy".parse::<PenId>().unwrap(), PenId::LatePregnancy);
        assert_eq!("isolation".parse::<PenId>().unwrap(), PenId::Isolation);
        assert!(matches!(
            "barn".parse::<PenId>(),
            Err(FlockError::UnknownPen(_))
        ));
    }

    #[test]
    fn pen_id_serializes_camel_case() {
        let json = serde_json::to_string(&PenId::LatePregnancy).unwrap();
        assert_eq!(json, "\"latePregnancy\"");
        for id in PenId::ALL {
            assert_eq!(id.as_str().parse::<PenId>().unwrap(), id);
        }
    }

    #[test]
    fn animal_deserializes_with_defaults() {
        let json = r#"{
            "id": "a1",
            "tag": "E-501",
            "sex": "female",
            "birth_date": "2024-03-10",
            "pen": "main"
        }"#;

        let animal: Animal = serde_json::from_str(json).unwrap();
        assert_eq!(animal.id.as_str(), "a1");
        assert_eq!(animal.status, HealthStatus::Healthy);
        assert_eq!(animal.purpose, Purpose::Flock);
        assert_eq!(animal.birth_date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert!(animal.expected_due_date.is_none());
    }
}
