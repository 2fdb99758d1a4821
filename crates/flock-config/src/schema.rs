//! Raw schemas (as parsed from TOML or JSON)
//!
//! Field values are deliberately loose: spreadsheets and hand-edited JSON mix
//! numbers, strings and dates freely. Coercion happens in `validation`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw dashboard configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Dashboard display settings
    #[serde(default)]
    pub dashboard: RawDashboardConfig,

    /// Farm pen layout, used when a snapshot carries no pens
    #[serde(default)]
    pub pens: Vec<RawPen>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDashboardConfig {
    /// "en" or "ar"
    pub locale: Option<String>,

    /// Board column ordering by pen id
    pub pen_order: Option<Vec<String>>,

    /// Days ahead counted as an upcoming vaccination
    pub vaccination_window_days: Option<u32>,
}

/// A loosely typed scalar field
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawScalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Unquoted TOML date
    Date(toml::value::Datetime),
}

impl RawScalar {
    /// Trimmed textual form; `None` for blank strings
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            RawScalar::Int(i) => i.to_string(),
            RawScalar::Float(f) => f.to_string(),
            RawScalar::Bool(b) => b.to_string(),
            RawScalar::Text(s) => s.trim().to_string(),
            RawScalar::Date(d) => d.to_string(),
        };
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawScalar::Int(i) => Some(*i as f64),
            RawScalar::Float(f) => Some(*f),
            RawScalar::Text(s) => s.trim().parse().ok(),
            RawScalar::Bool(_) | RawScalar::Date(_) => None,
        }
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Int(i) => write!(f, "{}", i),
            RawScalar::Float(x) => write!(f, "{}", x),
            RawScalar::Bool(b) => write!(f, "{}", b),
            RawScalar::Text(s) => write!(f, "{}", s),
            RawScalar::Date(d) => write!(f, "{}", d),
        }
    }
}

impl From<&str> for RawScalar {
    fn from(s: &str) -> Self {
        RawScalar::Text(s.to_string())
    }
}

impl From<i64> for RawScalar {
    fn from(i: i64) -> Self {
        RawScalar::Int(i)
    }
}

/// Raw herd snapshot document: `{pens, animals, ...}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSnapshot {
    /// Snapshot document version; absent means current
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default)]
    pub pens: Vec<RawPen>,

    #[serde(default)]
    pub animals: Vec<RawAnimal>,

    #[serde(default)]
    pub vaccinations: Vec<RawVaccination>,

    #[serde(default, alias = "cleaningTasks")]
    pub cleaning_tasks: Vec<RawCleaningTask>,

    #[serde(default, alias = "feedPlans")]
    pub feed_plans: Vec<RawFeedPlan>,

    #[serde(default, alias = "breedingSeason")]
    pub breeding_season: Option<RawBreedingSeason>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPen {
    pub id: Option<RawScalar>,
    pub name: Option<RawScalar>,
    pub capacity: Option<RawScalar>,
    pub note: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAnimal {
    pub id: Option<RawScalar>,
    pub tag: Option<RawScalar>,
    #[serde(alias = "gender")]
    pub sex: Option<RawScalar>,
    #[serde(alias = "birthDate")]
    pub birth_date: Option<RawScalar>,
    pub pen: Option<RawScalar>,
    pub status: Option<RawScalar>,
    pub purpose: Option<RawScalar>,
    #[serde(alias = "weightKg")]
    pub weight_kg: Option<RawScalar>,
    #[serde(alias = "expectedDueDate")]
    pub expected_due_date: Option<RawScalar>,
    #[serde(alias = "motherTag")]
    pub mother_tag: Option<RawScalar>,
    #[serde(alias = "fatherTag")]
    pub father_tag: Option<RawScalar>,
    #[serde(alias = "bredStatus")]
    pub bred_status: Option<RawScalar>,
    #[serde(alias = "lastEstrusDate")]
    pub last_estrus_date: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVaccination {
    pub id: Option<RawScalar>,
    #[serde(alias = "animalId")]
    pub animal_id: Option<RawScalar>,
    pub label: Option<RawScalar>,
    #[serde(alias = "dueDate")]
    pub due_date: Option<RawScalar>,
    pub status: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCleaningTask {
    pub id: Option<RawScalar>,
    #[serde(alias = "penId")]
    pub pen_id: Option<RawScalar>,
    #[serde(alias = "dueDate")]
    pub due_date: Option<RawScalar>,
    pub status: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawFeedPlan {
    pub id: Option<RawScalar>,
    #[serde(alias = "penId")]
    pub pen_id: Option<RawScalar>,
    pub ration: Option<RawScalar>,
    pub notes: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBreedingSeason {
    #[serde(alias = "currentStart")]
    pub current_start: Option<RawScalar>,
    #[serde(alias = "currentEnd")]
    pub current_end: Option<RawScalar>,
    #[serde(alias = "nextStart")]
    pub next_start: Option<RawScalar>,
    #[serde(alias = "nextEnd")]
    pub next_end: Option<RawScalar>,
    #[serde(alias = "cycleDays")]
    pub cycle_days: Option<RawScalar>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_camel_case_json_snapshot() {
        let json = r#"{
            "pens": [{ "id": "main", "name": "Main", "capacity": 50 }],
            "animals": [{
                "id": "a2", "tag": "E-780", "gender": "female",
                "birthDate": "2024-07-20", "pen": "main",
                "expectedDueDate": "2026-02-05", "weightKg": 58
            }],
            "feedPlans": [{ "id": "f1", "penId": "main", "ration": "hay" }]
        }"#;

        let raw: RawSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(raw.pens.len(), 1);
        assert_eq!(raw.animals.len(), 1);
        assert_eq!(raw.feed_plans.len(), 1);

        let animal = &raw.animals[0];
        assert_eq!(animal.sex.as_ref().and_then(RawScalar::as_text).as_deref(), Some("female"));
        assert_eq!(animal.weight_kg.as_ref().and_then(RawScalar::as_f64), Some(58.0));
        assert_eq!(
            animal.expected_due_date.as_ref().and_then(RawScalar::as_text).as_deref(),
            Some("2026-02-05")
        );
    }

    #[test]
    fn parse_toml_snapshot_with_loose_values() {
        let toml_str = r#"
            [[pens]]
            id = "weaning"
            capacity = "20"

            [[animals]]
            id = 16
            tag = "H-206"
            sex = "male"
            birth_date = "2025-09-18"
            pen = "weaning"
        "#;

        let raw: RawSnapshot = toml::from_str(toml_str).unwrap();
        assert_eq!(raw.pens[0].capacity.as_ref().and_then(RawScalar::as_f64), Some(20.0));
        assert_eq!(raw.animals[0].id.as_ref().and_then(RawScalar::as_text).as_deref(), Some("16"));
    }

    #[test]
    fn parse_unquoted_toml_date() {
        let toml_str = r#"
            [[animals]]
            id = "a1"
            tag = "T-01"
            sex = "female"
            birth_date = 2024-12-19
            pen = "main"
        "#;

        let raw: RawSnapshot = toml::from_str(toml_str).unwrap();
        let birth = raw.animals[0].birth_date.as_ref().unwrap();
        assert!(matches!(birth, RawScalar::Date(_)));
        assert_eq!(birth.as_text().as_deref(), Some("2024-12-19"));
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(RawScalar::from("   ").as_text(), None);
        assert_eq!(RawScalar::from(" E-501 ").as_text().as_deref(), Some("E-501"));
        assert_eq!(RawScalar::from("abc").as_f64(), None);
    }
}
