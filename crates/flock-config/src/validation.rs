//! Import validation and field coercion
//!
//! Every raw record is either converted into a typed record (possibly with
//! field warnings for dropped optional values) or rejected with the full list
//! of reasons. Rejections never abort the import of other records.

use chrono::NaiveDate;
use flock_api::{
    Animal, BreedingSeason, BreedingStatus, CleaningTask, FeedPlan, HealthStatus, HerdSnapshot,
    Pen, PenId, Purpose, Sex, TaskStatus, Vaccination, VaccinationStatus,
};
use flock_util::{AnimalId, Locale, RecordId, parse_calendar_date};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::schema::{
    RawAnimal, RawBreedingSeason, RawCleaningTask, RawConfig, RawFeedPlan, RawPen, RawScalar,
    RawSnapshot, RawVaccination,
};

/// Kind of record a validation message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Pen,
    Animal,
    Vaccination,
    CleaningTask,
    FeedPlan,
    BreedingSeason,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Pen => "pen",
            RecordKind::Animal => "animal",
            RecordKind::Vaccination => "vaccination",
            RecordKind::CleaningTask => "cleaning task",
            RecordKind::FeedPlan => "feed plan",
            RecordKind::BreedingSeason => "breeding season",
        };
        write!(f, "{}", name)
    }
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} '{record}': missing required field `{field}`")]
    MissingField {
        kind: RecordKind,
        record: String,
        field: &'static str,
    },

    #[error("{kind} '{record}': invalid `{field}` value {value:?}: {message}")]
    InvalidField {
        kind: RecordKind,
        record: String,
        field: &'static str,
        value: String,
        message: String,
    },

    #[error("Duplicate {kind} ID: {id}")]
    DuplicateId { kind: RecordKind, id: String },

    #[error("Unknown pen id: {0}")]
    UnknownPen(String),

    #[error("Pen listed twice in pen_order: {0}")]
    DuplicatePenOrder(PenId),

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Global config error: {0}")]
    GlobalError(String),
}

/// A raw record that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub kind: RecordKind,
    /// 1-based position in its source list
    pub row: usize,
    pub id: Option<String>,
    pub reasons: Vec<ValidationError>,
}

/// Outcome of importing a raw snapshot
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub snapshot: HerdSnapshot,
    pub rejected: Vec<RejectedRecord>,
    /// Optional fields that were dropped from otherwise valid records
    pub warnings: Vec<ValidationError>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.warnings.is_empty()
    }
}

/// Validate a raw dashboard configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(locale) = &config.dashboard.locale
        && locale.parse::<Locale>().is_err()
    {
        errors.push(ValidationError::InvalidLocale(locale.clone()));
    }

    if let Some(order) = &config.dashboard.pen_order {
        let mut seen = HashSet::new();
        for name in order {
            match name.parse::<PenId>() {
                Ok(id) => {
                    if !seen.insert(id) {
                        errors.push(ValidationError::DuplicatePenOrder(id));
                    }
                }
                Err(_) => errors.push(ValidationError::UnknownPen(name.clone())),
            }
        }
    }

    // Pens in the config file are farm layout: unlike imported data, any
    // defect is an error rather than a dropped record.
    let mut seen_pens = HashSet::new();
    for (idx, raw) in config.pens.iter().enumerate() {
        match convert_pen(raw, idx + 1, Locale::default()) {
            Ok((pen, warnings)) => {
                errors.extend(warnings);
                if !seen_pens.insert(pen.id) {
                    errors.push(ValidationError::DuplicateId {
                        kind: RecordKind::Pen,
                        id: pen.id.to_string(),
                    });
                }
            }
            Err(reasons) => errors.extend(reasons),
        }
    }

    errors
}

/// Convert a raw snapshot into typed records, dropping what cannot be used
pub fn import_snapshot(raw: RawSnapshot, locale: Locale) -> ImportReport {
    let mut report = ImportReport::default();

    report.snapshot.pens = import_list(
        &raw.pens,
        RecordKind::Pen,
        |r| r.id.as_ref(),
        |r, row| convert_pen(r, row, locale),
        |p| p.id.to_string(),
        &mut report,
    );
    report.snapshot.animals = import_list(
        &raw.animals,
        RecordKind::Animal,
        |r| r.id.as_ref(),
        convert_animal,
        |a| a.id.to_string(),
        &mut report,
    );
    report.snapshot.vaccinations = import_list(
        &raw.vaccinations,
        RecordKind::Vaccination,
        |r| r.id.as_ref(),
        convert_vaccination,
        |v| v.id.to_string(),
        &mut report,
    );
    report.snapshot.cleaning_tasks = import_list(
        &raw.cleaning_tasks,
        RecordKind::CleaningTask,
        |r| r.id.as_ref(),
        convert_cleaning_task,
        |t| t.id.to_string(),
        &mut report,
    );
    report.snapshot.feed_plans = import_list(
        &raw.feed_plans,
        RecordKind::FeedPlan,
        |r| r.id.as_ref(),
        convert_feed_plan,
        |p| p.id.to_string(),
        &mut report,
    );

    if let Some(season) = &raw.breeding_season {
        match convert_breeding_season(season) {
            Ok(season) => report.snapshot.breeding_season = Some(season),
            Err(reasons) => {
                warn!(reasons = reasons.len(), "Dropping invalid breeding season");
                report.rejected.push(RejectedRecord {
                    kind: RecordKind::BreedingSeason,
                    row: 1,
                    id: None,
                    reasons,
                });
            }
        }
    }

    report
}

type Converted<T> = Result<(T, Vec<ValidationError>), Vec<ValidationError>>;

fn import_list<R, T>(
    raws: &[R],
    kind: RecordKind,
    raw_id: impl Fn(&R) -> Option<&RawScalar>,
    convert: impl Fn(&R, usize) -> Converted<T>,
    key: impl Fn(&T) -> String,
    report: &mut ImportReport,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raws.len());

    for (idx, raw) in raws.iter().enumerate() {
        let row = idx + 1;
        let id = raw_id(raw).and_then(RawScalar::as_text);

        let reasons = match convert(raw, row) {
            Ok((record, warnings)) => {
                if seen.insert(key(&record)) {
                    for warning in &warnings {
                        warn!(record = %kind, row, warning = %warning, "Dropping invalid field");
                    }
                    report.warnings.extend(warnings);
                    out.push(record);
                    continue;
                }
                vec![ValidationError::DuplicateId {
                    kind,
                    id: key(&record),
                }]
            }
            Err(reasons) => reasons,
        };

        warn!(
            record = %kind,
            row,
            id = id.as_deref().unwrap_or("-"),
            reasons = reasons.len(),
            "Dropping invalid record"
        );
        report.rejected.push(RejectedRecord {
            kind,
            row,
            id,
            reasons,
        });
    }

    out
}

/// Collects per-field outcomes for one record
struct FieldCheck {
    kind: RecordKind,
    record: String,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl FieldCheck {
    fn new(kind: RecordKind, id: Option<&RawScalar>, row: usize) -> Self {
        let record = id
            .and_then(RawScalar::as_text)
            .unwrap_or_else(|| format!("#{}", row));
        Self {
            kind,
            record,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn missing(&self, field: &'static str) -> ValidationError {
        ValidationError::MissingField {
            kind: self.kind,
            record: self.record.clone(),
            field,
        }
    }

    fn invalid(&self, field: &'static str, value: &RawScalar, message: &str) -> ValidationError {
        ValidationError::InvalidField {
            kind: self.kind,
            record: self.record.clone(),
            field,
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    /// Mandatory text field
    fn text(&mut self, field: &'static str, value: Option<&RawScalar>) -> Option<String> {
        let text = value.and_then(RawScalar::as_text);
        if text.is_none() {
            let err = self.missing(field);
            self.errors.push(err);
        }
        text
    }

    /// Mandatory field parsed with `parse`
    fn required<T>(
        &mut self,
        field: &'static str,
        value: Option<&RawScalar>,
        parse: impl Fn(&str) -> Option<T>,
        message: &str,
    ) -> Option<T> {
        let Some(raw) = value.filter(|v| v.as_text().is_some()) else {
            let err = self.missing(field);
            self.errors.push(err);
            return None;
        };
        let parsed = raw.as_text().and_then(|t| parse(&t));
        if parsed.is_none() {
            let err = self.invalid(field, raw, message);
            self.errors.push(err);
        }
        parsed
    }

    /// Optional field; unparsable values are dropped with a warning
    fn optional<T>(
        &mut self,
        field: &'static str,
        value: Option<&RawScalar>,
        parse: impl Fn(&RawScalar) -> Option<T>,
        message: &str,
    ) -> Option<T> {
        let raw = value.filter(|v| v.as_text().is_some())?;
        let parsed = parse(raw);
        if parsed.is_none() {
            let warning = self.invalid(field, raw, message);
            self.warnings.push(warning);
        }
        parsed
    }

    fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Converted<T> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        match build() {
            Some(record) => Ok((record, self.warnings)),
            None => Err(vec![ValidationError::GlobalError(format!(
                "{} '{}' could not be built",
                self.kind, self.record
            ))]),
        }
    }
}

const DATE_MESSAGE: &str = "expected YYYY-MM-DD";

fn date(text: &str) -> Option<NaiveDate> {
    parse_calendar_date(text).ok()
}

fn scalar_date(raw: &RawScalar) -> Option<NaiveDate> {
    raw.as_text().and_then(|t| date(&t))
}

fn parse_pen_id(text: &str) -> Option<PenId> {
    text.parse().ok()
}

/// Lift a text vocabulary parser to a loose scalar
fn via_text<T>(parse: fn(&str) -> Option<T>) -> impl Fn(&RawScalar) -> Option<T> {
    move |raw: &RawScalar| raw.as_text().and_then(|t| parse(&t))
}

fn scalar_text(raw: &RawScalar) -> Option<String> {
    raw.as_text()
}

fn convert_pen(raw: &RawPen, row: usize, locale: Locale) -> Converted<Pen> {
    let mut check = FieldCheck::new(RecordKind::Pen, raw.id.as_ref(), row);

    let id = check.required("id", raw.id.as_ref(), parse_pen_id, "unknown pen");
    let name = raw.name.as_ref().and_then(RawScalar::as_text);
    let note = raw.note.as_ref().and_then(RawScalar::as_text);

    let capacity = match &raw.capacity {
        Some(value) => match value.as_f64() {
            Some(c) if c >= 1.0 && c <= u32::MAX as f64 => c.round() as u32,
            _ => {
                let warning = check.invalid("capacity", value, "expected a positive number");
                check.warnings.push(warning);
                0
            }
        },
        None => {
            let warning = check.missing("capacity");
            check.warnings.push(warning);
            0
        }
    };

    check.finish(|| {
        let id = id?;
        Some(Pen {
            id,
            name: name.unwrap_or_else(|| id.default_name(locale).to_string()),
            capacity,
            note,
        })
    })
}

fn convert_animal(raw: &RawAnimal, row: usize) -> Converted<Animal> {
    let mut check = FieldCheck::new(RecordKind::Animal, raw.id.as_ref(), row);

    let id = check.text("id", raw.id.as_ref());
    let tag = check.text("tag", raw.tag.as_ref());
    let birth_date = check.required("birth_date", raw.birth_date.as_ref(), date, DATE_MESSAGE);
    let pen = check.required("pen", raw.pen.as_ref(), parse_pen_id, "unknown pen");
    let sex = check.required("sex", raw.sex.as_ref(), parse_sex, "expected male or female");

    let status = check
        .optional(
            "status",
            raw.status.as_ref(),
            via_text(parse_health),
            "expected healthy or sick",
        )
        .unwrap_or_default();
    let purpose = check
        .optional(
            "purpose",
            raw.purpose.as_ref(),
            via_text(parse_purpose),
            "expected flock, meat, stud or newborn",
        )
        .unwrap_or_default();
    let weight_kg = check.optional(
        "weight_kg",
        raw.weight_kg.as_ref(),
        |r| r.as_f64().filter(|w| w.is_finite() && *w > 0.0),
        "expected a positive number",
    );
    let expected_due_date = check.optional(
        "expected_due_date",
        raw.expected_due_date.as_ref(),
        scalar_date,
        DATE_MESSAGE,
    );
    let last_estrus_date = check.optional(
        "last_estrus_date",
        raw.last_estrus_date.as_ref(),
        scalar_date,
        DATE_MESSAGE,
    );
    let bred_status = check.optional(
        "bred_status",
        raw.bred_status.as_ref(),
        via_text(parse_bred),
        "expected bred or not-bred",
    );
    let mother_tag = check.optional("mother_tag", raw.mother_tag.as_ref(), scalar_text, "");
    let father_tag = check.optional("father_tag", raw.father_tag.as_ref(), scalar_text, "");

    check.finish(|| {
        Some(Animal {
            id: AnimalId::new(id?),
            tag: tag?,
            sex: sex?,
            birth_date: Some(birth_date?),
            pen: pen?,
            status,
            purpose,
            weight_kg,
            expected_due_date,
            mother_tag,
            father_tag,
            bred_status,
            last_estrus_date,
        })
    })
}

fn convert_vaccination(raw: &RawVaccination, row: usize) -> Converted<Vaccination> {
    let mut check = FieldCheck::new(RecordKind::Vaccination, raw.id.as_ref(), row);

    let id = check.text("id", raw.id.as_ref());
    let animal_id = check.text("animal_id", raw.animal_id.as_ref());
    let label = check.text("label", raw.label.as_ref());
    let due_date = check.required("due_date", raw.due_date.as_ref(), date, DATE_MESSAGE);
    let status = check
        .optional(
            "status",
            raw.status.as_ref(),
            via_text(parse_vaccination_status),
            "expected upcoming, overdue or done",
        )
        .unwrap_or(VaccinationStatus::Upcoming);

    check.finish(|| {
        Some(Vaccination {
            id: RecordId::new(id?),
            animal_id: AnimalId::new(animal_id?),
            label: label?,
            due_date: due_date?,
            status,
        })
    })
}

fn convert_cleaning_task(raw: &RawCleaningTask, row: usize) -> Converted<CleaningTask> {
    let mut check = FieldCheck::new(RecordKind::CleaningTask, raw.id.as_ref(), row);

    let id = check.text("id", raw.id.as_ref());
    let pen_id = check.required("pen_id", raw.pen_id.as_ref(), parse_pen_id, "unknown pen");
    let due_date = check.required("due_date", raw.due_date.as_ref(), date, DATE_MESSAGE);
    let status = check
        .optional(
            "status",
            raw.status.as_ref(),
            via_text(parse_task_status),
            "expected today, overdue or upcoming",
        )
        .unwrap_or(TaskStatus::Upcoming);

    check.finish(|| {
        Some(CleaningTask {
            id: RecordId::new(id?),
            pen_id: pen_id?,
            due_date: due_date?,
            status,
        })
    })
}

fn convert_feed_plan(raw: &RawFeedPlan, row: usize) -> Converted<FeedPlan> {
    let mut check = FieldCheck::new(RecordKind::FeedPlan, raw.id.as_ref(), row);

    let id = check.text("id", raw.id.as_ref());
    let pen_id = check.required("pen_id", raw.pen_id.as_ref(), parse_pen_id, "unknown pen");
    let ration = check.text("ration", raw.ration.as_ref());
    let notes = raw.notes.as_ref().and_then(RawScalar::as_text);

    check.finish(|| {
        Some(FeedPlan {
            id: RecordId::new(id?),
            pen_id: pen_id?,
            ration: ration?,
            notes,
        })
    })
}

fn convert_breeding_season(
    raw: &RawBreedingSeason,
) -> Result<BreedingSeason, Vec<ValidationError>> {
    let mut check = FieldCheck::new(RecordKind::BreedingSeason, None, 1);

    let current_start = check.required(
        "current_start",
        raw.current_start.as_ref(),
        date,
        DATE_MESSAGE,
    );
    let current_end = check.required("current_end", raw.current_end.as_ref(), date, DATE_MESSAGE);
    let next_start = check.required("next_start", raw.next_start.as_ref(), date, DATE_MESSAGE);
    let next_end = check.required("next_end", raw.next_end.as_ref(), date, DATE_MESSAGE);
    let cycle_days = check.required(
        "cycle_days",
        raw.cycle_days.as_ref(),
        |t| t.parse::<u32>().ok().filter(|d| *d > 0),
        "expected a positive whole number of days",
    );

    if let (Some(start), Some(end)) = (current_start, current_end)
        && end < start
    {
        check.errors.push(ValidationError::GlobalError(
            "current season ends before it starts".into(),
        ));
    }
    if let (Some(start), Some(end)) = (next_start, next_end)
        && end < start
    {
        check.errors.push(ValidationError::GlobalError(
            "next season ends before it starts".into(),
        ));
    }

    let notes = raw.notes.clone();
    check
        .finish(|| {
            Some(BreedingSeason {
                current_start: current_start?,
                current_end: current_end?,
                next_start: next_start?,
                next_end: next_end?,
                cycle_days: cycle_days?,
                notes,
            })
        })
        .map(|(season, _)| season)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

/// Parse sex from English or Arabic vocabulary
pub fn parse_sex(s: &str) -> Option<Sex> {
    match normalize(s).as_str() {
        "male" | "m" | "ram" | "ذكر" => Some(Sex::Male),
        "female" | "f" | "ewe" | "أنثى" | "انثى" => Some(Sex::Female),
        _ => None,
    }
}

pub fn parse_health(s: &str) -> Option<HealthStatus> {
    match normalize(s).as_str() {
        "healthy" | "ok" | "سليم" => Some(HealthStatus::Healthy),
        "sick" | "ill" | "مريض" => Some(HealthStatus::Sick),
        _ => None,
    }
}

pub fn parse_purpose(s: &str) -> Option<Purpose> {
    match normalize(s).as_str() {
        "flock" | "herd" | "قطيع" => Some(Purpose::Flock),
        "meat" | "لحم" => Some(Purpose::Meat),
        "stud" | "فحل" => Some(Purpose::Stud),
        "newborn" | "lamb" | "مواليد" => Some(Purpose::Newborn),
        _ => None,
    }
}

pub fn parse_bred(s: &str) -> Option<BreedingStatus> {
    match normalize(s).as_str() {
        "bred" | "ملقحة" => Some(BreedingStatus::Bred),
        "not-bred" | "notbred" | "open" | "غير-ملقحة" => Some(BreedingStatus::NotBred),
        _ => None,
    }
}

pub fn parse_vaccination_status(s: &str) -> Option<VaccinationStatus> {
    match normalize(s).as_str() {
        "upcoming" | "soon" | "قريب" => Some(VaccinationStatus::Upcoming),
        "overdue" | "late" | "متأخر" => Some(VaccinationStatus::Overdue),
        "done" | "تم" => Some(VaccinationStatus::Done),
        _ => None,
    }
}

pub fn parse_task_status(s: &str) -> Option<TaskStatus> {
    match normalize(s).as_str() {
        "today" | "اليوم" => Some(TaskStatus::Today),
        "overdue" | "late" | "متأخر" => Some(TaskStatus::Overdue),
        "upcoming" | "soon" | "قريب" => Some(TaskStatus::Upcoming),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawDashboardConfig;

    fn raw_animal(id: &str, pen: &str) -> RawAnimal {
        RawAnimal {
            id: Some(id.into()),
            tag: Some(format!("T-{}", id).as_str().into()),
            sex: Some("female".into()),
            birth_date: Some("2025-06-12".into()),
            pen: Some(pen.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(parse_sex("ذكر"), Some(Sex::Male));
        assert_eq!(parse_sex("Female"), Some(Sex::Female));
        assert_eq!(parse_health("مريض"), Some(HealthStatus::Sick));
        assert_eq!(parse_purpose("لحم"), Some(Purpose::Meat));
        assert_eq!(parse_bred("غير ملقحة"), Some(BreedingStatus::NotBred));
        assert_eq!(parse_bred("not_bred"), Some(BreedingStatus::NotBred));
        assert_eq!(parse_vaccination_status("تم"), Some(VaccinationStatus::Done));
        assert_eq!(parse_task_status("اليوم"), Some(TaskStatus::Today));
        assert_eq!(parse_sex("unknown"), None);
    }

    #[test]
    fn test_valid_animal_imports() {
        let raw = RawSnapshot {
            animals: vec![raw_animal("a1", "latePregnancy")],
            ..Default::default()
        };

        let report = import_snapshot(raw, Locale::En);
        assert!(report.is_clean());
        let animal = &report.snapshot.animals[0];
        assert_eq!(animal.pen, PenId::LatePregnancy);
        assert_eq!(animal.status, HealthStatus::Healthy);
        assert_eq!(animal.purpose, Purpose::Flock);
    }

    #[test]
    fn test_unquoted_toml_birth_date_imports() {
        let raw: RawSnapshot = toml::from_str(
            r#"
            [[animals]]
            id = "a1"
            tag = "T-01"
            sex = "female"
            birth_date = 2024-12-19
            pen = "main"
        "#,
        )
        .unwrap();

        let report = import_snapshot(raw, Locale::En);
        assert!(report.is_clean());
        assert_eq!(
            report.snapshot.animals[0].birth_date,
            NaiveDate::from_ymd_opt(2024, 12, 19)
        );
    }

    #[test]
    fn test_missing_mandatory_fields_reject_record() {
        let mut no_birth = raw_animal("a2", "main");
        no_birth.birth_date = None;
        let mut bad_pen = raw_animal("a3", "barn");
        bad_pen.tag = None;

        let raw = RawSnapshot {
            animals: vec![raw_animal("a1", "main"), no_birth, bad_pen],
            ..Default::default()
        };

        let report = import_snapshot(raw, Locale::En);
        assert_eq!(report.snapshot.animals.len(), 1);
        assert_eq!(report.rejected.len(), 2);

        let rejected = &report.rejected[1];
        assert_eq!(rejected.row, 3);
        assert_eq!(rejected.id.as_deref(), Some("a3"));
        assert_eq!(rejected.reasons.len(), 2);
        assert!(
            rejected
                .reasons
                .iter()
                .any(|r| matches!(r, ValidationError::MissingField { field: "tag", .. }))
        );
        assert!(
            rejected
                .reasons
                .iter()
                .any(|r| matches!(r, ValidationError::InvalidField { field: "pen", .. }))
        );
    }

    #[test]
    fn test_malformed_optional_field_is_dropped() {
        let mut animal = raw_animal("a1", "main");
        animal.expected_due_date = Some("2026-02-31".into());
        animal.weight_kg = Some("heavy".into());

        let raw = RawSnapshot {
            animals: vec![animal],
            ..Default::default()
        };

        let report = import_snapshot(raw, Locale::En);
        assert_eq!(report.snapshot.animals.len(), 1);
        assert!(report.snapshot.animals[0].expected_due_date.is_none());
        assert!(report.snapshot.animals[0].weight_kg.is_none());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut second = raw_animal("a1", "weaning");
        second.tag = Some("OTHER".into());

        let raw = RawSnapshot {
            animals: vec![raw_animal("a1", "main"), second],
            ..Default::default()
        };

        let report = import_snapshot(raw, Locale::En);
        assert_eq!(report.snapshot.animals.len(), 1);
        assert_eq!(report.snapshot.animals[0].pen, PenId::Main);
        assert!(matches!(
            report.rejected[0].reasons[0],
            ValidationError::DuplicateId { kind: RecordKind::Animal, .. }
        ));
    }

    #[test]
    fn test_pen_capacity_coercion() {
        let raw = RawSnapshot {
            pens: vec![
                RawPen {
                    id: Some("main".into()),
                    capacity: Some("50".into()),
                    ..Default::default()
                },
                RawPen {
                    id: Some("birthing".into()),
                    capacity: Some(RawScalar::Int(0)),
                    ..Default::default()
                },
                RawPen {
                    name: Some("Nameless".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let report = import_snapshot(raw, Locale::En);
        assert_eq!(report.snapshot.pens.len(), 2);
        assert_eq!(report.snapshot.pens[0].capacity, 50);
        assert_eq!(report.snapshot.pens[0].name, "Main flock pen");
        assert_eq!(report.snapshot.pens[1].capacity, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].kind, RecordKind::Pen);
    }

    #[test]
    fn test_breeding_season_validation() {
        let raw = RawSnapshot {
            breeding_season: Some(RawBreedingSeason {
                current_start: Some("2025-08-15".into()),
                current_end: Some("2025-02-15".into()),
                next_start: Some("2026-08-10".into()),
                next_end: Some("2027-02-10".into()),
                cycle_days: Some(RawScalar::Int(17)),
                notes: vec![],
            }),
            ..Default::default()
        };

        let report = import_snapshot(raw, Locale::En);
        assert!(report.snapshot.breeding_season.is_none());
        assert_eq!(report.rejected[0].kind, RecordKind::BreedingSeason);
    }

    #[test]
    fn test_config_validation() {
        let config = RawConfig {
            config_version: 1,
            dashboard: RawDashboardConfig {
                locale: Some("fr".into()),
                pen_order: Some(vec!["main".into(), "main".into(), "barn".into()]),
                vaccination_window_days: None,
            },
            pens: vec![],
        };

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidLocale(_))));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicatePenOrder(PenId::Main))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownPen(_))));
    }
}
