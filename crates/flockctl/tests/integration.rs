//! Integration tests for flockctl
//!
//! These tests load configuration and snapshot files from disk and run them
//! through the engine at fixed instants.

use flock_api::{HealthStatus, OccupancyTone, PenId, RuleKind, SeasonPhase, Urgency};
use flock_config::{ConfigError, FarmConfig, RecordKind, load_config, load_snapshot};
use flock_core::HerdEngine;
use flock_util::{Locale, parse_instant};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HERD_JSON: &str = r#"{
    "version": 1,
    "pens": [
        { "id": "main", "name": "Main flock", "capacity": "10" },
        { "id": "birthing", "name": "Birthing", "capacity": 0 },
        { "id": "weaning", "name": "Weaning", "capacity": 4 }
    ],
    "animals": [
        { "id": "a1", "tag": "T-01", "gender": "female", "birthDate": "2024-12-19",
          "pen": "main", "status": "sick" },
        { "id": "a2", "tag": "T-02", "sex": "female", "birthDate": "2023-03-01",
          "pen": "main", "expectedDueDate": "2026-01-24" },
        { "id": "a3", "tag": "T-03", "sex": "male", "birthDate": "2025-09-15",
          "pen": "weaning", "purpose": "meat", "weightKg": "31.5" },
        { "id": "a4", "tag": "T-04", "sex": "female", "birthDate": "2023-05-02",
          "pen": "main", "expectedDueDate": "soon" },
        { "id": "a5", "tag": "T-05", "sex": "female", "pen": "main" },
        { "id": "a1", "tag": "T-99", "sex": "female", "birthDate": "2024-01-01", "pen": "main" }
    ],
    "vaccinations": [
        { "id": "v1", "animalId": "a2", "label": "Enterotoxemia", "dueDate": "2026-01-27" },
        { "id": "v2", "animalId": "a3", "label": "Clostridial", "dueDate": "2026-02-20" }
    ]
}"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn english_engine() -> HerdEngine {
    let mut config = FarmConfig::default();
    config.dashboard.locale = Locale::En;
    HerdEngine::new(config)
}

#[test]
fn test_json_snapshot_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "herd.json", HERD_JSON);

    let import = load_snapshot(&path, Locale::En).unwrap();
    assert_eq!(import.snapshot.animals.len(), 4);

    // Missing birth date and duplicate id are rejected
    assert_eq!(import.rejected.len(), 2);
    assert_eq!(import.rejected[0].kind, RecordKind::Animal);
    assert_eq!(import.rejected[0].id.as_deref(), Some("a5"));
    assert_eq!(import.rejected[1].id.as_deref(), Some("a1"));
    assert_eq!(import.rejected[1].row, 6);

    // Malformed due date is dropped, the animal is kept
    let a4 = import.snapshot.animals.iter().find(|a| a.id.as_str() == "a4").unwrap();
    assert!(a4.expected_due_date.is_none());
    assert!(!import.warnings.is_empty());

    let now = parse_instant("2026-01-23 00:00:00").unwrap();
    let view = english_engine().evaluate(&import.snapshot, now);

    let ids: Vec<&str> = view.alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1-isolation", "a3-fattening", "a2-birthing"]);
    assert_eq!(view.alerts[1].due_date.to_string(), "2026-01-23");
    assert_eq!(view.alerts[2].day_offset, 1);
    assert_eq!(view.alerts[2].urgency, Urgency::Soon);
    assert_eq!(view.alerts[2].reason, "approaching birth");

    assert_eq!(view.summary.total_animals, 4);
    assert_eq!(view.summary.ready_today, 2);
    assert_eq!(view.summary.overdue_moves, 0);
    assert_eq!(view.summary.sick_animals, 1);
    assert_eq!(view.summary.upcoming_vaccinations, 1);

    let birthing = view.occupancy.iter().find(|p| p.pen_id == PenId::Birthing).unwrap();
    assert_eq!(birthing.tone, OccupancyTone::Unconfigured);
    let main = view.occupancy.iter().find(|p| p.pen_id == PenId::Main).unwrap();
    assert_eq!(main.head_count, 3);
    assert_eq!(main.percent, Some(30));

    assert_eq!(view.vaccinations[0].tag, "T-02");
    assert_eq!(view.vaccinations[0].day_offset, 4);
}

#[test]
fn test_mid_day_evaluation() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "herd.json", HERD_JSON);
    let import = load_snapshot(&path, Locale::En).unwrap();

    let now = parse_instant("2026-01-23 15:30:00").unwrap();
    let view = english_engine().evaluate(&import.snapshot, now);

    let isolation = view.alerts.iter().find(|a| a.rule == RuleKind::HealthIsolation).unwrap();
    assert_eq!(isolation.day_offset, 0);
    assert_eq!(isolation.urgency, Urgency::DueToday);

    // Fattening was due at midnight today; part of a day has passed
    let fattening = view.alerts.iter().find(|a| a.rule == RuleKind::Fattening).unwrap();
    assert_eq!(fattening.day_offset, -1);
    assert_eq!(fattening.urgency, Urgency::Overdue);

    let birthing = view.alerts.iter().find(|a| a.rule == RuleKind::BirthingProximity).unwrap();
    assert_eq!(birthing.day_offset, 0);

    let offsets: Vec<i64> = view.alerts.iter().map(|a| a.day_offset).collect();
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_toml_config_and_arabic_snapshot() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(
        &dir,
        "farm.toml",
        r#"
config_version = 1

[dashboard]
locale = "ar"
pen_order = ["isolation", "main"]
vaccination_window_days = 3
"#,
    );
    let herd_path = write_file(
        &dir,
        "herd.toml",
        r#"
[[animals]]
id = 1
tag = "ن-01"
sex = "أنثى"
birth_date = "2024-12-19"
pen = "main"
status = "مريض"

[[animals]]
id = 2
tag = "ن-02"
sex = "ذكر"
birth_date = "2025-04-10"
pen = "fattening"
purpose = "فحل"

[breeding_season]
current_start = "2026-01-10"
current_end = "2026-02-28"
next_start = "2026-08-01"
next_end = "2026-09-15"
cycle_days = 17
"#,
    );

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.dashboard.pen_order, vec![PenId::Isolation, PenId::Main]);
    let locale = config.dashboard.locale;

    let import = load_snapshot(&herd_path, locale).unwrap();
    assert!(import.rejected.is_empty(), "{:?}", import.rejected);
    assert_eq!(import.snapshot.animals[0].status, HealthStatus::Sick);
    assert_eq!(import.snapshot.animals[0].id.as_str(), "1");

    let now = parse_instant("2026-01-23 00:00:00").unwrap();
    let view = HerdEngine::new(config).evaluate(&import.snapshot, now);

    let isolation = view.alerts.iter().find(|a| a.rule == RuleKind::HealthIsolation).unwrap();
    assert_eq!(isolation.reason, "عزل صحي");
    assert_eq!(isolation.urgency_label(Locale::Ar), "اليوم");

    // Stud born 2025-04-10 turns 270 days on 2026-01-05
    let stud = view.alerts.iter().find(|a| a.rule == RuleKind::StudReadiness).unwrap();
    assert_eq!(stud.day_offset, -18);
    assert_eq!(stud.urgency_label(Locale::Ar), "متأخر بـ 18 يوم");
    assert_eq!(view.alerts[0].id, stud.id);

    assert_eq!(view.board.len(), 2);
    assert_eq!(view.board[0].pen_id, PenId::Isolation);
    // No pens in the snapshot: Arabic default layout
    assert_eq!(view.occupancy.len(), 8);

    assert!(matches!(
        view.season,
        Some(SeasonPhase::InSeason { ends_in_days: 36, .. })
    ));
}

#[test]
fn test_unsupported_snapshot_version() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "herd.json", r#"{ "version": 2, "animals": [] }"#);

    let err = load_snapshot(&path, Locale::En).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedVersion(2)));
}

#[test]
fn test_unsupported_snapshot_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "herd.csv", "id,tag\n");

    let err = load_snapshot(&path, Locale::En).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_snapshot_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = load_snapshot(dir.path().join("absent.json"), Locale::En).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_evaluation_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "herd.json", HERD_JSON);
    let import = load_snapshot(&path, Locale::En).unwrap();
    let now = parse_instant("2026-01-23 08:00:00").unwrap();
    let engine = english_engine();

    let first = engine.evaluate(&import.snapshot, now);
    let second = engine.evaluate(&import.snapshot, now);
    assert_eq!(first, second);
}
