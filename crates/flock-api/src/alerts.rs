//! Movement alerts and urgency tiers

use chrono::NaiveDate;
use flock_util::{AnimalId, Locale};
use serde::{Deserialize, Serialize};

use crate::PenId;

/// Urgency tier derived from a signed day offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueToday,
    Soon,
    Later,
}

impl Urgency {
    /// Human phrase for this tier at the given offset
    pub fn label(&self, day_offset: i64, locale: Locale) -> String {
        match (locale, self) {
            (Locale::En, Urgency::Overdue) => format!("{} days late", day_offset.abs()),
            (Locale::En, Urgency::DueToday) => "today".to_string(),
            (Locale::En, Urgency::Soon | Urgency::Later) => format!("in {} days", day_offset),
            (Locale::Ar, Urgency::Overdue) => format!("متأخر بـ {} يوم", day_offset.abs()),
            (Locale::Ar, Urgency::DueToday) => "اليوم".to_string(),
            (Locale::Ar, Urgency::Soon | Urgency::Later) => format!("بعد {} يوم", day_offset),
        }
    }
}

/// Which movement rule produced an alert, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    HealthIsolation,
    BirthingProximity,
    LatePregnancy,
    Weaning,
    Fattening,
    StudReadiness,
    MainFlock,
}

impl RuleKind {
    pub fn reason(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, RuleKind::HealthIsolation) => "health isolation",
            (Locale::En, RuleKind::BirthingProximity) => "approaching birth",
            (Locale::En, RuleKind::LatePregnancy) => "late pregnancy",
            (Locale::En, RuleKind::Weaning) => "weaning age (~70 days)",
            (Locale::En, RuleKind::Fattening) => "fattening/sale of males",
            (Locale::En, RuleKind::StudReadiness) => "ready for stud duty",
            (Locale::En, RuleKind::MainFlock) => "join main flock",
            (Locale::Ar, RuleKind::HealthIsolation) => "عزل صحي",
            (Locale::Ar, RuleKind::BirthingProximity) => "قرب موعد الولادة",
            (Locale::Ar, RuleKind::LatePregnancy) => "حمل متأخر",
            (Locale::Ar, RuleKind::Weaning) => "عمر فطام (≈ 70 يوم)",
            (Locale::Ar, RuleKind::Fattening) => "تسمين/بيع الذكور",
            (Locale::Ar, RuleKind::StudReadiness) => "جاهز للفحول",
            (Locale::Ar, RuleKind::MainFlock) => "انضمام للقطيع الرئيسي",
        }
    }
}

/// Recommendation to move an animal to another pen by a due date.
///
/// Rebuilt from scratch on every evaluation; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementAlert {
    /// `<animal id>-<target pen>`
    pub id: String,
    pub animal_id: AnimalId,
    pub tag: String,
    pub from: PenId,
    pub to: PenId,
    pub rule: RuleKind,
    pub reason: String,
    pub due_date: NaiveDate,
    pub day_offset: i64,
    pub urgency: Urgency,
}

impl MovementAlert {
    pub fn urgency_label(&self, locale: Locale) -> String {
        self.urgency.label(self.day_offset, locale)
    }
}

/// Format a head count for display, e.g. `12 head` / `12 رأس`
pub fn head_count_label(count: usize, locale: Locale) -> String {
    match locale {
        Locale::En => format!("{} head", count),
        Locale::Ar => format!("{} رأس", count),
    }
}
