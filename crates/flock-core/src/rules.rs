//! Movement rules
//!
//! Each rule is a row in [`MOVEMENT_RULES`]: a target pen plus a predicate
//! that, when it fires, yields the due date of the move. Rules are evaluated
//! per animal in table order and are additive, except that the two pregnancy
//! rules are mutually exclusive: late pregnancy is only considered when the
//! birthing move does not apply, i.e. the birth is not within
//! [`BIRTHING_WINDOW_DAYS`] or the ewe is already in the birthing pen.

use chrono::{DateTime, Local, NaiveDate};
use flock_api::{Animal, MovementAlert, PenId, Purpose, RuleKind, Sex};
use flock_util::{Locale, age_in_days, days_until, shift_date};
use tracing::{debug, trace};

use crate::classify_urgency;

/// Days to expected birth at or below which the ewe goes to the birthing boxes
pub const BIRTHING_WINDOW_DAYS: i64 = 2;
/// Days to expected birth at or below which the ewe goes to late pregnancy
pub const LATE_PREGNANCY_WINDOW_DAYS: i64 = 10;
/// Late-pregnancy moves are due this many days before the expected birth
pub const LATE_PREGNANCY_LEAD_DAYS: i64 = 7;
pub const WEANING_MIN_AGE_DAYS: i64 = 60;
pub const WEANING_MAX_AGE_DAYS: i64 = 120;
pub const WEANING_TARGET_AGE_DAYS: i64 = 70;
pub const FATTENING_MIN_AGE_DAYS: i64 = 120;
pub const FATTENING_TARGET_AGE_DAYS: i64 = 130;
pub const STUD_AGE_DAYS: i64 = 270;
pub const MAIN_FLOCK_AGE_DAYS: i64 = 240;

/// Everything a rule may look at for one animal, computed once per pass
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub animal: &'a Animal,
    pub today: NaiveDate,
    /// `None` when the animal has no birth date
    pub age_days: Option<i64>,
    /// `None` when no (valid) expected due date is recorded
    pub days_to_due: Option<i64>,
}

impl<'a> RuleContext<'a> {
    pub fn new(animal: &'a Animal, now: &DateTime<Local>) -> Self {
        Self {
            animal,
            today: now.date_naive(),
            age_days: animal.birth_date.map(|born| age_in_days(born, now)),
            days_to_due: animal.expected_due_date.map(|due| days_until(due, now)),
        }
    }

    fn birth_plus(&self, days: i64) -> Option<NaiveDate> {
        self.animal.birth_date.map(|born| shift_date(born, days))
    }
}

/// When a fired rule's move is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    /// Act now: due today with offset 0 regardless of the time of day
    Immediate(NaiveDate),
    On(NaiveDate),
}

/// One row of the rule table
#[derive(Debug, Clone, Copy)]
pub struct MovementRule {
    pub kind: RuleKind,
    pub target: PenId,
    fires: fn(&RuleContext<'_>) -> Option<Due>,
}

impl MovementRule {
    /// Evaluate this rule; animals already in the target pen never fire.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Due> {
        if ctx.animal.pen == self.target {
            return None;
        }
        (self.fires)(ctx)
    }
}

/// Rules in evaluation order
pub const MOVEMENT_RULES: [MovementRule; 7] = [
    MovementRule {
        kind: RuleKind::HealthIsolation,
        target: PenId::Isolation,
        fires: health_isolation,
    },
    MovementRule {
        kind: RuleKind::BirthingProximity,
        target: PenId::Birthing,
        fires: birthing_proximity,
    },
    MovementRule {
        kind: RuleKind::LatePregnancy,
        target: PenId::LatePregnancy,
        fires: late_pregnancy,
    },
    MovementRule {
        kind: RuleKind::Weaning,
        target: PenId::Weaning,
        fires: weaning,
    },
    MovementRule {
        kind: RuleKind::Fattening,
        target: PenId::Fattening,
        fires: fattening,
    },
    MovementRule {
        kind: RuleKind::StudReadiness,
        target: PenId::Studs,
        fires: stud_readiness,
    },
    MovementRule {
        kind: RuleKind::MainFlock,
        target: PenId::Main,
        fires: main_flock,
    },
];

fn health_isolation(ctx: &RuleContext<'_>) -> Option<Due> {
    ctx.animal.is_sick().then_some(Due::Immediate(ctx.today))
}

fn birth_is_imminent(ctx: &RuleContext<'_>, days_to_due: i64) -> bool {
    days_to_due <= BIRTHING_WINDOW_DAYS && ctx.animal.pen != PenId::Birthing
}

fn birthing_proximity(ctx: &RuleContext<'_>) -> Option<Due> {
    let due = ctx.animal.expected_due_date?;
    birth_is_imminent(ctx, ctx.days_to_due?).then_some(Due::On(due))
}

fn late_pregnancy(ctx: &RuleContext<'_>) -> Option<Due> {
    let due = ctx.animal.expected_due_date?;
    let days = ctx.days_to_due?;
    if birth_is_imminent(ctx, days) || days > LATE_PREGNANCY_WINDOW_DAYS {
        return None;
    }
    Some(Due::On(shift_date(due, -LATE_PREGNANCY_LEAD_DAYS)))
}

fn weaning(ctx: &RuleContext<'_>) -> Option<Due> {
    let age = ctx.age_days?;
    if !(WEANING_MIN_AGE_DAYS..WEANING_MAX_AGE_DAYS).contains(&age) {
        return None;
    }
    ctx.birth_plus(WEANING_TARGET_AGE_DAYS).map(Due::On)
}

fn fattening(ctx: &RuleContext<'_>) -> Option<Due> {
    let age = ctx.age_days?;
    let animal = ctx.animal;
    if age < FATTENING_MIN_AGE_DAYS || animal.sex != Sex::Male || animal.purpose != Purpose::Meat {
        return None;
    }
    ctx.birth_plus(FATTENING_TARGET_AGE_DAYS).map(Due::On)
}

fn stud_readiness(ctx: &RuleContext<'_>) -> Option<Due> {
    let age = ctx.age_days?;
    let animal = ctx.animal;
    if age < STUD_AGE_DAYS || animal.sex != Sex::Male || animal.purpose != Purpose::Stud {
        return None;
    }
    ctx.birth_plus(STUD_AGE_DAYS).map(Due::On)
}

fn main_flock(ctx: &RuleContext<'_>) -> Option<Due> {
    let age = ctx.age_days?;
    if age < MAIN_FLOCK_AGE_DAYS || ctx.animal.sex != Sex::Female {
        return None;
    }
    ctx.birth_plus(MAIN_FLOCK_AGE_DAYS).map(Due::On)
}

fn make_alert(
    animal: &Animal,
    rule: &MovementRule,
    due: Due,
    now: &DateTime<Local>,
    locale: Locale,
) -> MovementAlert {
    let (due_date, day_offset) = match due {
        Due::Immediate(date) => (date, 0),
        Due::On(date) => (date, days_until(date, now)),
    };

    MovementAlert {
        id: format!("{}-{}", animal.id, rule.target),
        animal_id: animal.id.clone(),
        tag: animal.tag.clone(),
        from: animal.pen,
        to: rule.target,
        rule: rule.kind,
        reason: rule.kind.reason(locale).to_string(),
        due_date,
        day_offset,
        urgency: classify_urgency(day_offset),
    }
}

/// Alerts for a single animal, in rule order
pub fn alerts_for_animal(
    animal: &Animal,
    now: &DateTime<Local>,
    locale: Locale,
) -> Vec<MovementAlert> {
    let ctx = RuleContext::new(animal, now);

    MOVEMENT_RULES
        .iter()
        .filter_map(|rule| {
            let due = rule.evaluate(&ctx)?;
            trace!(animal = %animal.id, rule = ?rule.kind, ?due, "Rule fired");
            Some(make_alert(animal, rule, due, now, locale))
        })
        .collect()
}

/// Derive all movement alerts for a herd at `now`.
///
/// The result is sorted by ascending day offset. The sort is stable, so ties
/// keep herd order and, within an animal, rule order.
pub fn build_movement_alerts(
    herd: &[Animal],
    now: &DateTime<Local>,
    locale: Locale,
) -> Vec<MovementAlert> {
    let mut alerts: Vec<MovementAlert> = herd
        .iter()
        .flat_map(|animal| alerts_for_animal(animal, now, locale))
        .collect();

    alerts.sort_by_key(|alert| alert.day_offset);

    debug!(
        animals = herd.len(),
        alerts = alerts.len(),
        "Movement alerts built"
    );

    alerts
}
