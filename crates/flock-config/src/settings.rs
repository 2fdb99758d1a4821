//! Validated dashboard configuration

use flock_api::{Pen, PenId};
use flock_util::Locale;

use crate::schema::{RawConfig, RawDashboardConfig, RawSnapshot};
use crate::validation::import_snapshot;

/// Board column order used when the config does not set one
pub const DEFAULT_PEN_ORDER: [PenId; 8] = [
    PenId::LatePregnancy,
    PenId::Birthing,
    PenId::Nursing,
    PenId::Weaning,
    PenId::Fattening,
    PenId::Studs,
    PenId::Main,
    PenId::Isolation,
];

/// Days ahead counted as an upcoming vaccination
pub const DEFAULT_VACCINATION_WINDOW_DAYS: i64 = 7;

/// Validated farm configuration ready for use by the core engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmConfig {
    pub dashboard: DashboardConfig,

    /// Pen layout used when a herd snapshot carries no pens
    pub pens: Vec<Pen>,
}

impl FarmConfig {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let dashboard = DashboardConfig::from_raw(raw.dashboard);

        let pens = if raw.pens.is_empty() {
            default_pens(dashboard.locale)
        } else {
            let snapshot = RawSnapshot {
                pens: raw.pens,
                ..Default::default()
            };
            import_snapshot(snapshot, dashboard.locale).snapshot.pens
        };

        Self { dashboard, pens }
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        let dashboard = DashboardConfig::default();
        Self {
            pens: default_pens(dashboard.locale),
            dashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub locale: Locale,
    pub pen_order: Vec<PenId>,
    pub vaccination_window_days: i64,
}

impl DashboardConfig {
    fn from_raw(raw: RawDashboardConfig) -> Self {
        Self {
            locale: raw
                .locale
                .and_then(|l| l.parse().ok())
                .unwrap_or_default(),
            pen_order: raw
                .pen_order
                .map(|order| order.iter().filter_map(|p| p.parse().ok()).collect())
                .unwrap_or_else(|| DEFAULT_PEN_ORDER.to_vec()),
            vaccination_window_days: raw
                .vaccination_window_days
                .map(i64::from)
                .unwrap_or(DEFAULT_VACCINATION_WINDOW_DAYS),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            pen_order: DEFAULT_PEN_ORDER.to_vec(),
            vaccination_window_days: DEFAULT_VACCINATION_WINDOW_DAYS,
        }
    }
}

/// Standard two-row barn layout
pub fn default_pens(locale: Locale) -> Vec<Pen> {
    let capacities = [
        (PenId::Main, 50),
        (PenId::LatePregnancy, 15),
        (PenId::Birthing, 6),
        (PenId::Nursing, 12),
        (PenId::Weaning, 20),
        (PenId::Fattening, 25),
        (PenId::Studs, 10),
        (PenId::Isolation, 6),
    ];

    capacities
        .into_iter()
        .map(|(id, capacity)| Pen::new(id, id.default_name(locale), capacity))
        .collect()
}
