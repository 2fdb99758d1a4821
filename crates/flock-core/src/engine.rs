//! Dashboard evaluation engine

use chrono::{DateTime, Local};
use flock_api::{Animal, DashboardView, HerdSnapshot, MovementAlert, Pen};
use flock_config::FarmConfig;
use tracing::{debug, info};

use crate::{
    board_columns, build_movement_alerts, estrus_forecast, health_summary, pen_occupancy,
    pen_tasks, season_phase, summarize, vaccination_rows,
};

/// Evaluates herd snapshots against a farm configuration.
///
/// Holds no herd state: every call to [`HerdEngine::evaluate`] rebuilds the
/// whole view from the snapshot and the instant it is given.
#[derive(Debug, Clone)]
pub struct HerdEngine {
    config: FarmConfig,
}

impl HerdEngine {
    pub fn new(config: FarmConfig) -> Self {
        info!(
            locale = %config.dashboard.locale,
            pen_count = config.pens.len(),
            "Herd engine initialized"
        );
        Self { config }
    }

    pub fn config(&self) -> &FarmConfig {
        &self.config
    }

    /// Replace the configuration used for subsequent evaluations
    pub fn reload_config(&mut self, config: FarmConfig) {
        let pen_count = config.pens.len();
        self.config = config;
        info!(pen_count, "Configuration reloaded");
    }

    /// Pens from the snapshot, or the configured layout if it carries none
    pub fn pens_for<'a>(&'a self, snapshot: &'a HerdSnapshot) -> &'a [Pen] {
        if snapshot.pens.is_empty() {
            &self.config.pens
        } else {
            &snapshot.pens
        }
    }

    /// Movement alerts only, localized per configuration
    pub fn movement_alerts(&self, herd: &[Animal], now: DateTime<Local>) -> Vec<MovementAlert> {
        build_movement_alerts(herd, &now, self.config.dashboard.locale)
    }

    /// Derive every dashboard view for `now`
    pub fn evaluate(&self, snapshot: &HerdSnapshot, now: DateTime<Local>) -> DashboardView {
        let dashboard = &self.config.dashboard;
        let pens = self.pens_for(snapshot);
        let herd = &snapshot.animals;
        let today = now.date_naive();

        let alerts = self.movement_alerts(herd, now);
        let vaccinations = vaccination_rows(&snapshot.vaccinations, herd, &now);
        let summary = summarize(herd, &alerts, &vaccinations, dashboard.vaccination_window_days);

        let (season, estrus) = match &snapshot.breeding_season {
            Some(season) => (
                Some(season_phase(season, today)),
                estrus_forecast(herd, season.cycle_days, today),
            ),
            None => (None, Vec::new()),
        };

        debug!(
            animals = herd.len(),
            alerts = alerts.len(),
            overdue = summary.overdue_moves,
            "Herd evaluated"
        );

        DashboardView {
            evaluated_at: now,
            summary,
            occupancy: pen_occupancy(pens, herd),
            alerts,
            board: board_columns(&dashboard.pen_order, pens, herd, &now),
            vaccinations,
            health: health_summary(herd, pens),
            pen_tasks: pen_tasks(
                &dashboard.pen_order,
                pens,
                &snapshot.cleaning_tasks,
                &snapshot.feed_plans,
            ),
            season,
            estrus,
        }
    }
}
