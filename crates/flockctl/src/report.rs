//! Plain-text rendering of a dashboard view

use std::fmt::Write;

use flock_api::{DashboardView, OccupancyTone, SeasonPhase, head_count_label};
use flock_util::{Locale, format_datetime_full, format_display_date};

fn tone_marker(tone: OccupancyTone) -> &'static str {
    match tone {
        OccupancyTone::Ok => "ok",
        OccupancyTone::Warn => "warn",
        OccupancyTone::Danger => "FULL",
        OccupancyTone::Unconfigured => "capacity not set",
    }
}

pub fn render_text(view: &DashboardView, locale: Locale) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, view, locale);
    out
}

fn write_report(out: &mut String, view: &DashboardView, locale: Locale) -> std::fmt::Result {
    let summary = &view.summary;
    writeln!(out, "Herd report at {}", format_datetime_full(&view.evaluated_at))?;
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "  Animals:               {}", summary.total_animals)?;
    writeln!(out, "  Moves due today:       {}", summary.ready_today)?;
    writeln!(out, "  Overdue moves:         {}", summary.overdue_moves)?;
    writeln!(out, "  Sick:                  {}", summary.sick_animals)?;
    writeln!(out, "  Upcoming vaccinations: {}", summary.upcoming_vaccinations)?;

    writeln!(out)?;
    writeln!(out, "Pens")?;
    for pen in &view.occupancy {
        let percent = pen
            .percent
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "-".to_string());
        write!(
            out,
            "  {:<20} {:>10} / {:<4} {:>5}  {}",
            pen.name,
            head_count_label(pen.head_count, locale),
            pen.capacity,
            percent,
            tone_marker(pen.tone)
        )?;
        if let Some(note) = &pen.note {
            write!(out, "  ({})", note)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Movement alerts ({})", view.alerts.len())?;
    if view.alerts.is_empty() {
        writeln!(out, "  none")?;
    }
    for alert in &view.alerts {
        writeln!(
            out,
            "  {:<10} {} -> {}  {}  {}  [{}]",
            alert.tag,
            alert.from,
            alert.to,
            alert.reason,
            format_display_date(alert.due_date, locale),
            alert.urgency_label(locale)
        )?;
    }

    if !view.vaccinations.is_empty() {
        writeln!(out)?;
        writeln!(out, "Vaccinations")?;
        for row in &view.vaccinations {
            writeln!(
                out,
                "  {:<10} {}  {}  [{}]",
                row.tag,
                row.label,
                format_display_date(row.due_date, locale),
                row.urgency.label(row.day_offset, locale)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Health: {} sick", view.health.sick_count)?;
    for sick in &view.health.animals {
        writeln!(out, "  {:<10} {}", sick.tag, sick.pen_name)?;
    }

    if !view.pen_tasks.is_empty() {
        writeln!(out)?;
        writeln!(out, "Pen tasks")?;
        for tasks in &view.pen_tasks {
            writeln!(out, "  {}", tasks.pen_name)?;
            for task in &tasks.cleaning {
                writeln!(
                    out,
                    "    clean {} ({:?})",
                    format_display_date(task.due_date, locale),
                    task.status
                )?;
            }
            for plan in &tasks.feed_plans {
                match &plan.notes {
                    Some(notes) => writeln!(out, "    feed {} ({})", plan.ration, notes)?,
                    None => writeln!(out, "    feed {}", plan.ration)?,
                }
            }
        }
    }

    if let Some(season) = &view.season {
        writeln!(out)?;
        match season {
            SeasonPhase::BeforeSeason { start, starts_in_days } => writeln!(
                out,
                "Breeding season starts {} (in {} days)",
                format_display_date(*start, locale),
                starts_in_days
            )?,
            SeasonPhase::InSeason { end, ends_in_days } => writeln!(
                out,
                "Breeding season ends {} ({} days left)",
                format_display_date(*end, locale),
                ends_in_days
            )?,
            SeasonPhase::Ended => writeln!(out, "Breeding seasons ended")?,
        }
    }

    if !view.estrus.is_empty() {
        writeln!(out)?;
        writeln!(out, "Estrus forecast")?;
        for forecast in &view.estrus {
            writeln!(
                out,
                "  {:<10} {}  [{}]",
                forecast.tag,
                format_display_date(forecast.next_estrus, locale),
                forecast.urgency.label(forecast.day_offset, locale)
            )?;
        }
    }

    Ok(())
}
