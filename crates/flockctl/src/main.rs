//! flockctl - herd movement and due-date report
//!
//! Loads the farm configuration and a herd snapshot, evaluates them at a
//! given instant and prints the resulting dashboard as text or JSON.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flock_config::{FarmConfig, load_config, load_snapshot};
use flock_core::HerdEngine;
use flock_util::{Locale, default_config_path, default_herd_path, parse_instant};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// flockctl - movement alerts, pen occupancy and due dates for a sheep herd
#[derive(Parser, Debug)]
#[command(name = "flockctl")]
#[command(about = "Movement alerts, pen occupancy and due dates for a sheep herd")]
#[command(long_about = None)]
struct Args {
    /// Farm configuration file (or set FLOCK_CONFIG env var)
    #[arg(short, long, env = "FLOCK_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Herd snapshot, .json or .toml (or set FLOCK_HERD env var)
    #[arg(long, env = "FLOCK_HERD", default_value_os_t = default_herd_path())]
    herd: PathBuf,

    /// Evaluate at this local instant ("YYYY-MM-DD HH:MM:SS") instead of now
    #[arg(long)]
    now: Option<String>,

    /// Override the configured display locale (en or ar)
    #[arg(long)]
    locale: Option<Locale>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn load_farm_config(args: &Args) -> Result<FarmConfig> {
    if !args.config.exists() {
        info!(
            config_path = %args.config.display(),
            "No configuration file, using defaults"
        );
        return Ok(FarmConfig::default());
    }

    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    info!(
        config_path = %args.config.display(),
        pen_count = config.pens.len(),
        "Configuration loaded"
    );

    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let mut config = load_farm_config(&args)?;
    if let Some(locale) = args.locale {
        config.dashboard.locale = locale;
    }
    let locale = config.dashboard.locale;

    let import = load_snapshot(&args.herd, locale)
        .with_context(|| format!("Failed to load herd snapshot from {:?}", args.herd))?;

    for rejected in &import.rejected {
        warn!(
            kind = %rejected.kind,
            row = rejected.row,
            id = rejected.id.as_deref().unwrap_or("-"),
            reasons = rejected.reasons.len(),
            "Record skipped"
        );
    }

    let now = match &args.now {
        Some(instant) => parse_instant(instant)
            .with_context(|| format!("Invalid --now value {:?}", instant))?,
        None => flock_util::now(),
    };

    let engine = HerdEngine::new(config);
    let view = engine.evaluate(&import.snapshot, now);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view).context("Failed to encode view")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", report::render_text(&view, locale)),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "flockctl starting");

    if flock_util::is_mock_time_active() {
        warn!("Mock time is active");
    }

    run(args)
}
