//! Herd snapshot validation CLI tool
//!
//! Validates a herd snapshot file and reports rejected records and dropped fields.

use flock_util::{Locale, default_herd_path};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let snapshot_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_herd_path();
            eprintln!("Usage: validate-herd [snapshot-file]");
            eprintln!();
            eprintln!("Validates a flock herd snapshot (.json or .toml).");
            eprintln!();
            eprintln!("Default snapshot location: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-herd {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !snapshot_path.exists() {
        eprintln!("Error: Snapshot file not found: {}", snapshot_path.display());
        return ExitCode::from(1);
    }

    match flock_config::load_snapshot(&snapshot_path, Locale::En) {
        Ok(report) => {
            if report.is_clean() {
                println!("✓ Snapshot is valid");
            } else {
                println!("! Snapshot loaded with problems");
            }
            println!();
            println!("Summary:");
            println!("  Pens: {}", report.snapshot.pens.len());
            println!("  Animals: {}", report.snapshot.animals.len());
            println!("  Vaccinations: {}", report.snapshot.vaccinations.len());
            println!("  Cleaning tasks: {}", report.snapshot.cleaning_tasks.len());
            println!("  Feed plans: {}", report.snapshot.feed_plans.len());
            println!(
                "  Breeding season: {}",
                if report.snapshot.breeding_season.is_some() { "yes" } else { "no" }
            );

            if !report.rejected.is_empty() {
                println!();
                println!("Rejected records ({}):", report.rejected.len());
                for rejected in &report.rejected {
                    println!(
                        "  - {} #{} ({})",
                        rejected.kind,
                        rejected.row,
                        rejected.id.as_deref().unwrap_or("no id")
                    );
                    for reason in &rejected.reasons {
                        println!("      {}", reason);
                    }
                }
            }

            if !report.warnings.is_empty() {
                println!();
                println!("Dropped fields ({}):", report.warnings.len());
                for warning in &report.warnings {
                    println!("  - {}", warning);
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Snapshot could not be read");
            eprintln!();
            match &e {
                flock_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                flock_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                flock_config::ConfigError::JsonError(parse_err) => {
                    eprintln!("JSON parse error:");
                    eprintln!("  {}", parse_err);
                }
                flock_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported snapshot version: {} (expected {})",
                        ver,
                        flock_api::SNAPSHOT_VERSION
                    );
                }
                other => eprintln!("{}", other),
            }
            ExitCode::from(1)
        }
    }
}
