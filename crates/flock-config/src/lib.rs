//! Configuration and herd snapshot import for flock
//!
//! Supports:
//! - Versioned TOML dashboard configuration (locale, pen order, pen layout)
//! - Herd snapshots as JSON or TOML documents `{pens, animals, ...}`
//! - Field coercion with per-record rejection reasons

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use flock_api::SNAPSHOT_VERSION;
use flock_util::Locale;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("Unsupported snapshot format: {0:?} (expected .json or .toml)")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<FarmConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<FarmConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(FarmConfig::from_raw(raw))
}

/// Load a herd snapshot, choosing the format by file extension
pub fn load_snapshot(path: impl AsRef<Path>, locale: Locale) -> ConfigResult<ImportReport> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let content = std::fs::read_to_string(path)?;
    let report = match extension.as_str() {
        "json" => parse_snapshot_json(&content, locale)?,
        "toml" => parse_snapshot_toml(&content, locale)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };

    info!(
        path = %path.display(),
        animals = report.snapshot.animals.len(),
        pens = report.snapshot.pens.len(),
        rejected = report.rejected.len(),
        "Herd snapshot loaded"
    );

    Ok(report)
}

/// Parse a JSON herd snapshot document
pub fn parse_snapshot_json(content: &str, locale: Locale) -> ConfigResult<ImportReport> {
    let raw: RawSnapshot = serde_json::from_str(content)?;
    import_checked(raw, locale)
}

/// Parse a TOML herd snapshot document
pub fn parse_snapshot_toml(content: &str, locale: Locale) -> ConfigResult<ImportReport> {
    let raw: RawSnapshot = toml::from_str(content)?;
    import_checked(raw, locale)
}

fn import_checked(raw: RawSnapshot, locale: Locale) -> ConfigResult<ImportReport> {
    if let Some(version) = raw.version
        && version != SNAPSHOT_VERSION
    {
        return Err(ConfigError::UnsupportedVersion(version));
    }
    Ok(import_snapshot(raw, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_api::PenId;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1

            [dashboard]
            locale = "en"
            pen_order = ["main", "isolation"]
        "#;

        let config = parse_config(config).unwrap();
        assert_eq!(config.dashboard.locale, Locale::En);
        assert_eq!(config.dashboard.pen_order, vec![PenId::Main, PenId::Isolation]);
        assert_eq!(config.pens.len(), 8);
    }

    #[test]
    fn parse_config_with_pens() {
        let config = r#"
            config_version = 1

            [[pens]]
            id = "main"
            name = "North barn"
            capacity = 40

            [[pens]]
            id = "isolation"
            capacity = 4
            note = "Near the gate"
        "#;

        let config = parse_config(config).unwrap();
        assert_eq!(config.pens.len(), 2);
        assert_eq!(config.pens[0].name, "North barn");
        assert_eq!(config.pens[1].note.as_deref(), Some("Near the gate"));
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_config_pen_without_capacity() {
        let config = r#"
            config_version = 1

            [[pens]]
            id = "main"
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn reject_wrong_snapshot_version() {
        let result = parse_snapshot_json(r#"{ "version": 7 }"#, Locale::En);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(7))));
    }

    #[test]
    fn load_snapshot_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("herd.json");
        std::fs::write(
            &json_path,
            r#"{ "animals": [{ "id": "a1", "tag": "E-501", "gender": "أنثى",
                 "birthDate": "2024-03-10", "pen": "main", "status": "سليم" }] }"#,
        )
        .unwrap();
        let report = load_snapshot(&json_path, Locale::Ar).unwrap();
        assert_eq!(report.snapshot.animals.len(), 1);

        let csv_path = dir.path().join("herd.csv");
        std::fs::write(&csv_path, "id,tag\n").unwrap();
        assert!(matches!(
            load_snapshot(&csv_path, Locale::Ar),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
