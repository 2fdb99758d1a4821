//! Default paths for flock components
//!
//! Paths are user-writable by default:
//! - Config: `$XDG_CONFIG_HOME/flock/farm.toml` or `~/.config/flock/farm.toml`
//! - Herd data: `$XDG_DATA_HOME/flock/herd.json` or `~/.local/share/flock/herd.json`

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const FLOCK_CONFIG_ENV: &str = "FLOCK_CONFIG";

/// Environment variable for overriding the herd snapshot path
pub const FLOCK_HERD_ENV: &str = "FLOCK_HERD";

/// Application subdirectory name
const APP_DIR: &str = "flock";

const CONFIG_FILENAME: &str = "farm.toml";
const HERD_FILENAME: &str = "herd.json";

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/flock/farm.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/flock/farm.toml` (fallback)
///
/// `FLOCK_CONFIG` is honoured by the CLI layer rather than here.
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    home_dir().join(".config").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default herd snapshot path.
///
/// Order of precedence:
/// 1. `$XDG_DATA_HOME/flock/herd.json` (if XDG_DATA_HOME is set)
/// 2. `~/.local/share/flock/herd.json` (fallback)
pub fn default_herd_path() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR).join(HERD_FILENAME);
    }

    home_dir()
        .join(".local")
        .join("share")
        .join(APP_DIR)
        .join(HERD_FILENAME)
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
