//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine. The file
//! location comes from `FOODPRINT_CONFIG` and falls back to `./config.toml`.

use crate::{
    core::{listing::ExpiredPlacement, lookup::DEFAULT_LOOKUP_BASE_URL, notify},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Items at most this many days from expiry are notified (expired included)
    pub notify_within_days: i64,
    /// Where expired items go in the main list
    pub expired_placement: ExpiredPlacement,
    /// Seed the demo items into an empty store on startup
    pub seed_demo_items: bool,
    /// JSON record file imported into an empty store on startup
    pub import_path: Option<PathBuf>,
    /// Product lookup settings
    pub lookup: LookupConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notify_within_days: notify::DEFAULT_NOTIFY_WITHIN_DAYS,
            expired_placement: ExpiredPlacement::default(),
            seed_demo_items: false,
            import_path: None,
            lookup: LookupConfig::default(),
        }
    }
}

/// `[lookup]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Open Food Facts compatible host
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl LookupConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    fn validate(self) -> Result<Self> {
        if self.notify_within_days < 0 {
            return Err(Error::Config {
                message: format!(
                    "notify_within_days must not be negative (got {})",
                    self.notify_within_days
                ),
            });
        }
        if self.lookup.timeout_secs == 0 {
            return Err(Error::Config {
                message: "lookup.timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or a value is out of range.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads settings from `FOODPRINT_CONFIG` or `./config.toml`. A missing file
/// yields the defaults; an unreadable or invalid one is an error.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("FOODPRINT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    if Path::new(&path).exists() {
        let config = load_config(&path)?;
        info!("Loaded configuration from {}", path);
        Ok(config)
    } else {
        info!("No configuration file at {}, using defaults", path);
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            notify_within_days = 5
            expired_placement = "first"
            seed_demo_items = true
            import_path = "data/foodItems.json"

            [lookup]
            base_url = "http://localhost:9000"
            timeout_secs = 3
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.notify_within_days, 5);
        assert_eq!(config.expired_placement, ExpiredPlacement::First);
        assert!(config.seed_demo_items);
        assert_eq!(
            config.import_path,
            Some(PathBuf::from("data/foodItems.json"))
        );
        assert_eq!(config.lookup.base_url, "http://localhost:9000");
        assert_eq!(config.lookup.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.notify_within_days, 2);
        assert_eq!(config.expired_placement, ExpiredPlacement::Last);
        assert_eq!(config.lookup.base_url, "https://world.openfoodfacts.org");
    }

    #[test]
    fn test_partial_lookup_section() {
        let config = parse_config("[lookup]\ntimeout_secs = 20\n").unwrap();
        assert_eq!(config.lookup.timeout_secs, 20);
        assert_eq!(config.lookup.base_url, DEFAULT_LOOKUP_BASE_URL);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            parse_config("notify_within_days = -1"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            parse_config("[lookup]\ntimeout_secs = 0"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            parse_config("expired_placement = \"middle\""),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(matches!(
            load_config("definitely/not/here.toml"),
            Err(Error::Config { .. })
        ));
    }
}
