//! # Config Repository
//!
//! File-based application configuration stored as `config.yaml` at the root of
//! the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! timezone_offset: "+05:30"
//! currency_symbol: "₹"
//! selection_policy: reset_after_submit
//! default_scope: Today
//! time_format: twelve_hour
//! data_format_version: "1.0"
//! created_at: "2025-07-21T10:58:00+00:00"
//! updated_at: "2025-07-21T10:58:00+00:00"
//! ```
//!
//! Missing fields take their defaults. A file that does not parse is left
//! alone and the defaults are used for the session.

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::ExpenseListScope;
use std::fs;
use std::path::PathBuf;

use crate::domain::expense_table::TimeFormat;
use crate::domain::selection::SelectionPolicy;

use super::connection::FileConnection;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// UTC offset that decides calendar days, e.g. "+05:30"
    pub timezone_offset: String,
    /// Prefix used when formatting amounts
    pub currency_symbol: String,
    /// Whether the highlighted category survives a submission
    pub selection_policy: SelectionPolicy,
    /// List shown at startup
    pub default_scope: ExpenseListScope,
    /// 12 or 24 hour clock for displayed times
    pub time_format: TimeFormat,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            timezone_offset: "+05:30".to_string(),
            currency_symbol: "₹".to_string(),
            selection_policy: SelectionPolicy::ResetAfterSubmit,
            default_scope: ExpenseListScope::Today,
            time_format: TimeFormat::TwelveHour,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl AppConfig {
    /// The configured offset as a chrono timezone
    pub fn timezone(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.timezone_offset)
    }
}

/// Parse "+05:30", "-0500", "+5" or "Z" into a fixed offset
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| anyhow!("Invalid UTC offset"));
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(anyhow!("UTC offset must start with '+' or '-': '{}'", input)),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours
        .parse()
        .with_context(|| format!("Invalid hours in UTC offset '{}'", input))?;
    let minutes: i32 = minutes
        .parse()
        .with_context(|| format!("Invalid minutes in UTC offset '{}'", input))?;
    if hours > 23 || minutes > 59 {
        return Err(anyhow!("UTC offset out of range: '{}'", input));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow!("UTC offset out of range: '{}'", input))
}

/// Config repository using a single YAML file
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    connection: FileConnection,
}

impl ConfigRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn config_path(&self) -> PathBuf {
        self.connection.base_directory().join(CONFIG_FILE_NAME)
    }

    /// Load the config, writing the defaults out on first run
    pub fn load_or_create(&self) -> Result<AppConfig> {
        let config_path = self.config_path();

        if !config_path.exists() {
            let config = AppConfig::default();
            self.save(&config)?;
            info!("Created default config at {:?}", config_path);
            return Ok(config);
        }

        let yaml_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {:?}", config_path))?;
        match serde_yaml::from_str::<AppConfig>(&yaml_content) {
            Ok(config) => {
                debug!("Loaded config from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("⚠️ Config at {:?} is unreadable, using defaults: {}", config_path, e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save config to file, refreshing `updated_at`
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config.timezone()?;

        let config_path = self.config_path();
        let base_dir = self.connection.base_directory();
        if !base_dir.exists() {
            fs::create_dir_all(base_dir)?;
            info!("Created data directory: {:?}", base_dir);
        }

        let mut updated = config.clone();
        updated.updated_at = Utc::now().to_rfc3339();
        let yaml_content = serde_yaml::to_string(&updated)?;

        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved config to {:?}", config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (ConfigRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = FileConnection::new(temp_dir.path()).expect("Failed to create connection");
        (ConfigRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_load_creates_default() {
        let (repo, temp_dir) = setup_test_repo();

        let config = repo.load_or_create().unwrap();
        assert_eq!(config.timezone_offset, "+05:30");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.selection_policy, SelectionPolicy::ResetAfterSubmit);
        assert_eq!(config.default_scope, ExpenseListScope::Today);
        assert!(temp_dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_config_persistence() {
        let (repo, temp_dir) = setup_test_repo();

        let mut config = repo.load_or_create().unwrap();
        config.timezone_offset = "-05:00".to_string();
        config.selection_policy = SelectionPolicy::RetainAfterSubmit;
        repo.save(&config).unwrap();

        let repo2 = ConfigRepository::new(FileConnection::new(temp_dir.path()).unwrap());
        let loaded = repo2.load_or_create().unwrap();
        assert_eq!(loaded.timezone_offset, "-05:00");
        assert_eq!(loaded.selection_policy, SelectionPolicy::RetainAfterSubmit);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (repo, temp_dir) = setup_test_repo();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "currency_symbol: \"$\"\ntime_format: twenty_four_hour\n",
        )
        .unwrap();

        let config = repo.load_or_create().unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.timezone_offset, "+05:30");
        assert_eq!(config.default_scope, ExpenseListScope::Today);
    }

    #[test]
    fn test_unreadable_file_falls_back_to_defaults() {
        let (repo, temp_dir) = setup_test_repo();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "selection_policy: [unclosed").unwrap();

        let config = repo.load_or_create().unwrap();
        assert_eq!(config.selection_policy, SelectionPolicy::ResetAfterSubmit);
        // The broken file is not overwritten
        assert_eq!(fs::read_to_string(path).unwrap(), "selection_policy: [unclosed");
    }

    #[test]
    fn test_save_rejects_bad_offset() {
        let (repo, _temp_dir) = setup_test_repo();
        let config = AppConfig {
            timezone_offset: "IST".to_string(),
            ..AppConfig::default()
        };
        assert!(repo.save(&config).is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_utc_offset("-0500").unwrap().local_minus_utc(), -18_000);
        assert_eq!(parse_utc_offset("+1").unwrap().local_minus_utc(), 3_600);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("05:30").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("+05:xx").is_err());
    }
}
