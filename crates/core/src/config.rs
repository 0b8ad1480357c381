//! Engine configuration.
//!
//! Values are injected into services at construction time; nothing in the
//! engine reads the environment on its own after `LedgerConfig::from_env`.

use chrono_tz::Tz;

use crate::errors::{Error, Result};
use crate::utils::time_utils::DEFAULT_LEDGER_TZ;

pub const ENV_TIMEZONE: &str = "MONEY_DIARY_TIMEZONE";
pub const ENV_BACKUP_ENABLED: &str = "MONEY_DIARY_BACKUP_ENABLED";

/// Settings for the background backup exporter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupConfig {
    /// When false, mutations never reach the exporter.
    pub enabled: bool,
}

/// Top-level configuration for a [`crate::ledger::Ledger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Timezone that decides which calendar month "today" falls in.
    pub timezone: Tz,
    pub backup: BackupConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_LEDGER_TZ,
            backup: BackupConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TIMEZONE).filter(|v| !v.trim().is_empty()) {
            config.timezone = raw.trim().parse::<Tz>().map_err(|_| {
                Error::InvalidConfigValue(format!(
                    "{}={} is not a known timezone",
                    ENV_TIMEZONE, raw
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_BACKUP_ENABLED).filter(|v| !v.trim().is_empty()) {
            config.backup.enabled = parse_flag(&raw).ok_or_else(|| {
                Error::InvalidConfigValue(format!(
                    "{}={} is not a boolean",
                    ENV_BACKUP_ENABLED, raw
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LedgerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert!(!config.backup.enabled);
        assert_eq!(config.timezone, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_reads_values() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            (ENV_TIMEZONE, "Europe/Berlin"),
            (ENV_BACKUP_ENABLED, "true"),
        ]))
        .unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert!(config.backup.enabled);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = LedgerConfig::from_lookup(lookup_from(&[(ENV_TIMEZONE, "Mars/Olympus")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));

        let err = LedgerConfig::from_lookup(lookup_from(&[(ENV_BACKUP_ENABLED, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }
}
