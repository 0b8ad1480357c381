//! Scheduler process configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use money_diary_core::constants::SCHEDULED_ACTOR;

pub const ENV_SNAPSHOT: &str = "MONEY_DIARY_SNAPSHOT";
pub const ENV_BACKUP_PATH: &str = "MONEY_DIARY_BACKUP_PATH";
pub const ENV_ACTOR: &str = "MONEY_DIARY_ACTOR";
pub const ENV_INTERVAL_SECS: &str = "MONEY_DIARY_INTERVAL_SECS";

const DEFAULT_SNAPSHOT: &str = "./data/money-diary.json";
const DEFAULT_BACKUP_PATH: &str = "./data/backup.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snapshot_path: PathBuf,
    /// Where backup rows are kept when backups are enabled.
    pub backup_path: PathBuf,
    /// Identity stamped as `createdBy` on materialized expenses.
    pub acting_user: String,
    /// Repeat the job at this interval instead of running once.
    pub interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let interval = match value(ENV_INTERVAL_SECS) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("{}={} is not a number of seconds", ENV_INTERVAL_SECS, raw)
                })?;
                if secs == 0 {
                    bail!("{} must be greater than zero", ENV_INTERVAL_SECS);
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            snapshot_path: PathBuf::from(
                value(ENV_SNAPSHOT).unwrap_or_else(|| DEFAULT_SNAPSHOT.to_string()),
            ),
            backup_path: PathBuf::from(
                value(ENV_BACKUP_PATH).unwrap_or_else(|| DEFAULT_BACKUP_PATH.to_string()),
            ),
            acting_user: value(ENV_ACTOR).unwrap_or_else(|| SCHEDULED_ACTOR.to_string()),
            interval,
        })
    }
}
