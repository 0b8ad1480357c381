use std::sync::Arc;

use anyhow::Context;
use money_diary_core::backup::BackupExporterTrait;
use money_diary_core::{Ledger, LedgerConfig};
use money_diary_storage_memory::{InMemoryBackupTarget, MemoryStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_tracing() {
    let log_format =
        std::env::var("MONEY_DIARY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Stores and ledger for one job run.
pub struct JobContext {
    pub store: MemoryStore,
    pub backup_target: Option<Arc<InMemoryBackupTarget>>,
    pub ledger: Ledger,
}

pub fn build_context(config: &Config, ledger_config: &LedgerConfig) -> anyhow::Result<JobContext> {
    let store = MemoryStore::open(&config.snapshot_path)
        .with_context(|| format!("failed to open snapshot {}", config.snapshot_path.display()))?;

    let backup_target = if ledger_config.backup.enabled {
        let target = InMemoryBackupTarget::open(&config.backup_path).with_context(|| {
            format!("failed to open backup rows {}", config.backup_path.display())
        })?;
        Some(Arc::new(target))
    } else {
        None
    };
    let exporter = backup_target
        .clone()
        .map(|target| target as Arc<dyn BackupExporterTrait>);

    let ledger = Ledger::new(store.stores(), exporter, ledger_config.clone())?;
    Ok(JobContext {
        store,
        backup_target,
        ledger,
    })
}

impl JobContext {
    /// Drains queued backups and writes everything back to disk.
    pub async fn persist(&self, config: &Config) -> anyhow::Result<()> {
        self.ledger.flush_backups().await;
        self.store
            .save(&config.snapshot_path)
            .await
            .context("failed to save snapshot")?;
        if let Some(target) = &self.backup_target {
            target
                .save(&config.backup_path)
                .await
                .context("failed to save backup rows")?;
        }
        Ok(())
    }
}
