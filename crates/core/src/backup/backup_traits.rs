//! Backup exporter and sink traits.

use async_trait::async_trait;

use super::backup_model::{BackupJob, BackupRow};
use crate::errors::BackupError;

/// Trait for an external backup target (a spreadsheet in production).
#[async_trait]
pub trait BackupExporterTrait: Send + Sync {
    async fn append_row(&self, row: BackupRow) -> Result<(), BackupError>;

    async fn update_row_by_id(&self, row: BackupRow) -> Result<(), BackupError>;

    async fn delete_row_by_id(&self, id: &str) -> Result<(), BackupError>;

    /// Replaces every row in the target with `rows`, in the given order.
    async fn clear_and_rewrite_all(&self, rows: Vec<BackupRow>) -> Result<(), BackupError>;
}

/// Trait for handing backup work off after a mutation.
///
/// - `enqueue()` must return immediately; no exporter call happens inline
/// - Failure to enqueue must not affect the mutation that triggered it
pub trait BackupSinkTrait: Send + Sync {
    fn enqueue(&self, job: BackupJob);
}
