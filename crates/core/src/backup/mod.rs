//! Backup module - mirrors expense mutations into an external backup target
//! through a background worker.

mod backup_model;
mod backup_traits;
mod backup_worker;
mod sink;

pub use backup_model::{sort_rows_for_rewrite, BackupJob, BackupRow};
pub use backup_traits::{BackupExporterTrait, BackupSinkTrait};
pub use backup_worker::{spawn_backup_worker, BackupQueue, BackupWorkerDeps};
pub use sink::{MockBackupSink, NoOpBackupSink};
