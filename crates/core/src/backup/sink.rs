//! Backup sink implementations.

use std::sync::{Arc, Mutex};

use super::backup_model::BackupJob;
use super::backup_traits::BackupSinkTrait;

/// Sink used when backups are disabled.
#[derive(Clone, Default)]
pub struct NoOpBackupSink;

impl BackupSinkTrait for NoOpBackupSink {
    fn enqueue(&self, _job: BackupJob) {
        // Intentionally empty - backups are disabled
    }
}

/// Mock sink for testing - collects enqueued jobs.
#[derive(Clone, Default)]
pub struct MockBackupSink {
    jobs: Arc<Mutex<Vec<BackupJob>>>,
}

impl MockBackupSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected jobs.
    pub fn jobs(&self) -> Vec<BackupJob> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().map(|jobs| jobs.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BackupSinkTrait for MockBackupSink {
    fn enqueue(&self, job: BackupJob) {
        if let Ok(mut jobs) = self.jobs.lock() {
            jobs.push(job);
        }
    }
}
