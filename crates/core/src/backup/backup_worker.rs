//! Background worker draining backup jobs into the exporter.
//!
//! The worker is spawned once and owns the receiving end of an unbounded
//! channel. Jobs are processed strictly in the order they were enqueued.
//! Export failures are logged and the job is dropped; nothing is reported
//! back to the mutation that produced it.

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::backup_model::{sort_rows_for_rewrite, BackupJob, BackupRow};
use super::backup_traits::{BackupExporterTrait, BackupSinkTrait};
use crate::errors::{Error, Result};
use crate::expenses::ExpenseRepositoryTrait;
use crate::registry::{CategoryScope, RegistryServiceTrait};

/// Dependencies needed by the worker for processing jobs.
pub struct BackupWorkerDeps {
    pub exporter: Arc<dyn BackupExporterTrait>,
    pub registry_service: Arc<dyn RegistryServiceTrait>,
    pub expense_repository: Arc<dyn ExpenseRepositoryTrait>,
}

enum WorkerMessage {
    Job(BackupJob),
    /// Acknowledged once every earlier job has been processed.
    Flush(oneshot::Sender<()>),
}

/// Sending half of the backup worker's queue.
///
/// Cloning is cheap; the worker stops once every clone has been dropped.
#[derive(Clone)]
pub struct BackupQueue {
    tx: mpsc::UnboundedSender<WorkerMessage>,
}

impl BackupQueue {
    /// Waits until every job enqueued before this call has been processed.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(WorkerMessage::Flush(ack_tx)).is_err() {
            warn!("Backup worker is not running; nothing to flush");
            return;
        }
        if ack_rx.await.is_err() {
            warn!("Backup worker stopped before acknowledging flush");
        }
    }
}

impl BackupSinkTrait for BackupQueue {
    fn enqueue(&self, job: BackupJob) {
        let name = job.name();
        if self.tx.send(WorkerMessage::Job(job)).is_err() {
            warn!("Backup worker is not running; dropped {} job", name);
        }
    }
}

/// Spawns the worker on the current Tokio runtime.
///
/// Fails when called outside a runtime.
pub fn spawn_backup_worker(deps: BackupWorkerDeps) -> Result<(BackupQueue, JoinHandle<()>)> {
    let handle = Handle::try_current().map_err(|e| {
        Error::Unexpected(format!("Backup worker needs a Tokio runtime: {}", e))
    })?;
    let (tx, rx) = mpsc::unbounded_channel();
    let join = handle.spawn(backup_worker(rx, Arc::new(deps)));
    Ok((BackupQueue { tx }, join))
}

async fn backup_worker(
    mut rx: mpsc::UnboundedReceiver<WorkerMessage>,
    deps: Arc<BackupWorkerDeps>,
) {
    info!("Backup worker started");

    while let Some(message) = rx.recv().await {
        match message {
            WorkerMessage::Job(job) => {
                let name = job.name();
                match process_job(job, &deps).await {
                    Ok(()) => debug!("Backup {} job completed", name),
                    Err(e) => error!("Backup {} job failed: {}", name, e),
                }
            }
            WorkerMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    info!("Backup worker shutting down");
}

async fn process_job(job: BackupJob, deps: &BackupWorkerDeps) -> Result<()> {
    match job {
        BackupJob::Append(expense) => {
            let maps = deps
                .registry_service
                .category_maps(CategoryScope::All)
                .await?;
            deps.exporter
                .append_row(BackupRow::from_expense(&expense, &maps))
                .await?;
        }
        BackupJob::Update(expense) => {
            let maps = deps
                .registry_service
                .category_maps(CategoryScope::All)
                .await?;
            deps.exporter
                .update_row_by_id(BackupRow::from_expense(&expense, &maps))
                .await?;
        }
        BackupJob::Delete { id } => {
            deps.exporter.delete_row_by_id(&id).await?;
        }
        BackupJob::RewriteAll => {
            let expenses = deps.expense_repository.scan_all().await?;
            let maps = deps
                .registry_service
                .category_maps(CategoryScope::All)
                .await?;
            let mut rows: Vec<BackupRow> = expenses
                .iter()
                .map(|e| BackupRow::from_expense(e, &maps))
                .collect();
            sort_rows_for_rewrite(&mut rows);
            info!("Rewriting backup with {} rows", rows.len());
            deps.exporter.clear_and_rewrite_all(rows).await?;
        }
    }
    Ok(())
}
