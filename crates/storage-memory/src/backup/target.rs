use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use log::debug;
use money_diary_core::backup::{BackupExporterTrait, BackupRow};
use money_diary_core::errors::BackupError;
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::store::write_atomic;

/// Backup exporter that keeps rows in insertion order, like a sheet.
#[derive(Default)]
pub struct InMemoryBackupTarget {
    rows: Mutex<Vec<BackupRow>>,
}

impl InMemoryBackupTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<BackupRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Loads rows saved by [`InMemoryBackupTarget::save`]. A missing file
    /// yields an empty target.
    pub fn open(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self::from_rows(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let rows = self.rows().await;
        write_atomic(path, &serde_json::to_vec_pretty(&rows)?)?;
        debug!("Saved {} backup rows to {}", rows.len(), path.display());
        Ok(())
    }

    pub async fn rows(&self) -> Vec<BackupRow> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl BackupExporterTrait for InMemoryBackupTarget {
    async fn append_row(&self, row: BackupRow) -> std::result::Result<(), BackupError> {
        self.rows.lock().await.push(row);
        Ok(())
    }

    async fn update_row_by_id(&self, row: BackupRow) -> std::result::Result<(), BackupError> {
        let mut rows = self.rows.lock().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.id == row.id)
            .ok_or_else(|| BackupError::RowNotFound(row.id.clone()))?;
        *slot = row;
        Ok(())
    }

    async fn delete_row_by_id(&self, id: &str) -> std::result::Result<(), BackupError> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(BackupError::RowNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear_and_rewrite_all(
        &self,
        rows: Vec<BackupRow>,
    ) -> std::result::Result<(), BackupError> {
        *self.rows.lock().await = rows;
        Ok(())
    }
}
