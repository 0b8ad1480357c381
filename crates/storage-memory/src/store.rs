//! Shared in-process state and JSON snapshot persistence.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use money_diary_core::expenses::Expense;
use money_diary_core::registry::{MasterKind, MasterRecord};
use money_diary_core::summary::MonthlySummaryCache;
use money_diary_core::LedgerStores;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::Result;
use crate::expenses::InMemoryExpenseRepository;
use crate::registry::InMemoryMasterRegistry;
use crate::summary::InMemorySummaryCache;

/// Serialized form of a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub masters: Vec<MasterRecord>,
    #[serde(default)]
    pub summaries: Vec<MonthlySummaryCache>,
}

#[derive(Default)]
pub(crate) struct StoreState {
    pub expenses: HashMap<String, Expense>,
    pub masters: HashMap<(MasterKind, String), MasterRecord>,
    pub summaries: HashMap<String, MonthlySummaryCache>,
}

/// Handle to one in-process data set. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let state = StoreState {
            expenses: snapshot
                .expenses
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect(),
            masters: snapshot
                .masters
                .into_iter()
                .map(|r| ((r.kind(), r.id().to_string()), r))
                .collect(),
            summaries: snapshot
                .summaries
                .into_iter()
                .map(|s| (s.month.clone(), s))
                .collect(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Loads a snapshot file. A missing file yields an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                info!(
                    "Loaded snapshot {}: {} expenses, {} master records",
                    path.display(),
                    snapshot.expenses.len(),
                    snapshot.masters.len()
                );
                Ok(Self::from_snapshot(snapshot))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No snapshot at {}, starting empty", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Current contents with a stable ordering.
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;

        let mut expenses: Vec<Expense> = state.expenses.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        let mut masters: Vec<MasterRecord> = state.masters.values().cloned().collect();
        masters.sort_by(|a, b| {
            a.kind()
                .as_str()
                .cmp(b.kind().as_str())
                .then_with(|| a.id().cmp(b.id()))
        });

        let mut summaries: Vec<MonthlySummaryCache> = state.summaries.values().cloned().collect();
        summaries.sort_by(|a, b| a.month.cmp(&b.month));

        Snapshot {
            expenses,
            masters,
            summaries,
        }
    }

    /// Writes the snapshot next to `path` and renames it into place.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot().await;
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        write_atomic(path, &bytes)?;
        debug!(
            "Saved snapshot {} ({} expenses)",
            path.display(),
            snapshot.expenses.len()
        );
        Ok(())
    }

    /// Store handles for building a [`money_diary_core::Ledger`].
    pub fn stores(&self) -> LedgerStores {
        LedgerStores {
            expenses: Arc::new(InMemoryExpenseRepository::new(self.clone())),
            registry: Arc::new(InMemoryMasterRegistry::new(self.clone())),
            summary_cache: Arc::new(InMemorySummaryCache::new(self.clone())),
        }
    }

    pub(crate) fn state(&self) -> &RwLock<StoreState> {
        &self.state
    }
}

/// Writes `bytes` to a sibling temp file, then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
