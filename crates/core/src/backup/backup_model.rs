//! Backup domain models.

use serde::{Deserialize, Serialize};

use crate::expenses::Expense;
use crate::registry::CategoryMaps;

/// One expense as written to the backup target, with the category resolved
/// to its display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackupRow {
    pub id: String,
    pub date: String,
    pub payer: String,
    pub category: String,
    pub amount: i64,
    pub memo: String,
    pub place: String,
    pub visibility: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl BackupRow {
    pub fn from_expense(expense: &Expense, maps: &CategoryMaps) -> Self {
        Self {
            id: expense.id.clone(),
            date: expense.date.clone(),
            payer: expense.payer.clone(),
            category: maps.name(&expense.category).to_string(),
            amount: expense.amount,
            memo: expense.memo.clone(),
            place: expense.place.clone(),
            visibility: expense.visibility.clone(),
            created_by: expense.created_by.clone(),
            created_at: expense.created_at.clone(),
            updated_at: expense.updated_at.clone(),
        }
    }
}

/// Work item handed to the backup worker after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupJob {
    Append(Expense),
    Update(Expense),
    Delete { id: String },
    /// Replace the whole target with the current expense history.
    RewriteAll,
}

impl BackupJob {
    pub fn name(&self) -> &'static str {
        match self {
            BackupJob::Append(_) => "append",
            BackupJob::Update(_) => "update",
            BackupJob::Delete { .. } => "delete",
            BackupJob::RewriteAll => "rewrite_all",
        }
    }
}

/// Orders rows for a full rewrite: newest date first, then by id so the
/// output is stable.
pub fn sort_rows_for_rewrite(rows: &mut [BackupRow]) {
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}
