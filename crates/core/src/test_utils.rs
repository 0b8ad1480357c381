//! Hand-written mock stores shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backup::{BackupExporterTrait, BackupRow};
use crate::errors::{BackupError, DatabaseError, Result};
use crate::expenses::{Expense, ExpenseRepositoryTrait};
use crate::recurring::{Frequency, RecurringExpense};
use crate::registry::{Category, MasterKind, MasterRecord, MasterRegistryTrait, Payer};
use crate::summary::{MonthlySummaryCache, SummaryCacheRepositoryTrait};
use crate::utils::time_utils::month_key;

pub fn category(id: &str, name: &str, sort_order: i32) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        sort_order,
        color: format!("#{:06}", sort_order),
        is_active: true,
        is_expense: true,
        exclude_from_breakdown: false,
        exclude_from_summary: false,
        owner: String::new(),
    }
}

pub fn payer(name: &str, track_balance: bool) -> Payer {
    Payer {
        id: name.to_string(),
        name: name.to_string(),
        sort_order: 1,
        is_active: true,
        track_balance,
    }
}

pub fn expense(id: &str, date: &str, category: &str, amount: i64, created_by: &str) -> Expense {
    Expense {
        id: id.to_string(),
        date: date.to_string(),
        payer: "Wallet".to_string(),
        category: category.to_string(),
        amount,
        memo: String::new(),
        place: String::new(),
        visibility: String::new(),
        created_by: created_by.to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn template(id: &str, frequency: Frequency, day_of_month: u32) -> RecurringExpense {
    RecurringExpense {
        id: id.to_string(),
        category: "cat-rent".to_string(),
        amount: 80000,
        payer: "Bank".to_string(),
        place: String::new(),
        memo: format!("template {}", id),
        frequency,
        day_of_month,
        repeat_month: 0,
        start_month: String::new(),
        end_month: String::new(),
        is_active: true,
        last_created_month: String::new(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: String::new(),
    }
}

fn store_failure(operation: &str) -> crate::errors::Error {
    DatabaseError::QueryFailed(format!("mock {} failure", operation)).into()
}

// --- Mock ExpenseRepository ---

#[derive(Default)]
struct ExpenseState {
    expenses: HashMap<String, Expense>,
    puts: usize,
    /// Fail every put once this many have succeeded.
    fail_put_after: Option<usize>,
    fail_reads: bool,
}

#[derive(Clone, Default)]
pub struct MockExpenseRepository {
    state: Arc<Mutex<ExpenseState>>,
}

impl MockExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, expense: Expense) {
        self.state
            .lock()
            .unwrap()
            .expenses
            .insert(expense.id.clone(), expense);
    }

    pub fn all(&self) -> Vec<Expense> {
        let mut all: Vec<Expense> = self.state.lock().unwrap().expenses.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().expenses.len()
    }

    pub fn fail_put_after(&self, successful_puts: usize) {
        let mut state = self.state.lock().unwrap();
        state.fail_put_after = Some(state.puts + successful_puts);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for MockExpenseRepository {
    async fn get(&self, id: &str) -> Result<Option<Expense>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(store_failure("get"));
        }
        Ok(state.expenses.get(id).cloned())
    }

    async fn put(&self, expense: &Expense) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_put_after.is_some_and(|limit| state.puts >= limit) {
            return Err(store_failure("put"));
        }
        state.puts += 1;
        state.expenses.insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.state.lock().unwrap().expenses.remove(id);
        Ok(())
    }

    async fn query_by_month(&self, month: &str) -> Result<Vec<Expense>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(store_failure("query"));
        }
        let mut found: Vec<Expense> = state
            .expenses
            .values()
            .filter(|e| month_key(&e.date) == Some(month))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn scan_all(&self) -> Result<Vec<Expense>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(store_failure("scan"));
        }
        Ok(state.expenses.values().cloned().collect())
    }
}

// --- Mock MasterRegistry ---

#[derive(Clone, Default)]
pub struct MockMasterRegistry {
    records: Arc<Mutex<HashMap<(MasterKind, String), MasterRecord>>>,
    /// When set, `query_by_kind` serves this snapshot instead of live data.
    frozen: Arc<Mutex<Option<Vec<MasterRecord>>>>,
}

impl MockMasterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: MasterRecord) {
        self.records
            .lock()
            .unwrap()
            .insert((record.kind(), record.id().to_string()), record);
    }

    pub fn record(&self, kind: MasterKind, id: &str) -> Option<MasterRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(kind, id.to_string()))
            .cloned()
    }

    /// Makes later queries return the records as they are now, simulating a
    /// reader that loaded them before a concurrent writer.
    pub fn freeze_queries(&self) {
        let snapshot = self.records.lock().unwrap().values().cloned().collect();
        *self.frozen.lock().unwrap() = Some(snapshot);
    }

    pub fn count(&self, kind: MasterKind) -> usize {
        self.records
            .lock()
            .unwrap()
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

#[async_trait]
impl MasterRegistryTrait for MockMasterRegistry {
    async fn query_by_kind(&self, kind: MasterKind) -> Result<Vec<MasterRecord>> {
        if let Some(frozen) = self.frozen.lock().unwrap().as_ref() {
            return Ok(frozen.iter().filter(|r| r.kind() == kind).cloned().collect());
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect())
    }

    async fn get(&self, kind: MasterKind, id: &str) -> Result<Option<MasterRecord>> {
        Ok(self.record(kind, id))
    }

    async fn put(&self, record: MasterRecord) -> Result<()> {
        self.insert(record);
        Ok(())
    }

    async fn delete(&self, kind: MasterKind, id: &str) -> Result<()> {
        self.records.lock().unwrap().remove(&(kind, id.to_string()));
        Ok(())
    }

    async fn compare_and_set_last_created_month(
        &self,
        template_id: &str,
        expected: &str,
        new_month: &str,
    ) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&(MasterKind::Recurring, template_id.to_string())) {
            Some(MasterRecord::Recurring(t)) if t.last_created_month == expected => {
                t.last_created_month = new_month.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// --- Mock SummaryCacheRepository ---

#[derive(Clone, Default)]
pub struct MockSummaryCache {
    entries: Arc<Mutex<HashMap<String, MonthlySummaryCache>>>,
    fail_on_put: Arc<Mutex<bool>>,
}

impl MockSummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, month: &str) -> Option<MonthlySummaryCache> {
        self.entries.lock().unwrap().get(month).cloned()
    }

    pub fn set_fail_on_put(&self, fail: bool) {
        *self.fail_on_put.lock().unwrap() = fail;
    }
}

#[async_trait]
impl SummaryCacheRepositoryTrait for MockSummaryCache {
    async fn get(&self, month: &str) -> Result<Option<MonthlySummaryCache>> {
        Ok(self.entry(month))
    }

    async fn put(&self, summary: &MonthlySummaryCache) -> Result<()> {
        if *self.fail_on_put.lock().unwrap() {
            return Err(store_failure("cache put"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(summary.month.clone(), summary.clone());
        Ok(())
    }

    async fn batch_get(&self, months: &[String]) -> Result<HashMap<String, MonthlySummaryCache>> {
        let entries = self.entries.lock().unwrap();
        Ok(months
            .iter()
            .filter_map(|m| entries.get(m).map(|s| (m.clone(), s.clone())))
            .collect())
    }
}

// --- Mock BackupExporter ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExporterCall {
    Append(BackupRow),
    Update(BackupRow),
    Delete(String),
    RewriteAll(Vec<BackupRow>),
}

#[derive(Default)]
pub struct MockBackupExporter {
    calls: Mutex<Vec<ExporterCall>>,
    fail: Mutex<bool>,
}

impl MockBackupExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ExporterCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    fn record(&self, call: ExporterCall) -> std::result::Result<(), BackupError> {
        if *self.fail.lock().unwrap() {
            return Err(BackupError::Unavailable("mock exporter offline".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl BackupExporterTrait for MockBackupExporter {
    async fn append_row(&self, row: BackupRow) -> std::result::Result<(), BackupError> {
        self.record(ExporterCall::Append(row))
    }

    async fn update_row_by_id(&self, row: BackupRow) -> std::result::Result<(), BackupError> {
        self.record(ExporterCall::Update(row))
    }

    async fn delete_row_by_id(&self, id: &str) -> std::result::Result<(), BackupError> {
        self.record(ExporterCall::Delete(id.to_string()))
    }

    async fn clear_and_rewrite_all(
        &self,
        rows: Vec<BackupRow>,
    ) -> std::result::Result<(), BackupError> {
        self.record(ExporterCall::RewriteAll(rows))
    }
}
