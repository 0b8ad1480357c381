//! Ledger facade wiring the services over injected stores.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};

use crate::backup::{
    spawn_backup_worker, BackupExporterTrait, BackupJob, BackupQueue, BackupSinkTrait,
    BackupWorkerDeps, NoOpBackupSink,
};
use crate::balance::{BalanceService, BalanceServiceTrait, PayerBalance};
use crate::config::LedgerConfig;
use crate::errors::{Error, Result};
use crate::expenses::{
    Expense, ExpenseInput, ExpenseRepositoryTrait, ExpenseService, ExpenseServiceTrait,
};
use crate::recurring::{
    RecurringExpense, RecurringExpenseInput, RecurringRunError, RecurringService,
    RecurringServiceTrait,
};
use crate::registry::{MasterRegistryTrait, RegistryService, RegistryServiceTrait};
use crate::summary::{
    MonthlySummary, MonthlySummaryCache, SummaryCacheRepositoryTrait, SummaryService,
    SummaryServiceTrait, YearlySummary,
};

/// Store handles the ledger is built on.
#[derive(Clone)]
pub struct LedgerStores {
    pub expenses: Arc<dyn ExpenseRepositoryTrait>,
    pub registry: Arc<dyn MasterRegistryTrait>,
    pub summary_cache: Arc<dyn SummaryCacheRepositoryTrait>,
}

/// Entry point for every household ledger operation.
pub struct Ledger {
    config: LedgerConfig,
    registry_service: Arc<dyn RegistryServiceTrait>,
    summary_service: Arc<dyn SummaryServiceTrait>,
    expense_service: Arc<dyn ExpenseServiceTrait>,
    recurring_service: Arc<dyn RecurringServiceTrait>,
    balance_service: Arc<dyn BalanceServiceTrait>,
    backup_sink: Arc<dyn BackupSinkTrait>,
    backup_queue: Option<BackupQueue>,
}

impl Ledger {
    /// Builds the ledger. When backups are enabled the backup worker is
    /// spawned on the current Tokio runtime.
    pub fn new(
        stores: LedgerStores,
        exporter: Option<Arc<dyn BackupExporterTrait>>,
        config: LedgerConfig,
    ) -> Result<Self> {
        let registry_service: Arc<dyn RegistryServiceTrait> =
            Arc::new(RegistryService::new(stores.registry.clone()));

        let (backup_sink, backup_queue): (Arc<dyn BackupSinkTrait>, Option<BackupQueue>) =
            match (config.backup.enabled, exporter) {
                (true, Some(exporter)) => {
                    let (queue, _worker) = spawn_backup_worker(BackupWorkerDeps {
                        exporter,
                        registry_service: registry_service.clone(),
                        expense_repository: stores.expenses.clone(),
                    })?;
                    info!("Backup exporter enabled");
                    (Arc::new(queue.clone()), Some(queue))
                }
                (true, None) => {
                    return Err(Error::InvalidConfigValue(
                        "backup is enabled but no exporter was provided".to_string(),
                    ));
                }
                (false, exporter) => {
                    if exporter.is_some() {
                        warn!("Backup exporter provided but backups are disabled");
                    }
                    (Arc::new(NoOpBackupSink), None)
                }
            };

        let summary_service: Arc<dyn SummaryServiceTrait> = Arc::new(SummaryService::new(
            stores.expenses.clone(),
            registry_service.clone(),
            stores.summary_cache.clone(),
        ));
        let expense_service: Arc<dyn ExpenseServiceTrait> = Arc::new(ExpenseService::new(
            stores.expenses.clone(),
            summary_service.clone(),
            backup_sink.clone(),
        ));
        let recurring_service: Arc<dyn RecurringServiceTrait> = Arc::new(RecurringService::new(
            stores.registry.clone(),
            expense_service.clone(),
            config.timezone,
        ));
        let balance_service: Arc<dyn BalanceServiceTrait> = Arc::new(BalanceService::new(
            stores.expenses.clone(),
            registry_service.clone(),
        ));

        Ok(Self {
            config,
            registry_service,
            summary_service,
            expense_service,
            recurring_service,
            balance_service,
            backup_sink,
            backup_queue,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Master data management (categories, places, payers, users).
    pub fn registry(&self) -> Arc<dyn RegistryServiceTrait> {
        self.registry_service.clone()
    }

    pub fn expenses(&self) -> Arc<dyn ExpenseServiceTrait> {
        self.expense_service.clone()
    }

    pub fn summaries(&self) -> Arc<dyn SummaryServiceTrait> {
        self.summary_service.clone()
    }

    pub fn recurring(&self) -> Arc<dyn RecurringServiceTrait> {
        self.recurring_service.clone()
    }

    // Expenses

    pub async fn create_expense(&self, input: ExpenseInput, acting_user: &str) -> Result<Expense> {
        self.expense_service.create_expense(input, acting_user).await
    }

    pub async fn bulk_create_expenses(
        &self,
        inputs: Vec<ExpenseInput>,
        acting_user: &str,
    ) -> Result<Vec<Expense>> {
        self.expense_service
            .bulk_create_expenses(inputs, acting_user)
            .await
    }

    pub async fn update_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense> {
        self.expense_service.update_expense(id, input).await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        self.expense_service.delete_expense(id).await
    }

    pub async fn get_expense(&self, id: &str, viewer: &str) -> Result<Expense> {
        self.expense_service.get_expense(id, viewer).await
    }

    pub async fn get_expenses_by_month(&self, month: &str, viewer: &str) -> Result<Vec<Expense>> {
        self.expense_service.get_expenses_by_month(month, viewer).await
    }

    pub async fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        self.expense_service.get_all_expenses().await
    }

    // Summaries

    pub async fn get_monthly_summary(
        &self,
        month: &str,
        payer: Option<&str>,
        viewer: &str,
    ) -> Result<MonthlySummary> {
        self.summary_service
            .get_monthly_summary(month, payer, viewer)
            .await
    }

    pub async fn get_yearly_summary(
        &self,
        month: &str,
        payer: Option<&str>,
        viewer: &str,
    ) -> Result<YearlySummary> {
        self.summary_service
            .get_yearly_summary(month, payer, viewer)
            .await
    }

    pub async fn get_cached_summaries(
        &self,
        months: &[String],
    ) -> Result<HashMap<String, MonthlySummaryCache>> {
        self.summary_service.get_cached_summaries(months).await
    }

    // Balances

    pub async fn get_payer_balance(&self, payer: &str, month: &str) -> Result<PayerBalance> {
        self.balance_service.get_payer_balance(payer, month).await
    }

    // Recurring

    pub async fn get_recurring_expenses(&self) -> Result<Vec<RecurringExpense>> {
        self.recurring_service.get_recurring_expenses().await
    }

    pub async fn create_recurring_expense(
        &self,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense> {
        self.recurring_service.create_recurring_expense(input).await
    }

    pub async fn update_recurring_expense(
        &self,
        id: &str,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense> {
        self.recurring_service
            .update_recurring_expense(id, input)
            .await
    }

    pub async fn delete_recurring_expense(&self, id: &str) -> Result<()> {
        self.recurring_service.delete_recurring_expense(id).await
    }

    pub async fn process_recurring(
        &self,
        acting_user: &str,
    ) -> std::result::Result<usize, RecurringRunError> {
        self.recurring_service.process_recurring(acting_user).await
    }

    pub async fn process_recurring_on(
        &self,
        acting_user: &str,
        today: NaiveDate,
    ) -> std::result::Result<usize, RecurringRunError> {
        self.recurring_service
            .process_recurring_on(acting_user, today)
            .await
    }

    // Backup

    /// Queues a full rewrite of the backup target from the expense store.
    pub fn request_full_backup(&self) {
        self.backup_sink.enqueue(BackupJob::RewriteAll);
    }

    /// Waits for queued backup jobs to finish. Returns immediately when
    /// backups are disabled.
    pub async fn flush_backups(&self) {
        if let Some(queue) = &self.backup_queue {
            queue.flush().await;
        }
    }
}
