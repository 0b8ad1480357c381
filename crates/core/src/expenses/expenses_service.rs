use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};
use uuid::Uuid;

use super::expenses_model::{Expense, ExpenseInput};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use super::visibility::filter_expenses_for_user;
use crate::backup::{BackupJob, BackupSinkTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::summary::SummaryServiceTrait;
use crate::utils::time_utils::{month_key, timestamp_now, YearMonth};

const ENTITY: &str = "Expense";

/// Service for recording expenses and keeping derived data in step.
///
/// Every successful write refreshes the summary cache for the affected
/// month(s) and hands a job to the backup sink.
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    summary_service: Arc<dyn SummaryServiceTrait>,
    backup_sink: Arc<dyn BackupSinkTrait>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        summary_service: Arc<dyn SummaryServiceTrait>,
        backup_sink: Arc<dyn BackupSinkTrait>,
    ) -> Self {
        Self {
            repository,
            summary_service,
            backup_sink,
        }
    }

    fn build_expense(input: ExpenseInput, acting_user: &str, now: &str) -> Expense {
        Expense {
            id: Uuid::new_v4().to_string(),
            date: input.date,
            payer: input.payer,
            category: input.category,
            amount: input.amount,
            memo: input.memo,
            place: input.place,
            visibility: input.visibility,
            created_by: acting_user.to_string(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    async fn save(&self, expense: &Expense) -> Result<()> {
        self.repository.put(expense).await.map_err(|e| {
            error!("Failed to save expense {}: {}", expense.id, e);
            e
        })
    }

    /// Recomputes the cached summary for the month `date` falls in.
    ///
    /// The expense write has already succeeded, so failures are only logged.
    async fn refresh_cache_for(&self, date: &str) {
        let Some(month) = month_key(date) else {
            return;
        };
        if let Err(e) = self.summary_service.refresh_monthly_cache(month).await {
            warn!("Summary cache refresh failed for {}: {}", month, e);
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    async fn get_expense(&self, id: &str, viewer: &str) -> Result<Expense> {
        let expense = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, id))?;
        // A private expense of another user is indistinguishable from a
        // missing one.
        filter_expenses_for_user(vec![expense], viewer)
            .pop()
            .ok_or_else(|| Error::not_found(ENTITY, id))
    }

    async fn get_expenses_by_month(&self, month: &str, viewer: &str) -> Result<Vec<Expense>> {
        let month = YearMonth::parse(month)?.to_string();
        let expenses = self.repository.query_by_month(&month).await?;
        Ok(filter_expenses_for_user(expenses, viewer))
    }

    async fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        self.repository.scan_all().await
    }

    async fn create_expense(&self, input: ExpenseInput, acting_user: &str) -> Result<Expense> {
        input.validate()?;
        let expense = Self::build_expense(input, acting_user, &timestamp_now());
        self.save(&expense).await?;
        debug!(
            "Created expense {} on {} ({})",
            expense.id, expense.date, expense.amount
        );

        self.refresh_cache_for(&expense.date).await;
        self.backup_sink.enqueue(BackupJob::Append(expense.clone()));
        Ok(expense)
    }

    async fn bulk_create_expenses(
        &self,
        inputs: Vec<ExpenseInput>,
        acting_user: &str,
    ) -> Result<Vec<Expense>> {
        if inputs.is_empty() {
            return Err(Error::validation("No expenses to register"));
        }
        for (i, input) in inputs.iter().enumerate() {
            input.validate().map_err(|e| match e {
                Error::Validation(inner) => Error::Validation(ValidationError::InvalidInput(
                    format!("Item {}: {}", i + 1, inner),
                )),
                other => other,
            })?;
        }

        let now = timestamp_now();
        let mut created = Vec::with_capacity(inputs.len());
        let mut affected_months = BTreeSet::new();
        let mut failure = None;

        for input in inputs {
            let expense = Self::build_expense(input, acting_user, &now);
            if let Err(e) = self.save(&expense).await {
                failure = Some(e);
                break;
            }
            if let Some(month) = expense.year_month() {
                affected_months.insert(month.to_string());
            }
            created.push(expense);
        }

        // Items already written stay written; their months still need a
        // fresh projection even when the batch stopped early.
        for month in &affected_months {
            self.refresh_cache_for(month).await;
        }
        for expense in &created {
            self.backup_sink.enqueue(BackupJob::Append(expense.clone()));
        }

        match failure {
            Some(e) => {
                warn!(
                    "Bulk create stopped after {} of the batch were written",
                    created.len()
                );
                Err(e)
            }
            None => {
                debug!(
                    "Bulk created {} expenses across {} month(s)",
                    created.len(),
                    affected_months.len()
                );
                Ok(created)
            }
        }
    }

    async fn update_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense> {
        input.validate()?;
        let existing = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, id))?;
        let old_date = existing.date.clone();

        let expense = Expense {
            date: input.date,
            payer: input.payer,
            category: input.category,
            amount: input.amount,
            memo: input.memo,
            place: input.place,
            visibility: input.visibility,
            updated_at: timestamp_now(),
            ..existing
        };
        self.save(&expense).await?;

        self.refresh_cache_for(&expense.date).await;
        if month_key(&old_date) != month_key(&expense.date) {
            self.refresh_cache_for(&old_date).await;
        }
        self.backup_sink.enqueue(BackupJob::Update(expense.clone()));
        Ok(expense)
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        let existing = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, id))?;

        self.repository.delete(id).await.map_err(|e| {
            error!("Failed to delete expense {}: {}", id, e);
            e
        })?;

        self.refresh_cache_for(&existing.date).await;
        self.backup_sink.enqueue(BackupJob::Delete { id: id.to_string() });
        Ok(())
    }
}
