use async_trait::async_trait;
use chrono::NaiveDate;

use super::recurring_model::{RecurringExpense, RecurringExpenseInput, RecurringRunError};
use crate::errors::Result;

/// Trait for recurring template management and materialization.
#[async_trait]
pub trait RecurringServiceTrait: Send + Sync {
    /// Every template, oldest first.
    async fn get_recurring_expenses(&self) -> Result<Vec<RecurringExpense>>;

    async fn create_recurring_expense(
        &self,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense>;

    /// Replaces the editable fields; `lastCreatedMonth` is kept.
    async fn update_recurring_expense(
        &self,
        id: &str,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense>;

    async fn delete_recurring_expense(&self, id: &str) -> Result<()>;

    /// Materializes every due template for the current month in the ledger
    /// timezone. Returns the number of expenses created.
    async fn process_recurring(&self, acting_user: &str)
        -> std::result::Result<usize, RecurringRunError>;

    /// Same as `process_recurring`, for the month containing `today`.
    async fn process_recurring_on(
        &self,
        acting_user: &str,
        today: NaiveDate,
    ) -> std::result::Result<usize, RecurringRunError>;
}
