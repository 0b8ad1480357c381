//! Expense repository and service traits.
//!
//! These traits define the contract for expense operations without any
//! store-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::expenses_model::{Expense, ExpenseInput};
use crate::errors::Result;

/// Trait defining the contract for Expense store operations.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Expense>>;

    /// Inserts or overwrites an expense by id.
    async fn put(&self, expense: &Expense) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Expenses dated within `month` (`YYYY-MM`), newest date first.
    async fn query_by_month(&self, month: &str) -> Result<Vec<Expense>>;

    /// Every expense ever recorded, in no particular order.
    async fn scan_all(&self) -> Result<Vec<Expense>>;
}

/// Trait defining the contract for Expense service operations.
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    /// A single expense as `viewer` is allowed to see it.
    async fn get_expense(&self, id: &str, viewer: &str) -> Result<Expense>;

    /// The month's expenses through the list-view visibility filter.
    async fn get_expenses_by_month(&self, month: &str, viewer: &str) -> Result<Vec<Expense>>;

    /// Unfiltered full history.
    async fn get_all_expenses(&self) -> Result<Vec<Expense>>;

    async fn create_expense(&self, input: ExpenseInput, acting_user: &str) -> Result<Expense>;

    /// Validates every input before writing any. A write failure stops the
    /// batch; items already written stay written.
    async fn bulk_create_expenses(
        &self,
        inputs: Vec<ExpenseInput>,
        acting_user: &str,
    ) -> Result<Vec<Expense>>;

    async fn update_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense>;

    async fn delete_expense(&self, id: &str) -> Result<()>;
}
