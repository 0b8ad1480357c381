use async_trait::async_trait;
use money_diary_core::errors::Result;
use money_diary_core::expenses::{Expense, ExpenseRepositoryTrait};
use money_diary_core::utils::month_key;

use crate::store::MemoryStore;

/// Repository for expenses held in a [`MemoryStore`]
pub struct InMemoryExpenseRepository {
    store: MemoryStore,
}

impl InMemoryExpenseRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryExpenseRepository {
    async fn get(&self, id: &str) -> Result<Option<Expense>> {
        Ok(self.store.state().read().await.expenses.get(id).cloned())
    }

    async fn put(&self, expense: &Expense) -> Result<()> {
        self.store
            .state()
            .write()
            .await
            .expenses
            .insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.state().write().await.expenses.remove(id);
        Ok(())
    }

    async fn query_by_month(&self, month: &str) -> Result<Vec<Expense>> {
        let state = self.store.state().read().await;
        let mut found: Vec<Expense> = state
            .expenses
            .values()
            .filter(|e| month_key(&e.date) == Some(month))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(found)
    }

    async fn scan_all(&self) -> Result<Vec<Expense>> {
        Ok(self
            .store
            .state()
            .read()
            .await
            .expenses
            .values()
            .cloned()
            .collect())
    }
}
