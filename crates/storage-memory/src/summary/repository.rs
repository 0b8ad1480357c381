use std::collections::HashMap;

use async_trait::async_trait;
use money_diary_core::errors::Result;
use money_diary_core::summary::{MonthlySummaryCache, SummaryCacheRepositoryTrait};

use crate::store::MemoryStore;

/// Summary cache backed by a [`MemoryStore`]
pub struct InMemorySummaryCache {
    store: MemoryStore,
}

impl InMemorySummaryCache {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SummaryCacheRepositoryTrait for InMemorySummaryCache {
    async fn get(&self, month: &str) -> Result<Option<MonthlySummaryCache>> {
        Ok(self.store.state().read().await.summaries.get(month).cloned())
    }

    async fn put(&self, summary: &MonthlySummaryCache) -> Result<()> {
        self.store
            .state()
            .write()
            .await
            .summaries
            .insert(summary.month.clone(), summary.clone());
        Ok(())
    }

    async fn batch_get(&self, months: &[String]) -> Result<HashMap<String, MonthlySummaryCache>> {
        let state = self.store.state().read().await;
        Ok(months
            .iter()
            .filter_map(|m| state.summaries.get(m).map(|s| (m.clone(), s.clone())))
            .collect())
    }
}
