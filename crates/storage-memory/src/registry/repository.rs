use async_trait::async_trait;
use log::debug;
use money_diary_core::errors::Result;
use money_diary_core::registry::{MasterKind, MasterRecord, MasterRegistryTrait};

use crate::store::MemoryStore;

/// Master registry backed by a [`MemoryStore`]
pub struct InMemoryMasterRegistry {
    store: MemoryStore,
}

impl InMemoryMasterRegistry {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MasterRegistryTrait for InMemoryMasterRegistry {
    async fn query_by_kind(&self, kind: MasterKind) -> Result<Vec<MasterRecord>> {
        Ok(self
            .store
            .state()
            .read()
            .await
            .masters
            .values()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect())
    }

    async fn get(&self, kind: MasterKind, id: &str) -> Result<Option<MasterRecord>> {
        Ok(self
            .store
            .state()
            .read()
            .await
            .masters
            .get(&(kind, id.to_string()))
            .cloned())
    }

    async fn put(&self, record: MasterRecord) -> Result<()> {
        let key = (record.kind(), record.id().to_string());
        self.store.state().write().await.masters.insert(key, record);
        Ok(())
    }

    async fn delete(&self, kind: MasterKind, id: &str) -> Result<()> {
        self.store
            .state()
            .write()
            .await
            .masters
            .remove(&(kind, id.to_string()));
        Ok(())
    }

    async fn compare_and_set_last_created_month(
        &self,
        template_id: &str,
        expected: &str,
        new_month: &str,
    ) -> Result<bool> {
        // Check and write under one write lock.
        let mut state = self.store.state().write().await;
        match state
            .masters
            .get_mut(&(MasterKind::Recurring, template_id.to_string()))
        {
            Some(MasterRecord::Recurring(template)) if template.last_created_month == expected => {
                template.last_created_month = new_month.to_string();
                Ok(true)
            }
            Some(_) => {
                debug!(
                    "lastCreatedMonth of {} is no longer '{}'",
                    template_id, expected
                );
                Ok(false)
            }
            None => Ok(false),
        }
    }
}
