use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::balance_calculator::calculate_payer_balance;
use super::balance_model::PayerBalance;
use crate::errors::Result;
use crate::expenses::ExpenseRepositoryTrait;
use crate::registry::{CategoryScope, RegistryServiceTrait};
use crate::utils::time_utils::YearMonth;

/// Trait for payer balance queries.
#[async_trait]
pub trait BalanceServiceTrait: Send + Sync {
    /// Balance of `payer` (by name) as of `month`. Payers that are unknown,
    /// inactive or not tracking a balance get a zeroed result.
    async fn get_payer_balance(&self, payer: &str, month: &str) -> Result<PayerBalance>;
}

pub struct BalanceService {
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    registry_service: Arc<dyn RegistryServiceTrait>,
}

impl BalanceService {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        registry_service: Arc<dyn RegistryServiceTrait>,
    ) -> Self {
        Self {
            expense_repository,
            registry_service,
        }
    }
}

#[async_trait]
impl BalanceServiceTrait for BalanceService {
    async fn get_payer_balance(&self, payer: &str, month: &str) -> Result<PayerBalance> {
        let month = YearMonth::parse(month)?.to_string();
        let tracked = self
            .registry_service
            .get_payers()
            .await?
            .iter()
            .any(|p| p.name == payer && p.track_balance);
        if !tracked {
            debug!("Payer {} does not track a balance", payer);
            return Ok(PayerBalance::untracked(payer));
        }

        let expenses = self.expense_repository.scan_all().await?;
        let maps = self
            .registry_service
            .category_maps(CategoryScope::All)
            .await?;
        Ok(calculate_payer_balance(payer, &month, &expenses, &maps))
    }
}
