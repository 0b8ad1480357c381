use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::aggregation::{aggregate_month, compare_months};
use super::summary_model::{MonthData, MonthlySummary, MonthlySummaryCache, YearlySummary};
use super::summary_traits::{SummaryCacheRepositoryTrait, SummaryServiceTrait};
use crate::constants::YEARLY_SUMMARY_MONTHS;
use crate::errors::Result;
use crate::expenses::{filter_expenses_for_summary, ExpenseRepositoryTrait};
use crate::registry::{CategoryMaps, CategoryScope, RegistryServiceTrait};
use crate::utils::time_utils::{timestamp_now, YearMonth};

/// Service computing live summaries and maintaining the summary cache.
pub struct SummaryService {
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    registry_service: Arc<dyn RegistryServiceTrait>,
    cache_repository: Arc<dyn SummaryCacheRepositoryTrait>,
}

impl SummaryService {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        registry_service: Arc<dyn RegistryServiceTrait>,
        cache_repository: Arc<dyn SummaryCacheRepositoryTrait>,
    ) -> Self {
        Self {
            expense_repository,
            registry_service,
            cache_repository,
        }
    }

    /// Aggregates one month as `viewer` sees it.
    async fn compute_month(
        &self,
        month: YearMonth,
        payer: Option<&str>,
        viewer: &str,
        maps: &CategoryMaps,
    ) -> Result<MonthData> {
        let key = month.to_string();
        let expenses = self.expense_repository.query_by_month(&key).await?;
        let visible = filter_expenses_for_summary(expenses, viewer);
        Ok(aggregate_month(&visible, &key, payer, maps))
    }
}

/// An empty payer filter means "all payers".
fn payer_filter(payer: Option<&str>) -> Option<&str> {
    payer.filter(|p| !p.is_empty())
}

#[async_trait]
impl SummaryServiceTrait for SummaryService {
    async fn get_monthly_summary(
        &self,
        month: &str,
        payer: Option<&str>,
        viewer: &str,
    ) -> Result<MonthlySummary> {
        let target = YearMonth::parse(month)?;
        let payer = payer_filter(payer);
        let maps = self
            .registry_service
            .category_maps(CategoryScope::Viewer(viewer))
            .await?;

        let current = self.compute_month(target, payer, viewer, &maps).await?;
        let previous = self
            .compute_month(target.previous(), payer, viewer, &maps)
            .await?;
        let previous_year = self
            .compute_month(target.previous_year(), payer, viewer, &maps)
            .await?;

        let previous_month = (previous.total > 0 || current.total > 0)
            .then(|| compare_months(current.total, previous.total));
        let previous_year_month = (previous_year.total > 0 || current.total > 0)
            .then(|| compare_months(current.total, previous_year.total));

        Ok(MonthlySummary {
            month: current.month,
            total: current.total,
            by_category: current.by_category,
            previous_month,
            previous_year_month,
        })
    }

    async fn get_yearly_summary(
        &self,
        month: &str,
        payer: Option<&str>,
        viewer: &str,
    ) -> Result<YearlySummary> {
        let target = YearMonth::parse(month)?;
        let payer = payer_filter(payer);
        let maps = self
            .registry_service
            .category_maps(CategoryScope::Viewer(viewer))
            .await?;

        let mut months = Vec::with_capacity(YEARLY_SUMMARY_MONTHS as usize);
        for ym in target.trailing(YEARLY_SUMMARY_MONTHS) {
            months.push(self.compute_month(ym, payer, viewer, &maps).await?);
        }

        Ok(YearlySummary {
            year: format!("{:04}", target.year()),
            months,
        })
    }

    async fn refresh_monthly_cache(&self, month: &str) -> Result<MonthlySummaryCache> {
        let month = YearMonth::parse(month)?.to_string();
        let expenses = self.expense_repository.query_by_month(&month).await?;
        let maps = self
            .registry_service
            .category_maps(CategoryScope::Shared)
            .await?;

        let data = aggregate_month(&expenses, &month, None, &maps);
        let cache = MonthlySummaryCache::from_month_data(data, timestamp_now());
        self.cache_repository.put(&cache).await?;
        debug!(
            "Refreshed summary cache for {}: total {} across {} categories",
            cache.month,
            cache.total,
            cache.by_category.len()
        );
        Ok(cache)
    }

    async fn get_cached_summaries(
        &self,
        months: &[String],
    ) -> Result<HashMap<String, MonthlySummaryCache>> {
        for month in months {
            YearMonth::parse(month)?;
        }
        self.cache_repository.batch_get(months).await
    }
}
