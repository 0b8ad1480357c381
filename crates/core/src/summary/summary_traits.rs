use std::collections::HashMap;

use async_trait::async_trait;

use super::summary_model::{MonthlySummary, MonthlySummaryCache, YearlySummary};
use crate::errors::Result;

/// Trait for the monthly summary cache store.
#[async_trait]
pub trait SummaryCacheRepositoryTrait: Send + Sync {
    async fn get(&self, month: &str) -> Result<Option<MonthlySummaryCache>>;

    /// Overwrites the cached projection for `summary.month`.
    async fn put(&self, summary: &MonthlySummaryCache) -> Result<()>;

    /// Cached projections for the requested months; months never cached are
    /// absent from the map.
    async fn batch_get(&self, months: &[String]) -> Result<HashMap<String, MonthlySummaryCache>>;
}

/// Trait for summary service operations.
#[async_trait]
pub trait SummaryServiceTrait: Send + Sync {
    /// Live summary for `month` as seen by `viewer`, with comparisons against
    /// the previous month and the same month a year earlier.
    async fn get_monthly_summary(
        &self,
        month: &str,
        payer: Option<&str>,
        viewer: &str,
    ) -> Result<MonthlySummary>;

    /// Thirteen consecutive months ending at `month`, zero-filled.
    async fn get_yearly_summary(
        &self,
        month: &str,
        payer: Option<&str>,
        viewer: &str,
    ) -> Result<YearlySummary>;

    /// Recomputes and stores the shared-category projection for `month`.
    async fn refresh_monthly_cache(&self, month: &str) -> Result<MonthlySummaryCache>;

    /// Reads cached projections without recomputing them.
    async fn get_cached_summaries(
        &self,
        months: &[String],
    ) -> Result<HashMap<String, MonthlySummaryCache>>;
}
