//! Summary module - category aggregation, live summaries and the monthly
//! summary cache.

mod aggregation;
mod summary_model;
mod summary_service;
mod summary_traits;

#[cfg(test)]
mod summary_service_tests;

pub use aggregation::{aggregate_month, compare_months};
pub use summary_model::{
    CategorySummary, MonthComparison, MonthData, MonthlySummary, MonthlySummaryCache,
    YearlySummary,
};
pub use summary_service::SummaryService;
pub use summary_traits::{SummaryCacheRepositoryTrait, SummaryServiceTrait};
