//! Summary domain models.

use serde::{Deserialize, Serialize};

/// Per-category total within one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: String,
    /// Display name, or the id when the category is unknown.
    pub category: String,
    pub amount: i64,
    pub color: String,
}

/// Comparison of a month against an earlier one
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    /// Total of the earlier month.
    pub total: i64,
    pub diff: i64,
    /// Percentage change truncated to two decimals; zero when the earlier
    /// month has no spending.
    pub diff_percent: f64,
}

/// Aggregated totals for one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    pub month: String,
    pub total: i64,
    pub by_category: Vec<CategorySummary>,
}

impl MonthData {
    pub fn empty(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            ..Default::default()
        }
    }
}

/// Live monthly summary with comparisons
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub total: i64,
    pub by_category: Vec<CategorySummary>,
    pub previous_month: Option<MonthComparison>,
    pub previous_year_month: Option<MonthComparison>,
}

/// Trailing thirteen months ending at the requested month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: String,
    pub months: Vec<MonthData>,
}

/// Materialized month projection kept in the summary cache store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryCache {
    pub month: String,
    pub total: i64,
    pub by_category: Vec<CategorySummary>,
    pub refreshed_at: String,
}

impl MonthlySummaryCache {
    pub fn from_month_data(data: MonthData, refreshed_at: String) -> Self {
        Self {
            month: data.month,
            total: data.total,
            by_category: data.by_category,
            refreshed_at,
        }
    }

    pub fn to_month_data(&self) -> MonthData {
        MonthData {
            month: self.month.clone(),
            total: self.total,
            by_category: self.by_category.clone(),
        }
    }
}
