//! Category aggregation for a single month.
//!
//! Exclusion happens in two stages and the order matters. Categories marked
//! `exclude_from_summary` are removed before the total is taken, so they
//! count nowhere. Categories marked `exclude_from_breakdown` are removed
//! after the total, so their amounts stay inside it while disappearing from
//! the displayed list.

use std::collections::HashMap;

use super::summary_model::{CategorySummary, MonthComparison, MonthData};
use crate::expenses::Expense;
use crate::registry::CategoryMaps;
use crate::utils::time_utils::month_key;

/// Aggregates `expenses` for `month`, optionally restricted to one payer.
///
/// Expenses dated outside `month` are ignored, so callers may pass a wider
/// list.
pub fn aggregate_month(
    expenses: &[Expense],
    month: &str,
    payer: Option<&str>,
    maps: &CategoryMaps,
) -> MonthData {
    // Grouped in discovery order; the final sort is stable.
    let mut groups: Vec<(&str, i64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        if month_key(&expense.date) != Some(month) {
            continue;
        }
        if payer.is_some_and(|p| expense.payer != p) {
            continue;
        }
        let category = expense.category.as_str();
        match index.get(category) {
            Some(&i) => groups[i].1 = groups[i].1.saturating_add(expense.amount),
            None => {
                index.insert(category, groups.len());
                groups.push((category, expense.amount));
            }
        }
    }

    let counted: Vec<(&str, i64)> = groups
        .into_iter()
        .filter(|(id, _)| maps.is_expense(id))
        .filter(|(id, _)| !maps.excluded_from_summary(id))
        .collect();

    // Stored rows are not bound by the input cap; sums saturate.
    let total = counted
        .iter()
        .fold(0i64, |acc, (_, amount)| acc.saturating_add(*amount));

    let mut by_category: Vec<CategorySummary> = counted
        .into_iter()
        .filter(|(id, _)| !maps.excluded_from_breakdown(id))
        .map(|(id, amount)| CategorySummary {
            category_id: id.to_string(),
            category: maps.name(id).to_string(),
            amount,
            color: maps.color(id).to_string(),
        })
        .collect();
    by_category.sort_by_key(|c| maps.sort_order(&c.category_id));

    MonthData {
        month: month.to_string(),
        total,
        by_category,
    }
}

/// Compares `current` against an earlier month's total.
pub fn compare_months(current: i64, previous: i64) -> MonthComparison {
    let diff = current.saturating_sub(previous);
    let diff_percent = if previous > 0 {
        let percent = diff as f64 / previous as f64 * 100.0;
        (percent * 100.0).trunc() / 100.0
    } else {
        0.0
    };
    MonthComparison {
        total: previous,
        diff,
        diff_percent,
    }
}
