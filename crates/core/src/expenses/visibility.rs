//! Read-time visibility rules for expenses shared between users.
//!
//! Two transforms exist. The list view hides details of other users'
//! `summary` expenses and drops their `private` ones. The aggregation view
//! only drops other users' `private` expenses, so category totals stay
//! correct.

use serde::{Deserialize, Serialize};

use super::expenses_model::Expense;
use crate::constants::MASKED_CATEGORY_LABEL;

/// Per-expense access level controlling what non-owners see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Summary,
    Private,
}

impl Visibility {
    /// Parses a stored or submitted tier. Empty means public.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "public" => Some(Visibility::Public),
            "summary" => Some(Visibility::Summary),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Summary => "summary",
            Visibility::Private => "private",
        }
    }
}

/// Effective tier of a stored value for the list view.
///
/// Unrecognized legacy values are treated as private there. The aggregation
/// view only drops values that are literally `private`.
pub fn effective_visibility(value: &str) -> Visibility {
    Visibility::parse(value).unwrap_or(Visibility::Private)
}

/// True exactly for `""`, `public`, `summary` and `private`.
pub fn validate_visibility(value: &str) -> bool {
    Visibility::parse(value).is_some()
}

/// List-view filter for `viewer`.
pub fn filter_expenses_for_user(expenses: Vec<Expense>, viewer: &str) -> Vec<Expense> {
    expenses
        .into_iter()
        .filter_map(|expense| {
            if expense.is_owned_by(viewer) {
                return Some(expense);
            }
            match expense.effective_visibility() {
                Visibility::Public => Some(expense),
                Visibility::Summary => Some(mask_expense(expense)),
                Visibility::Private => None,
            }
        })
        .collect()
}

/// Aggregation-view filter for `viewer`. Never masks the category.
///
/// Only other users' `private` entries are dropped; unrecognized stored
/// tiers still count toward totals.
pub fn filter_expenses_for_summary(expenses: Vec<Expense>, viewer: &str) -> Vec<Expense> {
    expenses
        .into_iter()
        .filter(|expense| {
            expense.is_owned_by(viewer)
                || Visibility::parse(&expense.visibility) != Some(Visibility::Private)
        })
        .collect()
}

fn mask_expense(expense: Expense) -> Expense {
    Expense {
        category: MASKED_CATEGORY_LABEL.to_string(),
        memo: String::new(),
        place: String::new(),
        ..expense
    }
}
