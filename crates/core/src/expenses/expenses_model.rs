//! Expense domain models.

use serde::{Deserialize, Serialize};

use super::visibility::{effective_visibility, validate_visibility, Visibility};
use crate::constants::MAX_AMOUNT;
use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::{month_key, parse_date};

/// Domain model representing a recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub payer: String,
    /// Category id.
    pub category: String,
    pub amount: i64,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub place: String,
    /// Stored as written; empty means public.
    #[serde(default)]
    pub visibility: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Expense {
    /// The `YYYY-MM` bucket this expense belongs to.
    pub fn year_month(&self) -> Option<&str> {
        month_key(&self.date)
    }

    pub fn effective_visibility(&self) -> Visibility {
        effective_visibility(&self.visibility)
    }

    pub fn is_owned_by(&self, user: &str) -> bool {
        self.created_by == user
    }
}

/// Input model for creating or updating an expense
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub date: String,
    #[serde(default)]
    pub payer: String,
    pub category: String,
    pub amount: i64,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub visibility: String,
}

impl ExpenseInput {
    /// Validates required fields, the date format and the visibility tier.
    pub fn validate(&self) -> Result<()> {
        if self.date.trim().is_empty() || self.category.trim().is_empty() || self.amount <= 0 {
            return Err(ValidationError::InvalidInput(
                "Date, category and an amount greater than zero are required".to_string(),
            )
            .into());
        }
        if self.amount > MAX_AMOUNT {
            return Err(ValidationError::InvalidInput(format!(
                "Amount must not exceed {}",
                MAX_AMOUNT
            ))
            .into());
        }
        parse_date(&self.date).map_err(|_| {
            ValidationError::InvalidInput(format!(
                "Invalid date '{}', expected YYYY-MM-DD",
                self.date
            ))
        })?;
        if !validate_visibility(&self.visibility) {
            return Err(ValidationError::InvalidInput(
                "Visibility must be one of public, summary or private".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
