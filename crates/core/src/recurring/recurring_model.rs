//! Recurring expense template models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_AMOUNT;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::YearMonth;

/// How often a template produces an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    /// Accepted for compatibility; materializes exactly like `Monthly`.
    Bimonthly,
    Yearly,
}

impl Frequency {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(Frequency::Monthly),
            "bimonthly" => Some(Frequency::Bimonthly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Bimonthly => "bimonthly",
            Frequency::Yearly => "yearly",
        }
    }
}

/// Template that the materializer turns into one expense per due month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: String,
    pub category: String,
    pub amount: i64,
    #[serde(default)]
    pub payer: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub memo: String,
    pub frequency: Frequency,
    /// 1-31; clamped to the month's last day when materialized.
    pub day_of_month: u32,
    /// 1-12, only meaningful for yearly templates.
    #[serde(default)]
    pub repeat_month: u32,
    /// Inclusive `YYYY-MM` bounds; empty means unbounded.
    #[serde(default)]
    pub start_month: String,
    #[serde(default)]
    pub end_month: String,
    pub is_active: bool,
    /// Written only by the materializer.
    #[serde(default)]
    pub last_created_month: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RecurringExpense {
    /// Whether the template should produce an expense for `month`.
    ///
    /// Bounds that fail to parse are ignored.
    pub fn is_due_in(&self, month: YearMonth) -> bool {
        if !self.is_active {
            return false;
        }
        let key = month.to_string();
        if !self.last_created_month.is_empty() && self.last_created_month.as_str() >= key.as_str()
        {
            return false;
        }
        if let Ok(start) = YearMonth::parse(&self.start_month) {
            if month < start {
                return false;
            }
        }
        if let Ok(end) = YearMonth::parse(&self.end_month) {
            if month > end {
                return false;
            }
        }
        match self.frequency {
            Frequency::Yearly => month.month() == self.repeat_month,
            Frequency::Monthly | Frequency::Bimonthly => true,
        }
    }

    /// The date the expense for `month` is booked on.
    pub fn target_date(&self, month: YearMonth) -> NaiveDate {
        month.clamped_date(self.day_of_month)
    }
}

/// Input model for creating or updating a template
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpenseInput {
    pub category: String,
    pub amount: i64,
    #[serde(default)]
    pub payer: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub memo: String,
    pub frequency: String,
    pub day_of_month: u32,
    #[serde(default)]
    pub repeat_month: u32,
    #[serde(default)]
    pub start_month: String,
    #[serde(default)]
    pub end_month: String,
    pub is_active: bool,
}

impl RecurringExpenseInput {
    /// Validates the input and returns the parsed frequency.
    pub fn validate(&self) -> Result<Frequency> {
        if self.category.trim().is_empty()
            || self.amount <= 0
            || !(1..=31).contains(&self.day_of_month)
        {
            return Err(ValidationError::InvalidInput(
                "Category, an amount greater than zero and a day between 1 and 31 are required"
                    .to_string(),
            )
            .into());
        }
        if self.amount > MAX_AMOUNT {
            return Err(Error::validation(format!(
                "Amount must not exceed {}",
                MAX_AMOUNT
            )));
        }
        let frequency = Frequency::parse(&self.frequency).ok_or_else(|| {
            Error::validation("Frequency must be one of monthly, bimonthly or yearly")
        })?;
        if frequency == Frequency::Yearly && !(1..=12).contains(&self.repeat_month) {
            return Err(Error::validation(
                "Yearly templates need a repeat month between 1 and 12",
            ));
        }

        let start = Self::parse_bound("startMonth", &self.start_month)?;
        let end = Self::parse_bound("endMonth", &self.end_month)?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(Error::validation("startMonth must not be after endMonth"));
            }
        }
        Ok(frequency)
    }

    fn parse_bound(field: &str, value: &str) -> Result<Option<YearMonth>> {
        if value.is_empty() {
            return Ok(None);
        }
        YearMonth::parse(value).map(Some).map_err(|_| {
            Error::validation(format!("Invalid {} '{}', expected YYYY-MM", field, value))
        })
    }
}

/// A materializer run that stopped part-way.
///
/// Expenses created before the failure stay committed.
#[derive(Error, Debug)]
#[error(
    "Recurring run stopped at template {template_id} after creating {created} expense(s): {source}"
)]
pub struct RecurringRunError {
    pub created: usize,
    pub template_id: String,
    #[source]
    pub source: Error,
}

impl RecurringRunError {
    /// Wraps a failure that happened before any template was examined.
    pub fn before_start(source: Error) -> Self {
        Self {
            created: 0,
            template_id: String::new(),
            source,
        }
    }
}
