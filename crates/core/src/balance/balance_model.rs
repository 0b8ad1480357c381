use serde::{Deserialize, Serialize};

/// Running wallet balance of one payer as of a month
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayerBalance {
    pub payer: String,
    /// Net of all charges and spending before the month.
    pub carryover: i64,
    pub month_charge: i64,
    pub month_spent: i64,
    pub balance: i64,
}

impl PayerBalance {
    /// Zeroed result for payers that do not track a balance.
    pub fn untracked(payer: impl Into<String>) -> Self {
        Self {
            payer: payer.into(),
            ..Default::default()
        }
    }
}
