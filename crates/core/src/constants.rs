/// Category label shown in place of a masked `summary` expense's category.
pub const MASKED_CATEGORY_LABEL: &str = "Personal expense";

/// Reserved category name for income; never treated as a wallet charge.
pub const INCOME_CATEGORY_NAME: &str = "Income";

/// Fallback color for categories without one in the registry.
pub const DEFAULT_CATEGORY_COLOR: &str = "#AEB6BF";

/// Largest amount a single expense or recurring template may carry.
///
/// Leaves room to sum a million maximal entries in an `i64`.
pub const MAX_AMOUNT: i64 = i64::MAX / 1_000_000;

/// Number of months returned by the yearly summary (target plus 12 preceding).
pub const YEARLY_SUMMARY_MONTHS: u32 = 13;

/// Identity used when recurring expenses are materialized by the scheduler.
pub const SCHEDULED_ACTOR: &str = "system@scheduled";

/// Default role for users without an explicit one.
pub const DEFAULT_USER_ROLE: &str = "user";
