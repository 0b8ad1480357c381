//! Payer balance calculation over the full expense history.
//!
//! Charges (non-expense categories other than income) top up the wallet no
//! matter which payer recorded them. Spending only counts for the queried
//! payer. Anything dated after the target month is ignored.

use std::cmp::Ordering;

use super::balance_model::PayerBalance;
use crate::expenses::Expense;
use crate::registry::CategoryMaps;

pub fn calculate_payer_balance(
    payer: &str,
    month: &str,
    expenses: &[Expense],
    maps: &CategoryMaps,
) -> PayerBalance {
    let charge_ids = maps.charge_category_ids();
    let mut carryover: i64 = 0;
    let mut month_charge: i64 = 0;
    let mut month_spent: i64 = 0;

    for expense in expenses {
        let Some(expense_month) = expense.year_month() else {
            continue;
        };
        let ordering = expense_month.cmp(month);
        if ordering == Ordering::Greater {
            continue;
        }

        if charge_ids.contains(expense.category.as_str()) {
            match ordering {
                Ordering::Less => carryover = carryover.saturating_add(expense.amount),
                _ => month_charge = month_charge.saturating_add(expense.amount),
            }
        } else if expense.payer == payer && maps.is_expense(&expense.category) {
            match ordering {
                Ordering::Less => carryover = carryover.saturating_sub(expense.amount),
                _ => month_spent = month_spent.saturating_add(expense.amount),
            }
        }
    }

    PayerBalance {
        payer: payer.to_string(),
        carryover,
        month_charge,
        month_spent,
        balance: carryover
            .saturating_add(month_charge)
            .saturating_sub(month_spent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Category;

    fn category(id: &str, name: &str, is_expense: bool) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            sort_order: 1,
            color: String::new(),
            is_active: true,
            is_expense,
            exclude_from_breakdown: false,
            exclude_from_summary: false,
            owner: String::new(),
        }
    }

    fn expense(date: &str, payer: &str, category: &str, amount: i64) -> Expense {
        Expense {
            id: format!("{date}-{category}-{amount}"),
            date: date.to_string(),
            payer: payer.to_string(),
            category: category.to_string(),
            amount,
            memo: String::new(),
            place: String::new(),
            visibility: String::new(),
            created_by: "alice@example.com".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn maps() -> CategoryMaps {
        CategoryMaps::from_categories(vec![
            category("charge", "Cash top-up", false),
            category("income", "Income", false),
            category("food", "Food", true),
        ])
    }

    #[test]
    fn test_carryover_charge_and_spending() {
        let expenses = vec![
            expense("2024-04-03", "Wallet", "charge", 10000),
            expense("2024-05-02", "Wallet", "charge", 5000),
            expense("2024-05-10", "Wallet", "food", 3000),
        ];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(
            balance,
            PayerBalance {
                payer: "Wallet".to_string(),
                carryover: 10000,
                month_charge: 5000,
                month_spent: 3000,
                balance: 12000,
            }
        );
    }

    #[test]
    fn test_earlier_spending_reduces_carryover() {
        let expenses = vec![
            expense("2024-03-01", "Wallet", "charge", 10000),
            expense("2024-04-15", "Wallet", "food", 2500),
        ];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(balance.carryover, 7500);
        assert_eq!(balance.balance, 7500);
    }

    #[test]
    fn test_ignores_income_other_payers_and_later_months() {
        let expenses = vec![
            expense("2024-05-01", "Wallet", "income", 300000),
            expense("2024-05-02", "Card", "food", 800),
            expense("2024-06-01", "Wallet", "charge", 9999),
            expense("2024-06-02", "Wallet", "food", 9999),
        ];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(balance.balance, 0);
        assert_eq!(balance.month_spent, 0);
    }

    #[test]
    fn test_charges_count_for_any_payer() {
        let expenses = vec![expense("2024-05-02", "Bank", "charge", 4000)];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(balance.month_charge, 4000);
    }

    #[test]
    fn test_unknown_category_counts_as_spending() {
        let expenses = vec![expense("2024-05-02", "Wallet", "deleted-category", 700)];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(balance.month_spent, 700);
        assert_eq!(balance.balance, -700);
    }

    #[test]
    fn test_huge_stored_amounts_saturate() {
        let expenses = vec![
            expense("2024-04-01", "Wallet", "charge", i64::MAX),
            expense("2024-04-02", "Wallet", "charge", i64::MAX),
            expense("2024-05-01", "Wallet", "charge", 1),
        ];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(balance.carryover, i64::MAX);
        assert_eq!(balance.balance, i64::MAX);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let expenses = vec![expense("bad", "Wallet", "food", 700)];
        let balance = calculate_payer_balance("Wallet", "2024-05", &expenses, &maps());
        assert_eq!(balance.balance, 0);
    }
}
