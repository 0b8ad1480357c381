//! Balance module - running wallet balances for payers that track one.

mod balance_calculator;
mod balance_model;
mod balance_service;


pub use balance_calculator::calculate_payer_balance;
pub use balance_model::PayerBalance;
pub use balance_service::{BalanceService, BalanceServiceTrait};
