//! Expenses module - domain models, visibility rules, services, and traits.

mod expenses_model;
mod expenses_service;
mod expenses_traits;
mod visibility;


pub use expenses_model::{Expense, ExpenseInput};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
pub use visibility::{
    effective_visibility, filter_expenses_for_summary, filter_expenses_for_user,
    validate_visibility, Visibility,
};
