//! Recurring module - expense templates and the monthly materializer.

mod recurring_model;
mod recurring_service;
mod recurring_traits;


pub use recurring_model::{Frequency, RecurringExpense, RecurringExpenseInput, RecurringRunError};
pub use recurring_service::RecurringService;
pub use recurring_traits::RecurringServiceTrait;
