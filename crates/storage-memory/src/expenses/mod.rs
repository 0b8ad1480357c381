//! In-memory storage for expenses.

mod repository;

pub use repository::InMemoryExpenseRepository;
