//! In-memory storage for the monthly summary cache.

mod repository;

pub use repository::InMemorySummaryCache;
