//! In-memory storage for the master registry.

mod repository;

pub use repository::InMemoryMasterRegistry;
