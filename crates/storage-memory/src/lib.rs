//! In-memory storage implementation for the money diary engine.
//!
//! Implements the store traits defined in `money-diary-core` over a single
//! shared in-process data set, persisted as a JSON snapshot file:
//! - Expense store
//! - Master registry (with compare-and-swap on `lastCreatedMonth`)
//! - Monthly summary cache
//! - A backup target that keeps rows in memory, saved as JSON on request
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-memory (this crate)
//!              │
//!              ▼
//!       snapshot.json
//! ```

pub mod backup;
pub mod errors;
pub mod expenses;
pub mod registry;
pub mod store;
pub mod summary;

pub use backup::InMemoryBackupTarget;
pub use errors::StorageError;
pub use expenses::InMemoryExpenseRepository;
pub use registry::InMemoryMasterRegistry;
pub use store::{MemoryStore, Snapshot};
pub use summary::InMemorySummaryCache;

// Re-export from money-diary-core for convenience
pub use money_diary_core::errors::{DatabaseError, Error, Result};
