//! Money Diary Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the household money diary:
//! expenses with per-user visibility, category summaries, recurring
//! templates, payer balances and the backup worker. It is store-agnostic and
//! defines traits that are implemented by the storage crates.

pub mod backup;
pub mod balance;
pub mod config;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod ledger;
pub mod recurring;
pub mod registry;
pub mod summary;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{BackupConfig, LedgerConfig};
pub use ledger::{Ledger, LedgerStores};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
