//! In-memory backup target.

mod target;

pub use target::InMemoryBackupTarget;
