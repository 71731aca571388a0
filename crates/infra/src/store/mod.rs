//! Ledger persistence boundary.
//!
//! Defines an infrastructure-facing abstraction for loading and saving the
//! goal ledger without making any storage assumptions.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryLedgerStore;
pub use json_file::JsonFileLedgerStore;
pub use r#trait::{LedgerStore, StoreError};
