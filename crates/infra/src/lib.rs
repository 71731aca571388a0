//! Infrastructure layer: ledger storage, registries, config and the goal service.

pub mod config;
pub mod registry;
pub mod service;
pub mod store;


pub use config::{ConfigError, StoreConfig};
pub use registry::{InMemoryMatchRegistry, InMemoryPlayerRegistry, JsonRegistryFiles};
pub use service::{GoalService, ServiceError};
pub use store::{InMemoryLedgerStore, JsonFileLedgerStore, LedgerStore, StoreError};
