//! Player and match registries backing the goal engine's lookups.

pub mod in_memory;
pub mod json_file;

pub use in_memory::{InMemoryMatchRegistry, InMemoryPlayerRegistry};
pub use json_file::{JsonRegistryFiles, load_matches, load_players};
