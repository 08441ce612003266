// Adapters layer: concrete implementations of the remote store port.

pub mod memory_store;
pub mod rest_store;

pub use memory_store::MemoryStore;
pub use rest_store::RestStore;
