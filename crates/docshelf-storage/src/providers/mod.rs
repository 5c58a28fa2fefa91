//! Object store provider implementations.

pub mod memory;
pub mod remote;

pub use memory::{MemoryObjectStore, StoreOp};
pub use remote::RemoteObjectStore;
