//! # docshelf-database
//!
//! Table store providers (the hosted REST table API and an in-memory
//! store) and the typed repositories built on top of them.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod rest;

pub use connection::build_table_store;
pub use memory::MemoryTableStore;
pub use rest::RestTableStore;
