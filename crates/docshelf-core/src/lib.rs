//! # docshelf-core
//!
//! Core crate for Docshelf. Contains the object-store and table-store
//! traits, configuration schemas, shared HTTP plumbing for the remote
//! stores, typed identifiers, filter/sort/cursor types, date formatting
//! helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Docshelf crates.

pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
