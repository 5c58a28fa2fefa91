//! Core type definitions used across the Docshelf workspace.

pub mod cursor;
pub mod filter;
pub mod id;
pub mod sorting;

pub use cursor::ListCursor;
pub use filter::{FilterField, FilterValue};
pub use id::*;
pub use sorting::{SortDirection, SortField};
