//! Traits for the two remote collaborators. Defined here and implemented
//! by `docshelf-storage` and `docshelf-database`.

pub mod object_store;
pub mod table_store;

pub use object_store::{ListOptions, ObjectEntry, ObjectStore, UploadOptions};
pub use table_store::{Row, TableStore};
