//! Smart folders and document-to-folder assignments.

pub mod model;

pub use model::{CreateFolderAssignment, CreateSmartFolder, FolderAssignment, SmartFolder};
