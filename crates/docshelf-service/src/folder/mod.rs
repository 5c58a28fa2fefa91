//! Smart folder tagging.

pub mod service;

pub use service::FolderTaggingService;
