//! # docshelf-service
//!
//! Use cases over the two remote stores: moving documents through the
//! trash, listing them, uploading them, and tagging them into smart
//! folders.
//!
//! Services follow constructor injection. Every store is handed in as an
//! `Arc` at construction time; nothing is read from process-wide state.

pub mod document;
pub mod folder;

pub use document::{
    CleanupFailure, CleanupReport, DocumentLifecycleService, DocumentListingService,
    DocumentPage, PurgeOutcome, ReferenceCleaner, RestoreOutcome, TrashOutcome, UploadRequest,
    UploadService,
};
pub use folder::FolderTaggingService;
