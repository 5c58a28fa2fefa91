//! Document services: trash lifecycle, listings, and uploads.

pub mod cleanup;
pub mod lifecycle;
pub mod listing;
pub mod upload;

pub use cleanup::{CleanupFailure, CleanupReport, ReferenceCleaner};
pub use lifecycle::{DocumentLifecycleService, PurgeOutcome, RestoreOutcome, TrashOutcome};
pub use listing::{DocumentListingService, DocumentPage};
pub use upload::{UploadRequest, UploadService};
