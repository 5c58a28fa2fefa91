//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;

use docshelf_core::config::AppConfig;
use docshelf_core::config::storage::ProviderKind;
use docshelf_database::MemoryTableStore;
use docshelf_entity::document::DocumentRecord;
use docshelf_service::{
    DocumentLifecycleService, DocumentListingService, FolderTaggingService, UploadRequest,
    UploadService,
};
use docshelf_storage::MemoryObjectStore;

/// Services wired over in-memory stores, with the stores kept at hand for
/// assertions and failure injection.
pub struct TestApp {
    /// Object store backing every service
    pub objects: Arc<MemoryObjectStore>,
    /// Table store backing every service
    pub tables: Arc<MemoryTableStore>,
    /// Configuration the services were built with
    pub config: AppConfig,
    /// Trash lifecycle
    pub lifecycle: DocumentLifecycleService,
    /// Listings
    pub listing: DocumentListingService,
    /// Uploads
    pub upload: UploadService,
    /// Smart folders
    pub folders: FolderTaggingService,
}

impl TestApp {
    /// Create a test application with default settings
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application from a config
    pub fn with_config(mut config: AppConfig) -> Self {
        config.storage.provider = ProviderKind::Memory;
        let objects = Arc::new(MemoryObjectStore::new(&config.storage.bucket));
        let tables = Arc::new(MemoryTableStore::new());

        Self {
            lifecycle: DocumentLifecycleService::new(objects.clone(), tables.clone(), &config),
            listing: DocumentListingService::new(objects.clone(), &config.storage),
            upload: UploadService::new(objects.clone()),
            folders: FolderTaggingService::new(tables.clone()),
            objects,
            tables,
            config,
        }
    }

    /// Upload a small document and return its record
    pub async fn upload(
        &self,
        user_id: &str,
        file_name: &str,
        category: &str,
        private: bool,
    ) -> DocumentRecord {
        self.upload
            .upload_document(
                user_id,
                UploadRequest {
                    file_name: file_name.to_string(),
                    category: category.to_string(),
                    data: Bytes::from_static(b"%PDF-1.7 test"),
                    content_type: Some("application/pdf".to_string()),
                    private,
                },
            )
            .await
            .expect("upload failed")
    }
}
