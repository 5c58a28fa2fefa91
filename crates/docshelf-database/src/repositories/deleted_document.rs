//! Trash tracking repository.

use std::sync::Arc;

use tracing::debug;

use docshelf_core::result::AppResult;
use docshelf_core::traits::TableStore;
use docshelf_core::types::FilterField;
use docshelf_entity::tracking::model::DeletedDocument;

use super::{from_row, to_row};

/// Table recording trashed documents.
pub const TABLE: &str = "deleted_documents";

const CONFLICT_COLUMNS: [&str; 2] = ["user_id", "document_path"];

/// Repository for the `deleted_documents` table.
#[derive(Debug, Clone)]
pub struct DeletedDocumentRepository {
    store: Arc<dyn TableStore>,
}

impl DeletedDocumentRepository {
    /// Create a new tracking repository.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Insert or refresh the tracking row for a trash key.
    pub async fn upsert(&self, record: &DeletedDocument) -> AppResult<DeletedDocument> {
        let row = self
            .store
            .upsert(TABLE, to_row(record)?, &CONFLICT_COLUMNS)
            .await?;
        debug!(path = %record.document_path, "Tracked trashed document");
        from_row(row, TABLE)
    }

    /// Remove the tracking rows of a key.
    pub async fn delete_by_document(&self, user_id: &str, document_path: &str) -> AppResult<u64> {
        self.store
            .delete(
                TABLE,
                &[
                    FilterField::eq("user_id", user_id),
                    FilterField::eq("document_path", document_path),
                ],
            )
            .await
    }
}
