//! Folder assignment repository.

use std::sync::Arc;

use docshelf_core::result::AppResult;
use docshelf_core::traits::TableStore;
use docshelf_core::types::{FilterField, SmartFolderId, SortField};
use docshelf_entity::folder::model::{CreateFolderAssignment, FolderAssignment};

use super::{from_row, from_rows, to_row};

/// Table linking document keys to smart folders.
pub const TABLE: &str = "smart_folder_assignments";

/// Repository for the `smart_folder_assignments` table.
#[derive(Debug, Clone)]
pub struct FolderAssignmentRepository {
    store: Arc<dyn TableStore>,
}

impl FolderAssignmentRepository {
    /// Create a new assignment repository.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Insert an assignment. Duplicates are accepted.
    pub async fn create(&self, data: &CreateFolderAssignment) -> AppResult<FolderAssignment> {
        let row = self.store.insert(TABLE, to_row(data)?).await?;
        from_row(row, TABLE)
    }

    /// All assignments owned by a user.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<FolderAssignment>> {
        let rows = self
            .store
            .select(
                TABLE,
                &[FilterField::eq("user_id", user_id)],
                Some(&SortField::asc("created_at")),
            )
            .await?;
        from_rows(rows, TABLE)
    }

    /// Remove the assignments of one document to one folder.
    pub async fn delete(
        &self,
        user_id: &str,
        document_path: &str,
        folder_id: SmartFolderId,
    ) -> AppResult<u64> {
        self.store
            .delete(
                TABLE,
                &[
                    FilterField::eq("user_id", user_id),
                    FilterField::eq("document_path", document_path),
                    FilterField::eq("folder_id", folder_id),
                ],
            )
            .await
    }

    /// Remove every assignment into a folder.
    pub async fn delete_by_folder(&self, user_id: &str, folder_id: SmartFolderId) -> AppResult<u64> {
        self.store
            .delete(
                TABLE,
                &[
                    FilterField::eq("user_id", user_id),
                    FilterField::eq("folder_id", folder_id),
                ],
            )
            .await
    }

    /// Remove every assignment of a document key.
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
