//! Smart folder repository.

use std::sync::Arc;

use tracing::debug;

use docshelf_core::result::AppResult;
use docshelf_core::traits::TableStore;
use docshelf_core::types::{FilterField, SmartFolderId, SortField};
use docshelf_entity::folder::model::{CreateSmartFolder, SmartFolder};

use super::{from_row, from_rows, to_row};

/// Table holding smart folders.
pub const TABLE: &str = "smart_folders";

/// Repository for the `smart_folders` table.
#[derive(Debug, Clone)]
pub struct SmartFolderRepository {
    store: Arc<dyn TableStore>,
}

impl SmartFolderRepository {
    /// Create a new smart folder repository.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Insert a folder. The store assigns its id.
    pub async fn create(&self, data: &CreateSmartFolder) -> AppResult<SmartFolder> {
        let row = self.store.insert(TABLE, to_row(data)?).await?;
        let folder: SmartFolder = from_row(row, TABLE)?;
        debug!(folder_id = %folder.id, user_id = %folder.user_id, "Created smart folder");
        Ok(folder)
    }

    /// All folders owned by a user, oldest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<SmartFolder>> {
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

    /// Delete one of a user's folders. Returns whether a row was removed.
    pub async fn delete(&self, user_id: &str, folder_id: SmartFolderId) -> AppResult<bool> {
        let deleted = self
            .store
            .delete(
                TABLE,
                &[
                    FilterField::eq("id", folder_id),
                    FilterField::eq("user_id", user_id),
                ],
            )
            .await?;
        Ok(deleted > 0)
    }
}
