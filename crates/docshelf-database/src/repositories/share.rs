//! Document share rows. Only cleanup is needed from this layer.

use std::sync::Arc;

use docshelf_core::result::AppResult;
use docshelf_core::traits::TableStore;
use docshelf_core::types::FilterField;

/// Table holding share links for documents.
pub const TABLE: &str = "document_shares";

/// Repository for the `document_shares` table.
#[derive(Debug, Clone)]
pub struct DocumentShareRepository {
    store: Arc<dyn TableStore>,
}

impl DocumentShareRepository {
    /// Create a new share repository.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Remove every share of a document key.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTableStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_by_document() {
        let store = Arc::new(MemoryTableStore::new());
        for (user, path) in [("u1", "u1/a.pdf"), ("u1", "u1/b.pdf"), ("u2", "u1/a.pdf")] {
            let row = json!({"user_id": user, "document_path": path, "token": "t"});
            store
                .insert(TABLE, row.as_object().cloned().unwrap())
                .await
                .unwrap();
        }

        let repo = DocumentShareRepository::new(store.clone());
        assert_eq!(repo.delete_by_document("u1", "u1/a.pdf").await.unwrap(), 1);
        assert_eq!(store.rows(TABLE).len(), 2);
    }
}
