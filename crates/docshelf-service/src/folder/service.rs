//! Smart folder CRUD and document tagging.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::TableStore;
use docshelf_core::types::SmartFolderId;
use docshelf_database::repositories::{FolderAssignmentRepository, SmartFolderRepository};
use docshelf_entity::folder::{
    CreateFolderAssignment, CreateSmartFolder, FolderAssignment, SmartFolder,
};

/// Tags documents into user-defined folders. Store errors are returned
/// unchanged.
#[derive(Debug, Clone)]
pub struct FolderTaggingService {
    folders: SmartFolderRepository,
    assignments: FolderAssignmentRepository,
}

impl FolderTaggingService {
    /// Create a new folder tagging service.
    pub fn new(tables: Arc<dyn TableStore>) -> Self {
        Self {
            folders: SmartFolderRepository::new(tables.clone()),
            assignments: FolderAssignmentRepository::new(tables),
        }
    }

    /// Create a smart folder.
    pub async fn create_smart_folder(
        &self,
        user_id: &str,
        folder_name: &str,
        folder_description: Option<String>,
    ) -> AppResult<SmartFolder> {
        let data = CreateSmartFolder {
            user_id: user_id.to_string(),
            folder_name: folder_name.to_string(),
            folder_description,
        };
        data.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let folder = self.folders.create(&data).await?;
        info!(user_id, folder_id = %folder.id, name = %folder.folder_name, "Created smart folder");
        Ok(folder)
    }

    /// Folders owned by a user.
    pub async fn get_user_smart_folders(&self, user_id: &str) -> AppResult<Vec<SmartFolder>> {
        self.folders.find_by_user(user_id).await
    }

    /// Document-to-folder assignments owned by a user.
    pub async fn get_document_folder_assignments(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<FolderAssignment>> {
        self.assignments.find_by_user(user_id).await
    }

    /// Assign a document key to a folder. Assigning twice creates two rows.
    pub async fn assign_document_to_folder(
        &self,
        user_id: &str,
        document_path: &str,
        folder_id: SmartFolderId,
    ) -> AppResult<FolderAssignment> {
        let data = CreateFolderAssignment {
            document_path: document_path.to_string(),
            folder_id,
            user_id: user_id.to_string(),
        };
        data.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.assignments.create(&data).await
    }

    /// Placeholder for automatic classification. Never assigns anything.
    pub async fn auto_assign_document_to_folder(
        &self,
        _user_id: &str,
        _document_path: &str,
    ) -> AppResult<Option<FolderAssignment>> {
        Ok(None)
    }

    /// Delete a folder along with every assignment into it.
    pub async fn delete_smart_folder(
        &self,
        user_id: &str,
        folder_id: SmartFolderId,
    ) -> AppResult<()> {
        self.assignments.delete_by_folder(user_id, folder_id).await?;
        if !self.folders.delete(user_id, folder_id).await? {
            return Err(AppError::not_found(format!(
                "Smart folder not found: {folder_id}"
            )));
        }
        info!(user_id, %folder_id, "Deleted smart folder");
        Ok(())
    }

    /// Remove a document from a folder. Returns how many assignment rows
    /// were removed.
    pub async fn unassign_document(
        &self,
        user_id: &str,
        document_path: &str,
        folder_id: SmartFolderId,
    ) -> AppResult<u64> {
        self.assignments
            .delete(user_id, document_path, folder_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_core::error::ErrorKind;
    use docshelf_database::MemoryTableStore;
    use docshelf_database::repositories::smart_folder;

    fn service() -> (Arc<MemoryTableStore>, FolderTaggingService) {
        let tables = Arc::new(MemoryTableStore::new());
        (tables.clone(), FolderTaggingService::new(tables))
    }

    #[tokio::test]
    async fn test_create_and_list_folders() {
        let (_, service) = service();
        let folder = service
            .create_smart_folder("u1", "Taxes", Some("Returns and forms".into()))
            .await
            .unwrap();
        service.create_smart_folder("u2", "Other", None).await.unwrap();

        let folders = service.get_user_smart_folders("u1").await.unwrap();
        assert_eq!(folders, vec![folder]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (tables, service) = service();
        let err = service
            .create_smart_folder("u1", "", None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(tables.rows(smart_folder::TABLE).is_empty());
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let (tables, service) = service();
        tables.fail_table(smart_folder::TABLE, "duplicate key value violates unique constraint");
        let err = service
            .create_smart_folder("u1", "Taxes", None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Database));
        assert!(err.message.contains("duplicate key"));
    }

    #[tokio::test]
    async fn test_assign_and_list_assignments() {
        let (_, service) = service();
        let folder = service.create_smart_folder("u1", "Taxes", None).await.unwrap();

        service
            .assign_document_to_folder("u1", "u1/100_tax_W2.pdf", folder.id)
            .await
            .unwrap();
        service
            .assign_document_to_folder("u1", "u1/100_tax_W2.pdf", folder.id)
            .await
            .unwrap();

        let assignments = service.get_document_folder_assignments("u1").await.unwrap();
        assert_eq!(assignments.len(), 2);
        assert!(assignments.iter().all(|a| a.folder_id == folder.id));
        assert!(
            service
                .get_document_folder_assignments("u2")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_auto_assign_is_inert() {
        let (tables, service) = service();
        let result = service
            .auto_assign_document_to_folder("u1", "u1/100_tax_W2.pdf")
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(tables.rows("smart_folder_assignments").is_empty());
    }

    #[tokio::test]
    async fn test_delete_folder_removes_assignments() {
        let (_, service) = service();
        let folder = service.create_smart_folder("u1", "Taxes", None).await.unwrap();
        service
            .assign_document_to_folder("u1", "u1/a.pdf", folder.id)
            .await
            .unwrap();

        service.delete_smart_folder("u1", folder.id).await.unwrap();
        assert!(service.get_user_smart_folders("u1").await.unwrap().is_empty());
        assert!(
            service
                .get_document_folder_assignments("u1")
                .await
                .unwrap()
                .is_empty()
        );

        let err = service
            .delete_smart_folder("u1", folder.id)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_unassign_document() {
        let (_, service) = service();
        let folder = service.create_smart_folder("u1", "Taxes", None).await.unwrap();
        service
            .assign_document_to_folder("u1", "u1/a.pdf", folder.id)
            .await
            .unwrap();

        assert_eq!(
            service
                .unassign_document("u1", "u1/a.pdf", folder.id)
                .await
                .unwrap(),
            1
        );
    }
}
