//! Removal of table rows that reference a document key.
//!
//! Cleanup never fails the surrounding operation. Each table is cleaned
//! independently and every failure is logged and collected into a
//! [`CleanupReport`] for callers that care about row consistency.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use docshelf_core::error::AppError;
use docshelf_core::traits::TableStore;
use docshelf_database::repositories::{
    DeletedDocumentRepository, DocumentShareRepository, FolderAssignmentRepository, assignment,
    deleted_document, share,
};

/// One table whose cleanup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupFailure {
    /// Table the delete was issued against.
    pub table: String,
    /// Error reported by the store.
    pub message: String,
}

/// Outcome of a best-effort cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Tables that could not be cleaned.
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    /// Whether every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record a failed step.
    pub fn record(&mut self, table: &str, error: &AppError) {
        self.failures.push(CleanupFailure {
            table: table.to_string(),
            message: error.to_string(),
        });
    }

    /// Append the failures of another report.
    pub fn merge(&mut self, other: CleanupReport) {
        self.failures.extend(other.failures);
    }
}

/// Deletes assignment, share, and tracking rows for a document key.
#[derive(Debug, Clone)]
pub struct ReferenceCleaner {
    assignments: FolderAssignmentRepository,
    shares: DocumentShareRepository,
    tracking: DeletedDocumentRepository,
}

impl ReferenceCleaner {
    /// Create a cleaner over the given table store.
    pub fn new(tables: Arc<dyn TableStore>) -> Self {
        Self {
            assignments: FolderAssignmentRepository::new(tables.clone()),
            shares: DocumentShareRepository::new(tables.clone()),
            tracking: DeletedDocumentRepository::new(tables),
        }
    }

    /// Delete every row keyed by `(user_id, path)` in the assignment,
    /// share, and tracking tables. Idempotent.
    pub async fn cleanup_document_references(&self, user_id: &str, path: &str) -> CleanupReport {
        let mut report = CleanupReport::default();

        if let Err(e) = self.assignments.delete_by_document(user_id, path).await {
            warn!(user_id, path, error = %e, "Failed to remove folder assignments");
            report.record(assignment::TABLE, &e);
        }
        if let Err(e) = self.shares.delete_by_document(user_id, path).await {
            warn!(user_id, path, error = %e, "Failed to remove document shares");
            report.record(share::TABLE, &e);
        }
        if let Err(e) = self.tracking.delete_by_document(user_id, path).await {
            warn!(user_id, path, error = %e, "Failed to remove trash tracking row");
            report.record(deleted_document::TABLE, &e);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_database::MemoryTableStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_cleans_all_three_tables() {
        let tables = Arc::new(MemoryTableStore::new());
        for table in [assignment::TABLE, share::TABLE, deleted_document::TABLE] {
            let row = json!({"user_id": "u1", "document_path": "u1/a.pdf"});
            tables
                .insert(table, row.as_object().cloned().unwrap())
                .await
                .unwrap();
        }

        let report = ReferenceCleaner::new(tables.clone())
            .cleanup_document_references("u1", "u1/a.pdf")
            .await;

        assert!(report.is_clean());
        for table in [assignment::TABLE, share::TABLE, deleted_document::TABLE] {
            assert!(tables.rows(table).is_empty(), "{table} not cleaned");
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_the_others() {
        let tables = Arc::new(MemoryTableStore::new());
        let row = json!({"user_id": "u1", "document_path": "u1/a.pdf"});
        tables
            .insert(assignment::TABLE, row.as_object().cloned().unwrap())
            .await
            .unwrap();
        tables
            .insert(deleted_document::TABLE, row.as_object().cloned().unwrap())
            .await
            .unwrap();
        tables.fail_table(share::TABLE, "relation \"document_shares\" does not exist");

        let report = ReferenceCleaner::new(tables.clone())
            .cleanup_document_references("u1", "u1/a.pdf")
            .await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].table, share::TABLE);
        assert!(report.failures[0].message.contains("does not exist"));
        assert!(tables.rows(assignment::TABLE).is_empty());
        assert!(tables.rows(deleted_document::TABLE).is_empty());
    }

    #[test]
    fn test_merge_reports() {
        let mut report = CleanupReport::default();
        report.record("smart_folder_assignments", &AppError::database("boom"));
        let mut other = CleanupReport::default();
        other.record("deleted_documents", &AppError::database("boom"));
        report.merge(other);
        assert_eq!(report.failures.len(), 2);
        assert!(!report.is_clean());
    }
}
