//! Moving documents into, out of, and past the trash.
//!
//! Object-store mutations (copy, remove) propagate their first failure.
//! Table-side bookkeeping never aborts an operation: it is logged and
//! surfaced through the returned outcome instead.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use docshelf_core::config::AppConfig;
use docshelf_core::config::trash::TrashConfig;
use docshelf_core::result::AppResult;
use docshelf_core::traits::{ObjectStore, TableStore};
use docshelf_database::repositories::{DeletedDocumentRepository, deleted_document};
use docshelf_entity::document::key;
use docshelf_entity::tracking::DeletedDocument;

use super::cleanup::{CleanupReport, ReferenceCleaner};
use super::listing::DocumentListingService;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Result of moving a document to the trash.
#[derive(Debug, Clone, Serialize)]
pub struct TrashOutcome {
    /// Key of the trash copy.
    pub trash_path: String,
    /// Reference cleanup for the original key.
    pub cleanup: CleanupReport,
    /// Why the tracking row could not be written, if it could not.
    pub tracking_error: Option<String>,
}

/// Result of restoring a document from the trash.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    /// Key the document was restored to.
    pub path: String,
    /// Public URL of the restored document.
    pub public_url: String,
    /// Failures of the best-effort steps after the copy.
    pub cleanup: CleanupReport,
}

/// Result of purging old trash entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeOutcome {
    /// Keys that were removed.
    pub removed: Vec<String>,
    /// Tracking cleanup failures, when tracking cleanup is enabled.
    pub cleanup: CleanupReport,
}

/// Drives documents between active, trashed, and deleted.
#[derive(Debug, Clone)]
pub struct DocumentLifecycleService {
    objects: Arc<dyn ObjectStore>,
    listing: DocumentListingService,
    cleaner: ReferenceCleaner,
    tracking: DeletedDocumentRepository,
    config: TrashConfig,
}

impl DocumentLifecycleService {
    /// Create a lifecycle service over the given stores.
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        tables: Arc<dyn TableStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            listing: DocumentListingService::new(objects.clone(), &config.storage),
            objects,
            cleaner: ReferenceCleaner::new(tables.clone()),
            tracking: DeletedDocumentRepository::new(tables),
            config: config.trash.clone(),
        }
    }

    /// Default age, in days, after which trash is purged.
    pub fn retention_days(&self) -> u32 {
        self.config.retention_days
    }

    /// Move a document to `<userId>/trash/<filename>`.
    ///
    /// A failed copy aborts with nothing changed. A failed remove after a
    /// successful copy leaves both copies in place and is returned.
    pub async fn move_to_trash(&self, user_id: &str, path: &str) -> AppResult<TrashOutcome> {
        let filename = key::file_name(path);
        let trash_path = key::trash_path(user_id, filename);

        self.objects.copy(path, &trash_path).await?;
        self.objects.remove(&[path.to_string()]).await?;

        let cleanup = self.cleaner.cleanup_document_references(user_id, path).await;

        let record = DeletedDocument::new(user_id, &trash_path, filename);
        let tracking_error = match self.tracking.upsert(&record).await {
            Ok(_) => None,
            Err(e) => {
                warn!(user_id, path = %trash_path, error = %e, "Failed to track trashed document");
                Some(e.to_string())
            }
        };

        info!(user_id, from = path, to = %trash_path, "Moved document to trash");
        Ok(TrashOutcome {
            trash_path,
            cleanup,
            tracking_error,
        })
    }

    /// Restore `<userId>/trash/<filename>` to
    /// `<userId>/<nowMillis>_<filename>`.
    ///
    /// Only the copy can fail the call. Removing the trash copy and its
    /// tracking row are best-effort.
    pub async fn restore_from_trash(
        &self,
        user_id: &str,
        filename: &str,
    ) -> AppResult<RestoreOutcome> {
        let trash_path = key::trash_path(user_id, filename);
        let path = key::restored_path(user_id, Utc::now().timestamp_millis(), filename);

        self.objects.copy(&trash_path, &path).await?;

        let mut cleanup = CleanupReport::default();
        if let Err(e) = self.objects.remove(&[trash_path.clone()]).await {
            warn!(user_id, path = %trash_path, error = %e, "Failed to remove restored trash copy");
        }
        if let Err(e) = self.tracking.delete_by_document(user_id, &trash_path).await {
            warn!(user_id, path = %trash_path, error = %e, "Failed to remove trash tracking row");
            cleanup.record(deleted_document::TABLE, &e);
        }

        info!(user_id, from = %trash_path, to = %path, "Restored document from trash");
        Ok(RestoreOutcome {
            public_url: self.objects.public_url(&path),
            path,
            cleanup,
        })
    }

    /// Remove an object and every row referencing it. The owner is taken
    /// from the key's leading segment. Removing a missing key is not an
    /// error.
    pub async fn delete_permanent(&self, path: &str) -> AppResult<CleanupReport> {
        self.objects.remove(&[path.to_string()]).await?;
        let report = self
            .cleaner
            .cleanup_document_references(key::owner_of(path), path)
            .await;
        info!(path, "Permanently deleted document");
        Ok(report)
    }

    /// Remove trash entries older than `days` days in one batch.
    pub async fn purge_old_trash(&self, user_id: &str, days: u32) -> AppResult<PurgeOutcome> {
        let cutoff = Utc::now() - Duration::milliseconds(i64::from(days) * MILLIS_PER_DAY);
        self.purge_trash_before(user_id, cutoff).await
    }

    /// Remove every non-empty trash entry trashed strictly before `cutoff`.
    /// No remove call is issued when nothing qualifies.
    pub async fn purge_trash_before(
        &self,
        user_id: &str,
        cutoff: DateTime<Utc>,
    ) -> AppResult<PurgeOutcome> {
        let removed: Vec<String> = self
            .listing
            .list_all_trash(user_id)
            .await?
            .into_iter()
            .filter(|entry| entry.is_purgeable(cutoff))
            .map(|entry| entry.path)
            .collect();

        if removed.is_empty() {
            return Ok(PurgeOutcome::default());
        }

        self.objects.remove(&removed).await?;

        let mut cleanup = CleanupReport::default();
        if self.config.purge_clears_tracking {
            for path in &removed {
                if let Err(e) = self.tracking.delete_by_document(user_id, path).await {
                    warn!(user_id, path = %path, error = %e, "Failed to remove trash tracking row");
                    cleanup.record(deleted_document::TABLE, &e);
                }
            }
        }

        info!(user_id, count = removed.len(), %cutoff, "Purged old trash");
        Ok(PurgeOutcome { removed, cleanup })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_core::error::ErrorKind;
    use docshelf_database::MemoryTableStore;
    use docshelf_database::repositories::{assignment, share};
    use docshelf_storage::{MemoryObjectStore, StoreOp};
    use serde_json::json;

    struct Fixture {
        objects: Arc<MemoryObjectStore>,
        tables: Arc<MemoryTableStore>,
        service: DocumentLifecycleService,
    }

    fn fixture_with(config: AppConfig) -> Fixture {
        let objects = Arc::new(MemoryObjectStore::new("documents"));
        let tables = Arc::new(MemoryTableStore::new());
        let service = DocumentLifecycleService::new(objects.clone(), tables.clone(), &config);
        Fixture {
            objects,
            tables,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(AppConfig::default())
    }

    async fn seed_reference(tables: &MemoryTableStore, table: &str, user: &str, path: &str) {
        let row = json!({"user_id": user, "document_path": path});
        tables
            .insert(table, row.as_object().cloned().unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_move_to_trash() {
        let f = fixture();
        f.objects.put("u1/100_tax_W2.pdf", "pdf");
        seed_reference(&f.tables, assignment::TABLE, "u1", "u1/100_tax_W2.pdf").await;
        seed_reference(&f.tables, share::TABLE, "u1", "u1/100_tax_W2.pdf").await;

        let outcome = f
            .service
            .move_to_trash("u1", "u1/100_tax_W2.pdf")
            .await
            .unwrap();

        assert_eq!(outcome.trash_path, "u1/trash/100_tax_W2.pdf");
        assert!(outcome.cleanup.is_clean());
        assert!(outcome.tracking_error.is_none());
        assert!(!f.objects.contains("u1/100_tax_W2.pdf"));
        assert!(f.objects.contains("u1/trash/100_tax_W2.pdf"));
        assert!(f.tables.rows(assignment::TABLE).is_empty());
        assert!(f.tables.rows(share::TABLE).is_empty());

        let tracked = f.tables.rows(deleted_document::TABLE);
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0]["document_path"], "u1/trash/100_tax_W2.pdf");
        assert_eq!(tracked[0]["document_name"], "100_tax_W2.pdf");
    }

    #[tokio::test]
    async fn test_move_to_trash_copy_failure_changes_nothing() {
        let f = fixture();
        f.objects.put("u1/100_tax_W2.pdf", "pdf");
        f.objects
            .fail_on(StoreOp::Copy, "u1/100_tax_W2.pdf", "Object not found");

        let err = f
            .service
            .move_to_trash("u1", "u1/100_tax_W2.pdf")
            .await
            .unwrap_err();

        assert!(err.is(ErrorKind::Storage));
        assert_eq!(f.objects.keys(), ["u1/100_tax_W2.pdf"]);
        assert_eq!(f.objects.call_count(StoreOp::Remove), 0);
        assert!(f.tables.rows(deleted_document::TABLE).is_empty());
    }

    #[tokio::test]
    async fn test_move_to_trash_remove_failure_leaves_both_copies() {
        let f = fixture();
        f.objects.put("u1/100_tax_W2.pdf", "pdf");
        f.objects
            .fail_on(StoreOp::Remove, "u1/100_tax_W2.pdf", "permission denied");

        let err = f
            .service
            .move_to_trash("u1", "u1/100_tax_W2.pdf")
            .await
            .unwrap_err();

        assert!(err.message.contains("permission denied"));
        assert!(f.objects.contains("u1/100_tax_W2.pdf"));
        assert!(f.objects.contains("u1/trash/100_tax_W2.pdf"));
    }

    #[tokio::test]
    async fn test_move_to_trash_tracking_failure_is_reported_not_raised() {
        let f = fixture();
        f.objects.put("u1/100_tax_W2.pdf", "pdf");
        f.tables
            .fail_table(deleted_document::TABLE, "permission denied for table");

        let outcome = f
            .service
            .move_to_trash("u1", "u1/100_tax_W2.pdf")
            .await
            .unwrap();

        assert!(f.objects.contains("u1/trash/100_tax_W2.pdf"));
        assert!(outcome.tracking_error.unwrap().contains("permission denied"));
        assert_eq!(outcome.cleanup.failures.len(), 1);
        assert_eq!(outcome.cleanup.failures[0].table, deleted_document::TABLE);
    }

    #[tokio::test]
    async fn test_restore_from_trash() {
        let f = fixture();
        f.objects.put("u1/100_tax_W2.pdf", "pdf");
        f.service
            .move_to_trash("u1", "u1/100_tax_W2.pdf")
            .await
            .unwrap();

        let outcome = f
            .service
            .restore_from_trash("u1", "100_tax_W2.pdf")
            .await
            .unwrap();

        let (prefix, rest) = outcome.path.split_once('/').unwrap();
        assert_eq!(prefix, "u1");
        let (stamp, filename) = rest.split_once('_').unwrap();
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(filename, "100_tax_W2.pdf");
        assert_eq!(outcome.public_url, format!("memory://documents/{}", outcome.path));
        assert!(outcome.cleanup.is_clean());

        assert!(f.objects.contains(&outcome.path));
        assert!(!f.objects.contains("u1/trash/100_tax_W2.pdf"));
        assert!(!f.objects.contains("u1/100_tax_W2.pdf"));
        assert!(f.tables.rows(deleted_document::TABLE).is_empty());
    }

    #[tokio::test]
    async fn test_restore_copy_failure_aborts() {
        let f = fixture();
        let err = f
            .service
            .restore_from_trash("u1", "missing.pdf")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(f.objects.call_count(StoreOp::Remove), 0);
    }

    #[tokio::test]
    async fn test_restore_tolerates_remove_and_tracking_failures() {
        let f = fixture();
        f.objects.put("u1/trash/100_tax_W2.pdf", "pdf");
        f.objects
            .fail_on(StoreOp::Remove, "u1/trash/100_tax_W2.pdf", "timeout");
        f.tables.fail_table(deleted_document::TABLE, "timeout");

        let outcome = f
            .service
            .restore_from_trash("u1", "100_tax_W2.pdf")
            .await
            .unwrap();

        assert!(f.objects.contains(&outcome.path));
        assert!(f.objects.contains("u1/trash/100_tax_W2.pdf"));
        assert_eq!(outcome.cleanup.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_permanent_missing_key_still_cleans() {
        let f = fixture();
        seed_reference(&f.tables, share::TABLE, "u1", "u1/trash/gone.pdf").await;
        f.tables.fail_table(assignment::TABLE, "connection reset");

        let report = f
            .service
            .delete_permanent("u1/trash/gone.pdf")
            .await
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].table, assignment::TABLE);
        assert!(f.tables.rows(share::TABLE).is_empty());
    }

    #[tokio::test]
    async fn test_purge_respects_age_and_size() {
        let f = fixture();
        let now = Utc::now();
        f.objects
            .put_at("u1/trash/old.pdf", "12345", now - Duration::days(31));
        f.objects
            .put_at("u1/trash/recent.pdf", "12345", now - Duration::days(1));
        f.objects
            .put_at("u1/trash/marker", "", now - Duration::days(40));

        let outcome = f.service.purge_old_trash("u1", 30).await.unwrap();

        assert_eq!(outcome.removed, ["u1/trash/old.pdf"]);
        assert!(!f.objects.contains("u1/trash/old.pdf"));
        assert!(f.objects.contains("u1/trash/recent.pdf"));
        assert!(f.objects.contains("u1/trash/marker"));
        assert_eq!(f.objects.call_count(StoreOp::Remove), 1);
    }

    #[tokio::test]
    async fn test_purge_without_candidates_issues_no_remove() {
        let f = fixture();
        f.objects.put("u1/trash/recent.pdf", "12345");

        let outcome = f.service.purge_old_trash("u1", 30).await.unwrap();

        assert!(outcome.removed.is_empty());
        assert_eq!(f.objects.call_count(StoreOp::Remove), 0);
    }

    #[tokio::test]
    async fn test_purge_keeps_tracking_rows_by_default() {
        let f = fixture();
        f.objects.put_at(
            "u1/trash/old.pdf",
            "12345",
            Utc::now() - Duration::days(31),
        );
        seed_reference(&f.tables, deleted_document::TABLE, "u1", "u1/trash/old.pdf").await;

        f.service.purge_old_trash("u1", 30).await.unwrap();
        assert_eq!(f.tables.rows(deleted_document::TABLE).len(), 1);
    }

    #[tokio::test]
    async fn test_purge_clears_tracking_when_enabled() {
        let mut config = AppConfig::default();
        config.trash.purge_clears_tracking = true;
        let f = fixture_with(config);
        f.objects.put_at(
            "u1/trash/old.pdf",
            "12345",
            Utc::now() - Duration::days(31),
        );
        seed_reference(&f.tables, deleted_document::TABLE, "u1", "u1/trash/old.pdf").await;

        let outcome = f.service.purge_old_trash("u1", 30).await.unwrap();
        assert!(outcome.cleanup.is_clean());
        assert!(f.tables.rows(deleted_document::TABLE).is_empty());
    }
}
