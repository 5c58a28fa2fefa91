//! Integration tests for the document lifecycle across listing, trash,
//! restore, purge, and permanent delete.

mod helpers;

use chrono::{Duration, Utc};

use docshelf_core::config::AppConfig;
use docshelf_database::repositories::{assignment, deleted_document, share};
use docshelf_entity::document::key;
use docshelf_storage::StoreOp;

use helpers::TestApp;

#[tokio::test]
async fn test_uploaded_documents_are_listed() {
    let app = TestApp::new();
    app.upload("u1", "W-2 2023.pdf", "tax", false).await;
    app.upload("u1", "Passport scan.png", "identity", true).await;
    app.upload("u2", "Lease.pdf", "legal", false).await;

    let docs = app.listing.list_user_documents("u1").await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name, "W-2 2023");
    assert_eq!(docs[0].category, "tax");
    assert_eq!(docs[1].name, "Passport scan");
    assert_eq!(docs[1].category, "private");
}

#[tokio::test]
async fn test_listing_excludes_placeholders_and_empty_objects() {
    let app = TestApp::new();
    app.objects.put("u1/1700000000000_tax_W2.pdf", "pdf");
    app.objects.put("u1/1700000000001_tax_Empty.pdf", "");
    app.objects.put("u1/notes", "no extension");
    app.objects.put("u1/private/1700000000002_medical_Results.pdf", "pdf");

    let docs = app.listing.list_user_documents("u1").await.unwrap();

    let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "u1/1700000000000_tax_W2.pdf",
            "u1/private/1700000000002_medical_Results.pdf"
        ]
    );
    assert_eq!(docs[1].category, "private");
}

#[tokio::test]
async fn test_trash_then_restore_round_trip() {
    let app = TestApp::new();
    let doc = app.upload("u1", "Tax return.pdf", "tax", false).await;
    let folder = app
        .folders
        .create_smart_folder("u1", "Taxes", None)
        .await
        .unwrap();
    app.folders
        .assign_document_to_folder("u1", &doc.path, folder.id)
        .await
        .unwrap();

    let trashed = app.lifecycle.move_to_trash("u1", &doc.path).await.unwrap();
    assert!(trashed.cleanup.is_clean());
    assert!(app.tables.rows(assignment::TABLE).is_empty());
    assert!(app.listing.list_user_documents("u1").await.unwrap().is_empty());

    let trash = app.listing.list_user_trash("u1").await.unwrap();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].path, trashed.trash_path);
    assert_eq!(app.tables.rows(deleted_document::TABLE).len(), 1);

    let restored = app
        .lifecycle
        .restore_from_trash("u1", &trash[0].name)
        .await
        .unwrap();

    assert_ne!(restored.path, doc.path);
    assert!(restored.path.ends_with(&format!("_{}", key::file_name(&doc.path))));
    assert!(app.tables.rows(deleted_document::TABLE).is_empty());
    assert!(app.listing.list_user_trash("u1").await.unwrap().is_empty());

    let docs = app.listing.list_user_documents("u1").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].path, restored.path);
    assert_eq!(docs[0].name, "Tax return");
    assert_eq!(docs[0].category, "tax");
}

#[tokio::test]
async fn test_purge_removes_only_old_non_empty_entries() {
    let app = TestApp::new();
    let now = Utc::now();
    app.objects
        .put_at("u1/trash/old.pdf", "12345", now - Duration::days(31));
    app.objects
        .put_at("u1/trash/recent.pdf", "12345", now - Duration::days(1));
    app.objects
        .put_at("u1/trash/placeholder", "", now - Duration::days(40));

    let outcome = app.lifecycle.purge_old_trash("u1", 30).await.unwrap();

    assert_eq!(outcome.removed, ["u1/trash/old.pdf"]);
    assert_eq!(
        app.objects.keys(),
        ["u1/trash/placeholder", "u1/trash/recent.pdf"]
    );
}

#[tokio::test]
async fn test_purge_walks_past_the_first_page() {
    let mut config = AppConfig::default();
    config.storage.list_page_size = 2;
    let app = TestApp::with_config(config);
    let old = Utc::now() - Duration::days(60);
    for i in 0..5 {
        app.objects.put_at(
            &format!("u1/trash/{i}.pdf"),
            "12345",
            old - Duration::minutes(i),
        );
    }

    let outcome = app.lifecycle.purge_old_trash("u1", 30).await.unwrap();

    assert_eq!(outcome.removed.len(), 5);
    assert_eq!(app.objects.call_count(StoreOp::Remove), 1);
    assert!(app.objects.keys().is_empty());
}

#[tokio::test]
async fn test_delete_permanent_of_missing_key_only_logs_cleanup_failures() {
    let app = TestApp::new();
    app.tables.fail_table(share::TABLE, "relation does not exist");

    let report = app
        .lifecycle
        .delete_permanent("u1/trash/never-existed.pdf")
        .await
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].table, share::TABLE);
    assert_eq!(app.objects.call_count(StoreOp::Remove), 1);
}

#[tokio::test]
async fn test_private_listing_failure_is_tolerated() {
    let app = TestApp::new();
    app.upload("u1", "Visible.pdf", "tax", false).await;
    app.upload("u1", "Hidden.pdf", "tax", true).await;
    app.objects
        .fail_on(StoreOp::List, "u1/private", "permission denied");

    let docs = app.listing.list_user_documents("u1").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "Visible");
}
