//! Integration tests for smart folder tagging.

mod helpers;

use docshelf_core::error::ErrorKind;
use docshelf_database::repositories::smart_folder;

use helpers::TestApp;

#[tokio::test]
async fn test_folders_are_scoped_by_user() {
    let app = TestApp::new();
    app.folders
        .create_smart_folder("u1", "Taxes", Some("Returns".into()))
        .await
        .unwrap();
    app.folders
        .create_smart_folder("u2", "Medical", None)
        .await
        .unwrap();

    let folders = app.folders.get_user_smart_folders("u1").await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].folder_name, "Taxes");
    assert_eq!(folders[0].folder_description.as_deref(), Some("Returns"));
}

#[tokio::test]
async fn test_assignments_follow_documents_into_trash() {
    let app = TestApp::new();
    let doc = app.upload("u1", "W2.pdf", "tax", false).await;
    let other = app.upload("u1", "1099.pdf", "tax", false).await;
    let folder = app
        .folders
        .create_smart_folder("u1", "Taxes", None)
        .await
        .unwrap();
    for path in [&doc.path, &other.path] {
        app.folders
            .assign_document_to_folder("u1", path, folder.id)
            .await
            .unwrap();
    }

    app.lifecycle.move_to_trash("u1", &doc.path).await.unwrap();

    let assignments = app
        .folders
        .get_document_folder_assignments("u1")
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].document_path, other.path);
}

#[tokio::test]
async fn test_auto_assign_never_assigns() {
    let app = TestApp::new();
    let doc = app.upload("u1", "W2.pdf", "tax", false).await;
    app.folders
        .create_smart_folder("u1", "Taxes", None)
        .await
        .unwrap();

    let assigned = app
        .folders
        .auto_assign_document_to_folder("u1", &doc.path)
        .await
        .unwrap();
    assert!(assigned.is_none());
}

#[tokio::test]
async fn test_store_errors_surface_unchanged() {
    let app = TestApp::new();
    app.tables
        .fail_table(smart_folder::TABLE, "permission denied for table smart_folders");

    let err = app
        .folders
        .get_user_smart_folders("u1")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Database));
    assert!(err.message.contains("permission denied"));
}
