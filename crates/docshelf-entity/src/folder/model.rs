//! Smart folder and assignment rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use docshelf_core::types::{AssignmentId, SmartFolderId};

/// A user-defined folder that documents can be tagged into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartFolder {
    /// Store-assigned identity.
    pub id: SmartFolderId,
    /// Owning user.
    pub user_id: String,
    /// Folder name.
    pub folder_name: String,
    /// Optional description.
    #[serde(default)]
    pub folder_description: Option<String>,
    /// When the row was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Data required to create a smart folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSmartFolder {
    /// Owning user.
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub folder_name: String,
    /// Optional description.
    #[validate(length(max = 1000))]
    pub folder_description: Option<String>,
}

/// Link between a document key and a smart folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderAssignment {
    /// Store-assigned identity.
    pub id: AssignmentId,
    /// Key of the assigned document.
    pub document_path: String,
    /// Folder the document is assigned to.
    pub folder_id: SmartFolderId,
    /// Owning user.
    pub user_id: String,
    /// When the row was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Data required to assign a document to a folder. Duplicates are not
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderAssignment {
    /// Key of the document.
    #[validate(length(min = 1, message = "Document path is required"))]
    pub document_path: String,
    /// Target folder.
    pub folder_id: SmartFolderId,
    /// Owning user.
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
}
