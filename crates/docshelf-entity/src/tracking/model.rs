//! `deleted_documents` tracking rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marks a document as currently trashed. One row per trash key is
/// expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedDocument {
    /// Owning user.
    pub user_id: String,
    /// Key of the trash copy.
    pub document_path: String,
    /// Filename of the trashed document.
    pub document_name: String,
    /// When the row was written. Left to the store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl DeletedDocument {
    /// Tracking row for a freshly trashed document.
    pub fn new(
        user_id: impl Into<String>,
        document_path: impl Into<String>,
        document_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            document_path: document_path.into(),
            document_name: document_name.into(),
            deleted_at: None,
        }
    }
}
