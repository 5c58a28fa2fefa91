//! Document upload.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::{ObjectStore, UploadOptions};
use docshelf_entity::document::DocumentRecord;
use docshelf_entity::document::key::{self, PRIVATE_CATEGORY, Visibility};

use super::listing::{CATEGORY_ATTRIBUTE, DISPLAY_NAME_ATTRIBUTE};

/// A document to upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original file name, extension included.
    pub file_name: String,
    /// Category to file the document under.
    pub category: String,
    /// File content.
    pub data: Bytes,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// Store under the private prefix.
    pub private: bool,
}

/// Uploads documents under the encoded key layout.
#[derive(Debug, Clone)]
pub struct UploadService {
    objects: Arc<dyn ObjectStore>,
}

impl UploadService {
    /// Create a new upload service.
    pub fn new(objects: Arc<dyn ObjectStore>) -> Self {
        Self { objects }
    }

    /// Upload a document for `user_id`.
    ///
    /// The key encodes the current millisecond timestamp, the category and
    /// the sanitized name. Category and the unsanitized display name are
    /// also stored as object attributes.
    pub async fn upload_document(
        &self,
        user_id: &str,
        request: UploadRequest,
    ) -> AppResult<DocumentRecord> {
        let file_name = request.file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }
        if request.data.is_empty() {
            return Err(AppError::validation("File is empty"));
        }
        if request.category.is_empty()
            || !request.category.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::validation(format!(
                "Category must be alphanumeric: {:?}",
                request.category
            )));
        }

        let (display_name, extension) = match key::split_extension(file_name) {
            (stem, Some(ext)) => (stem, ext),
            (_, None) => {
                return Err(AppError::validation(format!(
                    "File name has no extension: {file_name}"
                )));
            }
        };

        let visibility = if request.private {
            Visibility::Private
        } else {
            Visibility::Regular
        };
        let now = Utc::now();
        let filename = key::encode(
            now.timestamp_millis(),
            &request.category,
            display_name,
            extension,
        );
        let path = key::join(&key::document_prefix(user_id, visibility), &filename);

        let options = UploadOptions {
            content_type: request.content_type.clone(),
            upsert: false,
            attributes: HashMap::from([
                (CATEGORY_ATTRIBUTE.to_string(), request.category.clone()),
                (DISPLAY_NAME_ATTRIBUTE.to_string(), display_name.to_string()),
            ]),
        };
        let size = request.data.len() as u64;
        self.objects.upload(&path, request.data, &options).await?;

        info!(user_id, path = %path, size, "Uploaded document");
        let category = match visibility {
            Visibility::Regular => request.category,
            Visibility::Private => PRIVATE_CATEGORY.to_string(),
        };
        Ok(DocumentRecord {
            name: display_name.to_string(),
            public_url: self.objects.public_url(&path),
            path,
            size,
            category,
            created_at: Some(now),
        })
    }
}
