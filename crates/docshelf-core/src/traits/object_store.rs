//! Object store trait for hierarchical blob storage.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::sorting::SortField;

/// One entry returned by a listing.
///
/// Names are relative to the listed prefix. Sub-folders show up as
/// entries without an id, with size 0 and no metadata.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectEntry {
    /// Name relative to the listed prefix.
    pub name: String,
    /// Store-assigned object id (absent for folder placeholders).
    pub id: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// MIME type (if known).
    pub mime_type: Option<String>,
    /// When the object was created. A copy is a new object.
    pub created_at: Option<DateTime<Utc>>,
    /// When the object was last updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Free-form object attributes set at upload time.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ObjectEntry {
    /// Whether the entry is a folder placeholder rather than an object.
    pub fn is_folder(&self) -> bool {
        self.id.is_none()
    }
}

/// Parameters of a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of entries to return.
    pub limit: u32,
    /// Number of entries to skip.
    pub offset: u64,
    /// Sort order.
    pub sort_by: SortField,
}

impl ListOptions {
    /// Newest first, as every document listing is ordered.
    pub fn newest_first(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            sort_by: SortField::desc("created_at"),
        }
    }

    /// Same options starting at `offset`.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

/// Parameters of an upload call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Content type sent with the object.
    pub content_type: Option<String>,
    /// Overwrite an existing object at the same key.
    pub upsert: bool,
    /// Object attributes stored alongside the blob.
    pub attributes: HashMap<String, String>,
}

/// Trait for object storage backends.
///
/// Every call is a single request to the backend; there are no retries.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "remote", "memory").
    fn provider_type(&self) -> &str;

    /// List the entries directly under `prefix`.
    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>>;

    /// Copy an object to a new key.
    async fn copy(&self, from: &str, to: &str) -> AppResult<()>;

    /// Remove objects in one batch. Missing keys are not an error.
    async fn remove(&self, paths: &[String]) -> AppResult<()>;

    /// Upload bytes to `path`.
    async fn upload(&self, path: &str, data: Bytes, options: &UploadOptions) -> AppResult<()>;

    /// Public URL of the object at `path`.
    fn public_url(&self, path: &str) -> String;
}
