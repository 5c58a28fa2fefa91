//! In-memory object store.
//!
//! Mirrors the listing semantics of the remote store (entries directly
//! under a prefix, folder placeholders for deeper keys) and can be told to
//! fail specific calls, which makes it the fake used by service tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::object_store::{ListOptions, ObjectEntry, ObjectStore, UploadOptions};
use docshelf_core::types::sorting::SortDirection;

/// Operations that can be counted and made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// `list`, matched against the exact prefix.
    List,
    /// `copy`, matched against the source key.
    Copy,
    /// `remove`, matched against any key in the batch.
    Remove,
    /// `upload`, matched against the key.
    Upload,
}

#[derive(Debug, Clone)]
struct StoredObject {
    id: String,
    data: Bytes,
    content_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: HashMap<String, String>,
}

/// Object store kept in process memory.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<DashMap<String, StoredObject>>,
    failures: Arc<DashMap<(StoreOp, String), String>>,
    calls: Arc<DashMap<StoreOp, AtomicUsize>>,
}

impl MemoryObjectStore {
    /// Create an empty store for `bucket`.
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Arc::new(DashMap::new()),
            failures: Arc::new(DashMap::new()),
            calls: Arc::new(DashMap::new()),
        }
    }

    /// Put an object with an explicit creation time.
    pub fn put_at(&self, path: &str, data: impl Into<Bytes>, created_at: DateTime<Utc>) {
        self.objects.insert(
            path.to_string(),
            StoredObject {
                id: Uuid::new_v4().to_string(),
                data: data.into(),
                content_type: None,
                created_at,
                updated_at: created_at,
                attributes: HashMap::new(),
            },
        );
    }

    /// Put an object created now.
    pub fn put(&self, path: &str, data: impl Into<Bytes>) {
        self.put_at(path, data, Utc::now());
    }

    /// Whether an object exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.objects.contains_key(path)
    }

    /// Stored bytes at `path`.
    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.objects.get(path).map(|o| o.data.clone())
    }

    /// Content type stored at `path`.
    pub fn content_type(&self, path: &str) -> Option<String> {
        self.objects.get(path).and_then(|o| o.content_type.clone())
    }

    /// Every key currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Make `op` fail whenever it targets `target`.
    pub fn fail_on(&self, op: StoreOp, target: &str, message: &str) {
        self.failures
            .insert((op, target.to_string()), message.to_string());
    }

    /// How many times `op` has been called.
    pub fn call_count(&self, op: StoreOp) -> usize {
        self.calls
            .get(&op)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn record(&self, op: StoreOp) {
        self.calls
            .entry(op)
            .or_insert_with(|| AtomicUsize::new(0))
            .fetch_add(1, Ordering::SeqCst);
    }

    fn check(&self, op: StoreOp, target: &str) -> AppResult<()> {
        match self.failures.get(&(op, target.to_string())) {
            Some(message) => Err(AppError::storage(message.value().clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>> {
        self.record(StoreOp::List);
        self.check(StoreOp::List, prefix)?;

        let dir = format!("{}/", prefix.trim_end_matches('/'));
        let mut folders: BTreeMap<String, ObjectEntry> = BTreeMap::new();
        let mut files: Vec<ObjectEntry> = Vec::new();

        for item in self.objects.iter() {
            let Some(rest) = item.key().strip_prefix(&dir) else {
                continue;
            };
            match rest.split_once('/') {
                Some((folder, _)) => {
                    folders.entry(folder.to_string()).or_insert_with(|| ObjectEntry {
                        name: folder.to_string(),
                        id: None,
                        size: 0,
                        mime_type: None,
                        created_at: None,
                        updated_at: None,
                        attributes: HashMap::new(),
                    });
                }
                None => {
                    let object = item.value();
                    files.push(ObjectEntry {
                        name: rest.to_string(),
                        id: Some(object.id.clone()),
                        size: object.data.len() as u64,
                        mime_type: object.content_type.clone(),
                        created_at: Some(object.created_at),
                        updated_at: Some(object.updated_at),
                        attributes: object.attributes.clone(),
                    });
                }
            }
        }

        match options.sort_by.field.as_str() {
            "created_at" => files.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            _ => files.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        if options.sort_by.direction == SortDirection::Desc {
            files.reverse();
        }

        Ok(folders
            .into_values()
            .chain(files)
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .collect())
    }

    async fn copy(&self, from: &str, to: &str) -> AppResult<()> {
        self.record(StoreOp::Copy);
        self.check(StoreOp::Copy, from)?;

        let source = self
            .objects
            .get(from)
            .map(|o| o.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Object not found: {from}")))?;
        if self.objects.contains_key(to) {
            return Err(AppError::conflict(format!("The resource already exists: {to}")));
        }

        let now = Utc::now();
        self.objects.insert(
            to.to_string(),
            StoredObject {
                id: Uuid::new_v4().to_string(),
                created_at: now,
                updated_at: now,
                ..source
            },
        );
        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        self.record(StoreOp::Remove);
        for path in paths {
            self.check(StoreOp::Remove, path)?;
        }
        for path in paths {
            self.objects.remove(path);
        }
        Ok(())
    }

    async fn upload(&self, path: &str, data: Bytes, options: &UploadOptions) -> AppResult<()> {
        self.record(StoreOp::Upload);
        self.check(StoreOp::Upload, path)?;

        if !options.upsert && self.objects.contains_key(path) {
            return Err(AppError::conflict(format!("The resource already exists: {path}")));
        }

        let now = Utc::now();
        self.objects.insert(
            path.to_string(),
            StoredObject {
                id: Uuid::new_v4().to_string(),
                data,
                content_type: options.content_type.clone(),
                created_at: now,
                updated_at: now,
                attributes: options.attributes.clone(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{}/{path}", self.bucket)
    }
}
