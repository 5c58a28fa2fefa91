//! Object store backed by the hosted storage REST API.

use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use docshelf_core::config::remote::{RemoteConfig, RemoteCredentials};
use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::http::{RemoteClient, join_url};
use docshelf_core::result::AppResult;
use docshelf_core::traits::object_store::{ListOptions, ObjectEntry, ObjectStore, UploadOptions};

const STORAGE_ROOT: [&str; 3] = ["storage", "v1", "object"];

/// Remote object store client.
#[derive(Debug, Clone)]
pub struct RemoteObjectStore {
    client: RemoteClient,
    bucket: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListBody<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u64,
    sort_by: SortBody<'a>,
}

#[derive(Debug, Serialize)]
struct SortBody<'a> {
    column: &'a str,
    order: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyBody<'a> {
    bucket_id: &'a str,
    source_key: &'a str,
    destination_key: &'a str,
}

#[derive(Debug, Serialize)]
struct RemoveBody<'a> {
    prefixes: &'a [String],
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    name: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<WireMetadata>,
    #[serde(default)]
    user_metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct WireMetadata {
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    mimetype: Option<String>,
}

impl From<WireEntry> for ObjectEntry {
    fn from(wire: WireEntry) -> Self {
        let (size, mime_type) = match wire.metadata {
            Some(meta) => (meta.size.unwrap_or(0), meta.mimetype),
            None => (0, None),
        };
        let attributes = wire
            .user_metadata
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();
        Self {
            name: wire.name,
            id: wire.id,
            size,
            mime_type,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            attributes,
        }
    }
}

impl RemoteObjectStore {
    /// Create a client for `bucket`. Missing credentials only warn here.
    pub fn new(remote: &RemoteConfig, bucket: &str) -> AppResult<Self> {
        Ok(Self {
            client: RemoteClient::new(remote, ErrorKind::Storage)?,
            bucket: bucket.to_string(),
        })
    }

    /// Bucket this store operates on.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Build `<url>/storage/v1/object/<segments...>` with each key segment
    /// percent-encoded.
    fn endpoint(&self, creds: &RemoteCredentials, segments: &[&str]) -> AppResult<Url> {
        join_url(
            &creds.url,
            STORAGE_ROOT.into_iter().chain(segments.iter().copied()),
        )
    }
}

/// Encode object attributes for the `x-metadata` upload header.
fn encode_attributes(attributes: &HashMap<String, String>) -> AppResult<String> {
    Ok(STANDARD.encode(serde_json::to_vec(attributes)?))
}

#[async_trait]
impl ObjectStore for RemoteObjectStore {
    fn provider_type(&self) -> &str {
        "remote"
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>> {
        let creds = self.client.credentials()?;
        let url = self.endpoint(&creds, &["list", &self.bucket])?;
        let body = ListBody {
            prefix,
            limit: options.limit,
            offset: options.offset,
            sort_by: SortBody {
                column: &options.sort_by.field,
                order: options.sort_by.direction.as_str(),
            },
        };

        let request = RemoteClient::authorize(self.client.http().post(url).json(&body), &creds);
        let response = self.client.send(request, "List objects").await?;
        let entries: Vec<WireEntry> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                "Failed to decode object listing",
                e,
            )
        })?;

        debug!(prefix, count = entries.len(), "Listed objects");
        Ok(entries.into_iter().map(ObjectEntry::from).collect())
    }

    async fn copy(&self, from: &str, to: &str) -> AppResult<()> {
        let creds = self.client.credentials()?;
        let url = self.endpoint(&creds, &["copy"])?;
        let body = CopyBody {
            bucket_id: &self.bucket,
            source_key: from,
            destination_key: to,
        };
        let request = RemoteClient::authorize(self.client.http().post(url).json(&body), &creds);
        self.client.send(request, "Copy object").await?;
        debug!(from, to, "Copied object");
        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        let creds = self.client.credentials()?;
        let url = self.endpoint(&creds, &[&self.bucket])?;
        let body = RemoveBody { prefixes: paths };
        let request = RemoteClient::authorize(self.client.http().delete(url).json(&body), &creds);
        self.client.send(request, "Remove objects").await?;
        debug!(count = paths.len(), "Removed objects");
        Ok(())
    }

    async fn upload(&self, path: &str, data: Bytes, options: &UploadOptions) -> AppResult<()> {
        let creds = self.client.credentials()?;
        let url = self.endpoint(&creds, &[&self.bucket, path])?;
        let size = data.len();

        let mut request = self
            .client
            .http()
            .post(url)
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(data);
        if let Some(content_type) = &options.content_type {
            request = request.header("content-type", content_type);
        }
        if !options.attributes.is_empty() {
            request = request.header("x-metadata", encode_attributes(&options.attributes)?);
        }

        let request = RemoteClient::authorize(request, &creds);
        self.client.send(request, "Upload object").await?;
        debug!(path, size, "Uploaded object");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        let base = self.client.config().url.as_deref().unwrap_or_default();
        let segments = STORAGE_ROOT
            .into_iter()
            .chain(["public", self.bucket.as_str(), path]);
        match join_url(base, segments) {
            Ok(url) => url.to_string(),
            // Unset or unparsable base URL; calls fail on credentials anyway.
            Err(_) => format!("/storage/v1/object/public/{}/{path}", self.bucket),
        }
    }
}
