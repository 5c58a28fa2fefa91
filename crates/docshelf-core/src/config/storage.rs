//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Which provider backs the object and table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// The hosted storage and table REST APIs.
    Remote,
    /// Process-local in-memory stores (tests, demos).
    Memory,
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Remote
    }
}

/// Object storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider to use for both stores.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Bucket holding every user's documents.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Maximum number of entries returned by one listing call.
    #[serde(default = "default_list_page_size")]
    pub list_page_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            bucket: default_bucket(),
            list_page_size: default_list_page_size(),
        }
    }
}

fn default_bucket() -> String {
    "documents".to_string()
}

fn default_list_page_size() -> u32 {
    100
}
