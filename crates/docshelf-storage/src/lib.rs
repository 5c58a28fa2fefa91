//! # docshelf-storage
//!
//! Object store providers for Docshelf: the hosted storage REST API and an
//! in-memory store used by tests and the `memory` provider setting.

pub mod providers;

use std::sync::Arc;

use tracing::info;

use docshelf_core::config::AppConfig;
use docshelf_core::config::storage::ProviderKind;
use docshelf_core::result::AppResult;
use docshelf_core::traits::ObjectStore;

pub use providers::{MemoryObjectStore, RemoteObjectStore, StoreOp};

/// Build the object store selected by `storage.provider`.
pub fn build_object_store(config: &AppConfig) -> AppResult<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.storage.provider {
        ProviderKind::Remote => Arc::new(RemoteObjectStore::new(
            &config.remote,
            &config.storage.bucket,
        )?),
        ProviderKind::Memory => Arc::new(MemoryObjectStore::new(&config.storage.bucket)),
    };
    info!(provider = store.provider_type(), bucket = %config.storage.bucket, "Object store ready");
    Ok(store)
}
