//! Table store construction from configuration.

use std::sync::Arc;

use tracing::info;

use docshelf_core::config::AppConfig;
use docshelf_core::config::storage::ProviderKind;
use docshelf_core::result::AppResult;
use docshelf_core::traits::TableStore;

use crate::memory::MemoryTableStore;
use crate::rest::RestTableStore;

/// Build the table store selected by `storage.provider`.
pub fn build_table_store(config: &AppConfig) -> AppResult<Arc<dyn TableStore>> {
    let store: Arc<dyn TableStore> = match config.storage.provider {
        ProviderKind::Remote => Arc::new(RestTableStore::new(&config.remote)?),
        ProviderKind::Memory => Arc::new(MemoryTableStore::new()),
    };
    info!(
        provider = store.provider_type(),
        url = %mask_url(config.remote.url.as_deref().unwrap_or("<unset>")),
        "Table store ready"
    );
    Ok(store)
}

/// Strip any userinfo and query string from a URL before logging it.
fn mask_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    if let Some((scheme, rest)) = without_query.split_once("://") {
        if let Some((_, host)) = rest.split_once('@') {
            return format!("{scheme}://****@{host}");
        }
    }
    without_query.to_string()
}
