//! Table store trait for equality-filtered row access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::filter::FilterField;
use crate::types::sorting::SortField;

/// A row as exchanged with the table store.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Trait for relational table backends.
///
/// Typed access lives in the repositories; this trait only moves JSON
/// rows. Every filter is an equality predicate, and all filters of one call
/// are combined with AND.
#[async_trait]
pub trait TableStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "remote", "memory").
    fn provider_type(&self) -> &str;

    /// Insert a row and return it as stored (with its assigned `id`).
    async fn insert(&self, table: &str, row: Row) -> AppResult<Row>;

    /// Insert a row, or merge it into the row that matches on the
    /// `on_conflict` columns.
    async fn upsert(&self, table: &str, row: Row, on_conflict: &[&str]) -> AppResult<Row>;

    /// Select every row matching all filters.
    async fn select(
        &self,
        table: &str,
        filters: &[FilterField],
        order: Option<&SortField>,
    ) -> AppResult<Vec<Row>>;

    /// Delete every row matching all filters, returning how many went.
    async fn delete(&self, table: &str, filters: &[FilterField]) -> AppResult<u64>;
}
