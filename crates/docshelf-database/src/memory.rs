//! In-memory table store.
//!
//! Assigns `id` and `created_at` on insert the way the hosted tables do,
//! and can be told to fail every call against a table.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::table_store::{Row, TableStore};
use docshelf_core::types::filter::FilterField;
use docshelf_core::types::sorting::{SortDirection, SortField};

/// Table store kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    tables: Arc<DashMap<String, Vec<Row>>>,
    failures: Arc<DashMap<String, String>>,
}

impl MemoryTableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row in `table`.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .get(table)
            .map(|rows| rows.value().clone())
            .unwrap_or_default()
    }

    /// Make every call against `table` fail with `message`.
    pub fn fail_table(&self, table: &str, message: &str) {
        self.failures.insert(table.to_string(), message.to_string());
    }

    fn check(&self, table: &str) -> AppResult<()> {
        match self.failures.get(table) {
            Some(message) => Err(AppError::database(message.value().clone())),
            None => Ok(()),
        }
    }

    fn stamp(mut row: Row) -> Row {
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
        row
    }
}

fn matches_all(row: &Row, filters: &[FilterField]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn insert(&self, table: &str, row: Row) -> AppResult<Row> {
        self.check(table)?;
        let row = Self::stamp(row);
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &[&str]) -> AppResult<Row> {
        self.check(table)?;
        let mut rows = self.tables.entry(table.to_string()).or_default();

        let existing = rows.iter_mut().find(|candidate| {
            on_conflict
                .iter()
                .all(|col| candidate.get(*col).is_some() && candidate.get(*col) == row.get(*col))
        });

        if let Some(existing) = existing {
            for (key, value) in row {
                existing.insert(key, value);
            }
            return Ok(existing.clone());
        }

        let row = Self::stamp(row);
        rows.push(row.clone());
        Ok(row)
    }

    async fn select(
        &self,
        table: &str,
        filters: &[FilterField],
        order: Option<&SortField>,
    ) -> AppResult<Vec<Row>> {
        self.check(table)?;
        let mut selected: Vec<Row> = self
            .rows(table)
            .into_iter()
            .filter(|row| matches_all(row, filters))
            .collect();

        if let Some(order) = order {
            selected.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.field), b.get(&order.field));
                match order.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        Ok(selected)
    }

    async fn delete(&self, table: &str, filters: &[FilterField]) -> AppResult<u64> {
        self.check(table)?;
        let Some(mut rows) = self.tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !matches_all(row, filters));
        Ok((before - rows.len()) as u64)
    }
}
