//! Table store backed by the hosted REST table API (PostgREST conventions).

use async_trait::async_trait;
use reqwest::{Response, Url};
use tracing::debug;

use docshelf_core::config::remote::{RemoteConfig, RemoteCredentials};
use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::http::{RemoteClient, join_url};
use docshelf_core::result::AppResult;
use docshelf_core::traits::table_store::{Row, TableStore};
use docshelf_core::types::filter::FilterField;
use docshelf_core::types::sorting::SortField;

const RETURN_ROWS: &str = "return=representation";
const MERGE_ROWS: &str = "resolution=merge-duplicates,return=representation";

/// Remote table store client.
#[derive(Debug, Clone)]
pub struct RestTableStore {
    client: RemoteClient,
}

impl RestTableStore {
    /// Create a client. Missing credentials only warn here.
    pub fn new(remote: &RemoteConfig) -> AppResult<Self> {
        Ok(Self {
            client: RemoteClient::new(remote, ErrorKind::Database)?,
        })
    }

    /// Build `<url>/rest/v1/<table>?<filters>&order=...`.
    fn table_url(
        creds: &RemoteCredentials,
        table: &str,
        filters: &[FilterField],
        order: Option<&SortField>,
        on_conflict: &[&str],
    ) -> AppResult<Url> {
        let mut url = join_url(&creds.url, ["rest", "v1", table])?;

        {
            let mut query = url.query_pairs_mut();
            for filter in filters {
                query.append_pair(
                    &filter.field,
                    &format!("eq.{}", filter.value.to_query_value()),
                );
            }
            if let Some(order) = order {
                query.append_pair(
                    "order",
                    &format!("{}.{}", order.field, order.direction.as_str()),
                );
            }
            if !on_conflict.is_empty() {
                query.append_pair("on_conflict", &on_conflict.join(","));
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    async fn rows(&self, response: Response, action: &str) -> AppResult<Vec<Row>> {
        response.json::<Vec<Row>>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("{action}: failed to decode rows"),
                e,
            )
        })
    }

    async fn first_row(&self, response: Response, action: &str) -> AppResult<Row> {
        self.rows(response, action)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::database(format!("{action}: no row returned")))
    }
}

#[async_trait]
impl TableStore for RestTableStore {
    fn provider_type(&self) -> &str {
        "remote"
    }

    async fn insert(&self, table: &str, row: Row) -> AppResult<Row> {
        let creds = self.client.credentials()?;
        let url = Self::table_url(&creds, table, &[], None, &[])?;
        let request = self
            .client
            .http()
            .post(url)
            .header("prefer", RETURN_ROWS)
            .json(&row);
        let response = self
            .client
            .send(RemoteClient::authorize(request, &creds), &format!("Insert into {table}"))
            .await?;
        debug!(table, "Inserted row");
        self.first_row(response, table).await
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &[&str]) -> AppResult<Row> {
        let creds = self.client.credentials()?;
        let url = Self::table_url(&creds, table, &[], None, on_conflict)?;
        let request = self
            .client
            .http()
            .post(url)
            .header("prefer", MERGE_ROWS)
            .json(&row);
        let response = self
            .client
            .send(RemoteClient::authorize(request, &creds), &format!("Upsert into {table}"))
            .await?;
        debug!(table, "Upserted row");
        self.first_row(response, table).await
    }

    async fn select(
        &self,
        table: &str,
        filters: &[FilterField],
        order: Option<&SortField>,
    ) -> AppResult<Vec<Row>> {
        let creds = self.client.credentials()?;
        let url = Self::table_url(&creds, table, filters, order, &[])?;
        let request = self.client.http().get(url);
        let response = self
            .client
            .send(RemoteClient::authorize(request, &creds), &format!("Select from {table}"))
            .await?;
        self.rows(response, table).await
    }

    async fn delete(&self, table: &str, filters: &[FilterField]) -> AppResult<u64> {
        let creds = self.client.credentials()?;
        let url = Self::table_url(&creds, table, filters, None, &[])?;
        let request = self.client.http().delete(url).header("prefer", RETURN_ROWS);
        let response = self
            .client
            .send(RemoteClient::authorize(request, &creds), &format!("Delete from {table}"))
            .await?;
        let deleted = self.rows(response, table).await?.len() as u64;
        debug!(table, deleted, "Deleted rows");
        Ok(deleted)
    }
}
