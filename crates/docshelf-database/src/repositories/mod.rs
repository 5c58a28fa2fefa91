//! Typed repositories over a [`TableStore`].
//!
//! [`TableStore`]: docshelf_core::traits::TableStore

pub mod assignment;
pub mod deleted_document;
pub mod share;
pub mod smart_folder;

pub use assignment::FolderAssignmentRepository;
pub use deleted_document::DeletedDocumentRepository;
pub use share::DocumentShareRepository;
pub use smart_folder::SmartFolderRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::Row;

/// Serialize a record into a table row.
pub(crate) fn to_row<T: Serialize>(record: &T) -> AppResult<Row> {
    match serde_json::to_value(record)? {
        serde_json::Value::Object(row) => Ok(row),
        _ => Err(AppError::internal("Record did not serialize to a row")),
    }
}

/// Decode a table row into a record.
pub(crate) fn from_row<T: DeserializeOwned>(row: Row, table: &str) -> AppResult<T> {
    serde_json::from_value(serde_json::Value::Object(row)).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to decode {table} row"),
            e,
        )
    })
}

/// Decode every row returned by a select.
pub(crate) fn from_rows<T: DeserializeOwned>(rows: Vec<Row>, table: &str) -> AppResult<Vec<T>> {
    rows.into_iter().map(|row| from_row(row, table)).collect()
}
