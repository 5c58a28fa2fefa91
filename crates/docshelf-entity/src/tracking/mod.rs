//! Rows recording which documents currently sit in the trash.

pub mod model;

pub use model::DeletedDocument;
