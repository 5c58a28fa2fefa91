//! # docshelf-entity
//!
//! Domain records for Docshelf: the document key layout and filename codec,
//! listing records, smart folders and their assignments, and trash
//! tracking rows.

pub mod document;
pub mod folder;
pub mod tracking;
