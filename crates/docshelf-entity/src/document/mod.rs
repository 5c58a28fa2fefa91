//! Document keys and listing records.

pub mod key;
pub mod model;

pub use key::{DecodedName, Visibility};
pub use model::{DocumentRecord, TrashRecord};
