//! Records produced by document listings. Built fresh on every call from
//! object-store metadata; nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live (regular or private) document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Display name.
    pub name: String,
    /// Full object key.
    pub path: String,
    /// Public URL derived from the key.
    pub public_url: String,
    /// Size in bytes.
    pub size: u64,
    /// Category (`"private"` for every private document).
    pub category: String,
    /// When the object was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// A document sitting in the trash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashRecord {
    /// Filename within the trash prefix.
    pub name: String,
    /// Full object key.
    pub path: String,
    /// Public URL derived from the key.
    pub public_url: String,
    /// Size in bytes. Zero marks a placeholder entry.
    pub size: u64,
    /// When the trash copy was created, i.e. when the document was trashed.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TrashRecord {
    /// Whether the entry is eligible for purging at `cutoff`: it must be a
    /// real object (non-zero size) trashed strictly before the cutoff.
    pub fn is_purgeable(&self, cutoff: DateTime<Utc>) -> bool {
        self.size > 0 && self.deleted_at.is_some_and(|at| at < cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(size: u64, deleted_at: Option<DateTime<Utc>>) -> TrashRecord {
        TrashRecord {
            name: "1_tax_W2.pdf".into(),
            path: "u1/trash/1_tax_W2.pdf".into(),
            public_url: String::new(),
            size,
            deleted_at,
        }
    }

    #[test]
    fn test_purgeable_requires_age_and_size() {
        let cutoff = Utc::now();
        assert!(record(5, Some(cutoff - Duration::days(1))).is_purgeable(cutoff));
        assert!(!record(5, Some(cutoff)).is_purgeable(cutoff));
        assert!(!record(0, Some(cutoff - Duration::days(10))).is_purgeable(cutoff));
        assert!(!record(5, None).is_purgeable(cutoff));
    }
}
