//! Trash retention configuration.

use serde::{Deserialize, Serialize};

/// Trash lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashConfig {
    /// Age in days after which trashed documents are purged.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Whether purging also removes the `deleted_documents` tracking rows
    /// of the purged entries. Off by default: purge only touches objects.
    #[serde(default)]
    pub purge_clears_tracking: bool,
}

impl Default for TrashConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            purge_clears_tracking: false,
        }
    }
}

fn default_retention_days() -> u32 {
    30
}
