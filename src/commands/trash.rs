//! Trash CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docshelf_core::error::AppError;
use docshelf_core::format::{format_date_time, format_file_size};
use docshelf_entity::document::TrashRecord;

use super::{PageJson, Services, parse_cursor};
use crate::output::{self, OutputFormat};

/// Arguments for trash commands
#[derive(Debug, Args)]
pub struct TrashArgs {
    /// Trash subcommand
    #[command(subcommand)]
    pub command: TrashCommand,
}

/// Trash subcommands
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List a user's trash
    List {
        /// User ID
        user_id: String,
        /// Continuation token from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Move a document to the trash
    Move {
        /// User ID
        user_id: String,
        /// Object key of the document
        path: String,
    },
    /// Restore a trashed document
    Restore {
        /// User ID
        user_id: String,
        /// Filename within the trash
        filename: String,
    },
    /// Permanently delete an object
    Delete {
        /// Object key
        path: String,
    },
    /// Remove trash entries older than the retention period
    Purge {
        /// User ID
        user_id: String,
        /// Age in days (defaults to trash.retention_days)
        #[arg(long)]
        days: Option<u32>,
    },
}

/// Trash display row
#[derive(Debug, Serialize, Tabled)]
struct TrashRow {
    /// Filename
    name: String,
    /// Size
    size: String,
    /// Deleted
    deleted: String,
    /// Object key
    path: String,
}

impl From<&TrashRecord> for TrashRow {
    fn from(record: &TrashRecord) -> Self {
        Self {
            name: record.name.clone(),
            size: format_file_size(record.size),
            deleted: record
                .deleted_at
                .map(format_date_time)
                .unwrap_or_default(),
            path: record.path.clone(),
        }
    }
}

/// Execute trash commands
pub async fn execute(
    args: &TrashArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        TrashCommand::List { user_id, cursor } => {
            let page = services
                .listing
                .list_trash_page(user_id, parse_cursor(cursor.as_deref())?)
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&PageJson {
                    next_token: page.next_token(),
                    items: page.items,
                }),
                OutputFormat::Table => {
                    let rows: Vec<TrashRow> = page.items.iter().map(TrashRow::from).collect();
                    output::print_list(&rows, format);
                    output::print_next_token(page.next_token(), format);
                }
            }
        }
        TrashCommand::Move { user_id, path } => {
            let outcome = services.lifecycle.move_to_trash(user_id, path).await?;
            match format {
                OutputFormat::Json => output::print_json(&outcome),
                OutputFormat::Table => {
                    output::print_success(&format!("Moved to {}", outcome.trash_path));
                    output::print_cleanup(&outcome.cleanup);
                    if let Some(error) = &outcome.tracking_error {
                        output::print_warning(&format!("Trash tracking not recorded: {error}"));
                    }
                }
            }
        }
        TrashCommand::Restore { user_id, filename } => {
            let outcome = services
                .lifecycle
                .restore_from_trash(user_id, filename)
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&outcome),
                OutputFormat::Table => {
                    output::print_success(&format!("Restored to {}", outcome.path));
                    output::print_kv("URL", &outcome.public_url);
                    output::print_cleanup(&outcome.cleanup);
                }
            }
        }
        TrashCommand::Delete { path } => {
            let report = services.lifecycle.delete_permanent(path).await?;
            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => {
                    output::print_success(&format!("Deleted {path}"));
                    output::print_cleanup(&report);
                }
            }
        }
        TrashCommand::Purge { user_id, days } => {
            let days = days.unwrap_or_else(|| services.lifecycle.retention_days());
            let outcome = services.lifecycle.purge_old_trash(user_id, days).await?;
            match format {
                OutputFormat::Json => output::print_json(&outcome),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "Purged {} entries older than {days} days",
                        outcome.removed.len()
                    ));
                    for path in &outcome.removed {
                        output::print_kv("Removed", path);
                    }
                    output::print_cleanup(&outcome.cleanup);
                }
            }
        }
    }
    Ok(())
}
