//! Smart folder CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docshelf_core::error::AppError;
use docshelf_core::format::format_date;
use docshelf_core::types::SmartFolderId;

use super::Services;
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List a user's smart folders
    List {
        /// User ID
        user_id: String,
    },
    /// Create a smart folder
    Create {
        /// User ID
        user_id: String,
        /// Folder name
        name: String,
        /// Folder description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a smart folder and its assignments
    Delete {
        /// User ID
        user_id: String,
        /// Folder ID
        folder_id: String,
    },
    /// Assign a document to a folder
    Assign {
        /// User ID
        user_id: String,
        /// Object key of the document
        path: String,
        /// Folder ID
        folder_id: String,
    },
    /// Remove a document from a folder
    Unassign {
        /// User ID
        user_id: String,
        /// Object key of the document
        path: String,
        /// Folder ID
        folder_id: String,
    },
    /// List a user's document assignments
    Assignments {
        /// User ID
        user_id: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
    /// Created
    created: String,
}

/// Assignment display row
#[derive(Debug, Serialize, Tabled)]
struct AssignmentRow {
    /// Assignment ID
    id: String,
    /// Folder ID
    folder_id: String,
    /// Document key
    document_path: String,
}

fn parse_folder_id(raw: &str) -> Result<SmartFolderId, AppError> {
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid folder ID '{raw}': {e}")))
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let folders = &services.folders;

    match &args.command {
        FolderCommand::List { user_id } => {
            let rows: Vec<FolderRow> = folders
                .get_user_smart_folders(user_id)
                .await?
                .into_iter()
                .map(|f| FolderRow {
                    id: f.id.to_string(),
                    name: f.folder_name,
                    description: f.folder_description.unwrap_or_default(),
                    created: f.created_at.map(format_date).unwrap_or_default(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Create {
            user_id,
            name,
            description,
        } => {
            let folder = folders
                .create_smart_folder(user_id, name, description.clone())
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&folder),
                OutputFormat::Table => {
                    output::print_success(&format!("Created folder '{}'", folder.folder_name));
                    output::print_kv("ID", &folder.id.to_string());
                }
            }
        }
        FolderCommand::Delete { user_id, folder_id } => {
            let folder_id = parse_folder_id(folder_id)?;
            folders.delete_smart_folder(user_id, folder_id).await?;
            output::print_success(&format!("Deleted folder {folder_id}"));
        }
        FolderCommand::Assign {
            user_id,
            path,
            folder_id,
        } => {
            let folder_id = parse_folder_id(folder_id)?;
            let assignment = folders
                .assign_document_to_folder(user_id, path, folder_id)
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&assignment),
                OutputFormat::Table => {
                    output::print_success(&format!("Assigned {path} to {folder_id}"));
                }
            }
        }
        FolderCommand::Unassign {
            user_id,
            path,
            folder_id,
        } => {
            let folder_id = parse_folder_id(folder_id)?;
            let removed = folders.unassign_document(user_id, path, folder_id).await?;
            if removed == 0 {
                output::print_warning(&format!("{path} was not in folder {folder_id}"));
            } else {
                output::print_success(&format!("Removed {path} from {folder_id}"));
            }
        }
        FolderCommand::Assignments { user_id } => {
            let rows: Vec<AssignmentRow> = folders
                .get_document_folder_assignments(user_id)
                .await?
                .into_iter()
                .map(|a| AssignmentRow {
                    id: a.id.to_string(),
                    folder_id: a.folder_id.to_string(),
                    document_path: a.document_path,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}
