//! Live document CLI commands.

use std::path::PathBuf;

use bytes::Bytes;
use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docshelf_core::error::AppError;
use docshelf_core::format::{format_file_size, format_relative};
use docshelf_entity::document::{DocumentRecord, Visibility};
use docshelf_service::UploadRequest;

use super::{PageJson, Services, parse_cursor};
use crate::output::{self, OutputFormat};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocsArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocsCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocsCommand {
    /// List a user's documents
    List {
        /// User ID
        user_id: String,
        /// Page through private documents only
        #[arg(long)]
        private: bool,
        /// Continuation token from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Upload a document
    Upload {
        /// User ID
        user_id: String,
        /// Path to the file to upload
        file: PathBuf,
        /// Category to file the document under
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Store under the private prefix
        #[arg(long)]
        private: bool,
        /// MIME type of the file
        #[arg(long)]
        content_type: Option<String>,
    },
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// Display name
    name: String,
    /// Category
    category: String,
    /// Size
    size: String,
    /// Added
    added: String,
    /// Object key
    path: String,
}

impl From<&DocumentRecord> for DocumentRow {
    fn from(doc: &DocumentRecord) -> Self {
        Self {
            name: doc.name.clone(),
            category: doc.category.clone(),
            size: format_file_size(doc.size),
            added: doc
                .created_at
                .map(|at| format_relative(at, Utc::now()))
                .unwrap_or_default(),
            path: doc.path.clone(),
        }
    }
}

/// Execute document commands
pub async fn execute(
    args: &DocsArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        DocsCommand::List {
            user_id,
            private,
            cursor,
        } => {
            if !private && cursor.is_none() {
                let docs = services.listing.list_user_documents(user_id).await?;
                print_documents(&docs, format);
                return Ok(());
            }

            let visibility = if *private {
                Visibility::Private
            } else {
                Visibility::Regular
            };
            let page = services
                .listing
                .list_documents_page(user_id, visibility, parse_cursor(cursor.as_deref())?)
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&PageJson {
                    next_token: page.next_token(),
                    items: page.items,
                }),
                OutputFormat::Table => {
                    print_documents(&page.items, format);
                    output::print_next_token(page.next_token(), format);
                }
            }
        }
        DocsCommand::Upload {
            user_id,
            file,
            category,
            private,
            content_type,
        } => {
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    AppError::validation(format!("Invalid file name: {}", file.display()))
                })?
                .to_string();
            let data = tokio::fs::read(file).await?;

            let record = services
                .upload
                .upload_document(
                    user_id,
                    UploadRequest {
                        file_name,
                        category: category.clone(),
                        data: Bytes::from(data),
                        content_type: content_type.clone(),
                        private: *private,
                    },
                )
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&record),
                OutputFormat::Table => {
                    output::print_success(&format!("Uploaded '{}'", record.name));
                    output::print_kv("Path", &record.path);
                    output::print_kv("Size", &format_file_size(record.size));
                    output::print_kv("URL", &record.public_url);
                }
            }
        }
    }
    Ok(())
}

fn print_documents(docs: &[DocumentRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(&docs),
        OutputFormat::Table => {
            let rows: Vec<DocumentRow> = docs.iter().map(DocumentRow::from).collect();
            output::print_list(&rows, format);
        }
    }
}
