//! CLI command definitions and dispatch.

pub mod docs;
pub mod folder;
pub mod trash;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use docshelf_core::config::AppConfig;
use docshelf_core::config::storage::ProviderKind;
use docshelf_core::error::AppError;
use docshelf_core::types::ListCursor;
use docshelf_database::build_table_store;
use docshelf_service::{
    DocumentLifecycleService, DocumentListingService, FolderTaggingService, UploadService,
};
use docshelf_storage::build_object_store;

use crate::output::OutputFormat;

/// Docshelf: personal document storage with trash and smart folders
#[derive(Debug, Parser)]
#[command(name = "docshelf", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/<env>.toml over config/default.toml)
    #[arg(long, env = "DOCSHELF_ENV", default_value = "development")]
    pub config_env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Live documents
    Docs(docs::DocsArgs),
    /// Trash management
    Trash(trash::TrashArgs),
    /// Smart folders
    Folder(folder::FolderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let services = Services::build(&config)?;
        match &self.command {
            Commands::Docs(args) => docs::execute(args, &services, self.format).await,
            Commands::Trash(args) => trash::execute(args, &services, self.format).await,
            Commands::Folder(args) => folder::execute(args, &services, self.format).await,
        }
    }
}

/// Services wired over the configured stores.
#[derive(Debug, Clone)]
pub struct Services {
    /// Trash lifecycle.
    pub lifecycle: DocumentLifecycleService,
    /// Document and trash listings.
    pub listing: DocumentListingService,
    /// Uploads.
    pub upload: UploadService,
    /// Smart folders.
    pub folders: FolderTaggingService,
}

impl Services {
    /// Build the stores selected by the configuration and the services on
    /// top of them.
    pub fn build(config: &AppConfig) -> Result<Self, AppError> {
        if config.storage.provider == ProviderKind::Memory {
            warn!("storage.provider is \"memory\": nothing is kept after this command exits");
        }
        let objects = build_object_store(config)?;
        let tables = build_table_store(config)?;

        Ok(Self {
            lifecycle: DocumentLifecycleService::new(objects.clone(), tables.clone(), config),
            listing: DocumentListingService::new(objects.clone(), &config.storage),
            upload: UploadService::new(objects),
            folders: FolderTaggingService::new(tables),
        })
    }
}

/// JSON shape of a paged listing.
#[derive(Debug, Serialize)]
pub struct PageJson<T: Serialize> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Token for the next page.
    pub next_token: Option<String>,
}

/// Parse an optional `--cursor` argument.
pub fn parse_cursor(token: Option<&str>) -> Result<Option<ListCursor>, AppError> {
    token.map(ListCursor::from_token).transpose()
}
