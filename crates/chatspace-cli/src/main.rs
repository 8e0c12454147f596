use std::path::PathBuf;

use anyhow::Result;
use chatspace_core::workspace::IdStrategy;
use chatspace_infrastructure::{ChatspacePaths, ConfigService, init_logging};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chatspace")]
#[command(about = "Chatspace CLI - folder-scoped chat workspaces", long_about = None)]
struct Cli {
    /// Directory holding config.toml, workspaces.json and folders.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Id strategy for new workspaces (`timestamp` or `uuid`), overriding config.toml
    #[arg(long, global = true)]
    id_strategy: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List folders from the folder catalog
    Folders,
    /// List workspaces and mark the active one
    List,
    /// Show the workspace currently in effect
    Current,
    /// Select a workspace by id, or `everything`
    Select { id: String },
    /// Create a workspace and make it current
    Create {
        #[arg(long)]
        name: String,
        /// Folder id to include; repeat to pick several, in order
        #[arg(long = "folder")]
        folders: Vec<i32>,
    },
    /// Rename a workspace or replace its folders
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Replacement folder ids, in order; omit to keep the current ones
        #[arg(long = "folder")]
        folders: Vec<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ChatspacePaths::new(cli.config_dir);
    let mut config = ConfigService::new(&paths)?.load_or_default();
    if let Some(strategy) = &cli.id_strategy {
        config.id_strategy = IdStrategy::parse(strategy)?;
    }
    let log_dir = if config.log_to_file {
        Some(paths.logs_dir()?)
    } else {
        None
    };
    let _guard = init_logging(&config.log_filter, log_dir.as_deref())?;

    let context = commands::Context::open(&paths, &config)?;
    tracing::debug!("Loaded {} folders from catalog", context.catalog.len());

    match cli.command {
        Commands::Folders => commands::folders::list(&context),
        Commands::List => commands::workspace::list(&context).await,
        Commands::Current => commands::workspace::current(&context).await,
        Commands::Select { id } => commands::workspace::select(&context, &id).await?,
        Commands::Create { name, folders } => {
            commands::workspace::create(&context, name, folders).await?
        }
        Commands::Edit { id, name, folders } => {
            commands::workspace::edit(&context, id, name, folders).await?
        }
    }

    Ok(())
}
