//! Toolhub command-line entry point.
//!
//! Drives the tool store and link dispatcher against the configured storage
//! backend, printing collections as JSON on stdout.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use toolhub_core::events::EventBus;
use toolhub_core::links::{DispatchAction, LinkDispatcher, SystemBrowser};
use toolhub_core::storage::open_store;
use toolhub_core::tools::{ToolInput, ToolRecord, ToolStore};
use toolhub_core::Config;

#[derive(Debug, Parser)]
#[command(name = "toolhub", version, about = "Recent/favorite tools and link dispatch")]
struct Cli {
    /// JSON config file.
    #[arg(long, env = "TOOLHUB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List recently accessed tools, newest first.
    Recent,
    /// List favorite tools.
    Favorites,
    /// Add or remove a favorite.
    ToggleFavorite(ToolArgs),
    /// Exit 0 if the named tool is a favorite, 1 otherwise.
    IsFavorite { name: String },
    /// Forget all recently accessed tools.
    ClearRecent,
    /// Dispatch a link, recording tool access when --name is given.
    Open {
        url: String,
        #[arg(long)]
        target: Option<String>,
        #[command(flatten)]
        tool: OptionalToolArgs,
    },
}

#[derive(Debug, Args)]
struct ToolArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    icon: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    url: String,
}

#[derive(Debug, Args)]
struct OptionalToolArgs {
    /// Tool name; enables access recording.
    #[arg(long)]
    name: Option<String>,
    #[arg(long, default_value = "")]
    icon: String,
    #[arg(long, default_value = "")]
    category: String,
}

fn print_records(
    store: &ToolStore,
    records: &[ToolRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "icon": r.icon,
                "category": r.category,
                "url": r.url,
                "timestamp": r.timestamp,
                "accessed": store.format_relative_time(r.timestamp),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Initialize observability
    toolhub_core::observability::init_tracing_with(&config.observability);

    let storage = open_store(&config)?;
    let store = ToolStore::from_config(storage, &config.tracking);

    match cli.command {
        Command::Recent => print_records(&store, &store.get_recent())?,
        Command::Favorites => print_records(&store, &store.get_favorites())?,
        Command::ToggleFavorite(args) => {
            let input = ToolInput::new(args.name, args.icon, args.category, args.url);
            let favorites = store.toggle_favorite(&input);
            print_records(&store, &favorites)?;
        }
        Command::IsFavorite { name } => {
            let favorite = store.is_favorite(&name);
            println!("{}", favorite);
            if !favorite {
                std::process::exit(1);
            }
        }
        Command::ClearRecent => store.clear_recent(),
        Command::Open { url, target, tool } => {
            let host = Arc::new(SystemBrowser::new(config.dispatch.origin.clone()));
            let dispatcher = LinkDispatcher::new(store.clone(), EventBus::new(), host)
                .with_config(config.dispatch.clone())
                .with_locale(config.tracking.locale);

            let input = tool
                .name
                .map(|name| ToolInput::new(name, tool.icon, tool.category, url.clone()));

            let outcome = dispatcher.open(&url, target.as_deref(), input).await;
            if let Some(access) = outcome.access {
                access.wait().await?;
            }

            match outcome.action {
                DispatchAction::Failed { url, error } => {
                    tracing::error!(%url, %error, "Could not open link");
                    std::process::exit(2);
                }
                action => tracing::info!(?action, "Link dispatched"),
            }
        }
    }

    Ok(())
}
