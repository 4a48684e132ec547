//! Factgraph CLI - Knowledge graphs over analysed claim histories.

use clap::Parser;
use factgraph_cli::commands;
use factgraph_cli::{Cli, CliError, Command, Config, Formatter};
use factgraph_store::SqliteClaimStore;
use std::fs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr so stdout stays machine-readable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> factgraph_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_or_create(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Open the claim store
    let database = cli.database.unwrap_or_else(|| config.database.clone());
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut store = SqliteClaimStore::new(&database)?;
    tracing::debug!(database = %database.display(), "Opened claim store");

    let user = cli.user.or_else(|| config.user.clone());

    // Handle commands
    match cli.command {
        Command::Import(args) => {
            commands::execute_import(args, &mut store, user.as_deref(), &formatter)?;
        }
        Command::Build(args) => {
            let user = require_user(user.as_deref())?;
            commands::execute_build(args, &store, user, &config.graph, &formatter)?;
        }
        Command::Export(args) => {
            let user = require_user(user.as_deref())?;
            commands::execute_export(args, &store, user, &config.graph, &formatter)?;
        }
        Command::Report(args) => {
            let user = require_user(user.as_deref())?;
            commands::execute_report(args, &store, user, &config.graph, &formatter)?;
        }
        Command::Watch(args) => {
            let user = require_user(user.as_deref())?;
            commands::execute_watch(args, &store, user, &config.graph, &formatter).await?;
        }
    }

    Ok(())
}

/// Commands that graph one user's history need a user
fn require_user(user: Option<&str>) -> factgraph_cli::Result<&str> {
    user.ok_or(CliError::NoUser)
}
