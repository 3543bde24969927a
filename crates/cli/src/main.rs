//! liftsync CLI - debounced autosave for the workout log page

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli_lib::cmd;
use cli_lib::cmd::run::RunArgs;
use cli_lib::{config, logging};
use std::path::PathBuf;

/// liftsync - Autosave workout log edits to the server
#[derive(Parser)]
#[command(name = "liftsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/liftsync/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach autosave to a page and replay an edit script
    Run {
        /// Page description (TOML)
        #[arg(long)]
        page: PathBuf,
        /// Edit script, one edit per line (default: stdin)
        #[arg(long)]
        events: Option<PathBuf>,
        /// Server base URL (overrides server.base_url)
        #[arg(long)]
        server: Option<String>,
        /// Debounce window in milliseconds (overrides debounce.window_ms)
        #[arg(long)]
        debounce_ms: Option<u64>,
        /// Drop saves still pending at end of input instead of sending them
        #[arg(long)]
        discard_pending: bool,
    },
    /// Show the ordinal scales used for select fields
    Scales {
        /// Scale name (default: all)
        name: Option<String>,
    },
    /// View or edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all values
    List,
    /// Print one value
    Get {
        key: String,
    },
    /// Set one value
    Set {
        key: String,
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an example config file
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_file_path().context("Could not determine config file path")?,
    };

    match cli.command {
        Commands::Run {
            page,
            events,
            server,
            debounce_ms,
            discard_pending,
        } => {
            let system_config = config::load(&config_path)?;
            let _guard = logging::init(&system_config.logging)?;
            let args = RunArgs {
                page,
                events,
                server,
                debounce_ms,
                discard_pending,
            };
            cmd::run::run(&system_config, args).await
        }
        Commands::Scales { name } => cmd::scales::run(name.as_deref()).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(&config_path).await,
            ConfigCommands::Get { key } => cmd::config::run_get(&config_path, &key).await,
            ConfigCommands::Set { key, value } => {
                cmd::config::run_set(&config_path, &key, &value).await
            }
            ConfigCommands::Path { create } => cmd::config::run_path(&config_path, create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
