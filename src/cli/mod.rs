use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ConfigLoader, PathOverrides};
use crate::storage;

pub mod commands;

use self::commands::ListArgs;

const LOG_FILE_NAME: &str = "gotion.log";

#[derive(Parser, Debug)]
#[command(
    name = "gotion",
    version,
    about = "Plain-file terminal notes kept in a local vault"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this file instead of the platform default
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the notes (defaults to ~/.gotion)
    #[arg(long)]
    pub vault_dir: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive TUI (default)
    Tui,
    /// Print every note in the vault with its last-modified time
    List(ListArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let loader = ConfigLoader::discover(PathOverrides {
        config_file: cli.config,
        vault_dir: cli.vault_dir,
    })?;
    let paths = loader.paths().clone();
    let log_file = match command {
        Commands::Tui => Some(paths.log_dir.join(LOG_FILE_NAME)),
        Commands::List(_) => None,
    };
    init_tracing(&cli.log_level, log_file.as_deref())
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;

    let config = Arc::new(loader.load()?);
    let store = storage::init(&config.vault_dir)?;
    tracing::debug!(vault = %store.root().display(), "vault ready");

    match command {
        Commands::Tui => commands::run_tui(config, store),
        Commands::List(args) => commands::list_notes(&store, args),
    }
}

/// Logs go to `log_file` when given (the TUI owns the terminal), stderr otherwise.
fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
        match log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("creating log directory {}", parent.display()))?;
                }
                let file = File::options()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening log file {}", path.display()))?;
                fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            None => {
                fmt()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
        Ok(())
    })
    .map(|_| ())
}
