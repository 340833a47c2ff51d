//! Binary entry point for haven.
//!
//! This binary provides the interactive chat and a few maintenance commands.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use commands::KbAction;
use haven::config::HavenConfig;
use haven::io::Format;
use haven::observability::{self, LoggingConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Haven - a rule-based support chatbot.
#[derive(Parser)]
#[command(name = "haven")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive chat (default).
    Chat,

    /// Seed the resource table if it is empty.
    Seed,

    /// Answer one message and exit.
    Ask {
        /// The message.
        text: String,

        /// Print the reply as JSON, including where it came from.
        #[arg(long)]
        json: bool,

        /// Use an in-memory log instead of the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// List help resources or pick one.
    Resources {
        /// Only this category.
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Pick one at random instead of listing.
        #[arg(short, long)]
        suggest: bool,
    },

    /// Show emergency helplines.
    Emergency,

    /// Show recent conversation turns.
    History {
        /// Maximum number of turns.
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output format: table, json, csv, or yaml.
        #[arg(short, long, default_value = "table")]
        format: Format,
    },

    /// Manage the knowledge base.
    Kb {
        #[command(subcommand)]
        action: KbAction,
    },

    /// Show paths and counts.
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let command = cli.command.unwrap_or(Commands::Chat);

    let mut logging = LoggingConfig::from_settings(&config.logging, cli.verbose);
    if matches!(command, Commands::Chat) {
        logging = logging.with_default_file(config.default_log_file());
    }
    if let Err(e) = observability::init(logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(
    command: Commands,
    config: HavenConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = match command {
        Commands::Chat => commands::cmd_chat(&config).await,
        Commands::Seed => commands::cmd_seed(&config),
        Commands::Ask {
            text,
            json,
            dry_run,
        } => commands::cmd_ask(&config, &text, json, dry_run),
        Commands::Resources { category, suggest } => {
            commands::cmd_resources(&config, category.as_deref(), suggest)
        },
        Commands::Emergency => commands::cmd_emergency(&config),
        Commands::History { limit, format } => commands::cmd_history(&config, limit, format),
        Commands::Kb { action } => commands::cmd_kb(&config, action),
        Commands::Status => commands::cmd_status(&config),
    };
    result.map_err(Into::into)
}

/// Loads configuration from `--config`, `HAVEN_CONFIG_PATH`, or the default
/// location, then applies environment overrides.
fn load_config(path: Option<&Path>) -> Result<HavenConfig, Box<dyn std::error::Error>> {
    let config = if let Some(config_path) = path {
        HavenConfig::load_from_file(config_path)?
    } else if let Some(config_path) = std::env::var("HAVEN_CONFIG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
    {
        HavenConfig::load_from_file(Path::new(&config_path))?
    } else {
        HavenConfig::load_default()
    };

    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}
