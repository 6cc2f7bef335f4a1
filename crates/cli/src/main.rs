//! fieldcheck CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

mod cmd;
mod logging;
mod render;
mod system_config;

use cmd::check::CheckArgs;
use cmd::simulate::{Responder, SimulateArgs};

/// fieldcheck - Debounced field availability checks
#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a field against the backend, one stdin line per keystroke
    Check {
        /// Field name (e.g. username, email)
        field: String,
        /// Endpoint path (default: /api/user/check/<field>)
        #[arg(long)]
        path: Option<String>,
        /// Query parameter name (default: <field>)
        #[arg(long)]
        param: Option<String>,
        /// Backend origin (default: from config)
        #[arg(long)]
        base_url: Option<String>,
        /// Debounce delay in milliseconds (default: from config)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// How long to wait for the last check after input ends
        #[arg(long, default_value = "10000")]
        wait_ms: u64,
    },
    /// Replay a scripted typing session against a local check
    Simulate {
        /// Script of `value@ms` steps, e.g. "ab@0,abc@40"
        #[arg(long)]
        keys: String,
        /// Text the check answers with
        #[arg(long, default_value = "用户名可用", conflicts_with = "fail")]
        reply: String,
        /// Make the check fail with this message instead
        #[arg(long)]
        fail: Option<String>,
        /// Latency of the check itself
        #[arg(long, default_value = "10")]
        latency_ms: u64,
        /// Debounce delay in milliseconds (default: from config)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Print a JSON report instead of live output
        #[arg(long)]
        json: bool,
    },
    /// View and edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a single value
    Get {
        /// Key, e.g. controller.delay_ms
        key: String,
    },
    /// Set a single value
    Set {
        /// Key, e.g. controller.delay_ms
        key: String,
        /// New value
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example configuration
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Check { field, path, param, base_url, delay_ms, wait_ms } => {
            cmd::check::run(CheckArgs {
                field,
                path,
                param,
                base_url,
                delay_ms,
                wait: Duration::from_millis(wait_ms),
            })
            .await
        }
        Commands::Simulate { keys, reply, fail, latency_ms, delay_ms, json } => {
            let responder = match fail {
                Some(message) => Responder::Fail(message),
                None => Responder::Reply(reply),
            };
            cmd::simulate::run(SimulateArgs {
                keys,
                responder,
                latency: Duration::from_millis(latency_ms),
                delay_ms,
                json,
            })
            .await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list().await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
