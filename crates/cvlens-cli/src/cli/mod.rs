//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cvlens_core::config::{self, Config};
use cvlens_core::logging;
use cvlens_core::service::CredentialMode;

mod commands;

#[derive(Parser)]
#[command(name = "cvlens")]
#[command(version)]
#[command(about = "Resume analysis from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the analysis service (overrides config and CVLENS_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
}

/// Credentials for `login` and `register`.
#[derive(clap::Args, Debug, Clone)]
struct CredentialArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, conflicts_with = "password_stdin")]
    password: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long = "password-stdin")]
    password_stdin: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login(CredentialArgs),

    /// Create an account and store the session token
    Register(CredentialArgs),

    /// Remove the stored session token
    Logout,

    /// Show the user behind the stored session
    Whoami,

    /// Analyze a resume (PDF, max 10MB)
    Analyze {
        /// Path to the resume
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the analysis service is reachable
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(url) = cli.base_url.as_deref() {
        config.base_url = url.trim().to_string();
    }

    // default to the interactive session
    let Some(command) = cli.command else {
        let _guard = logging::init_file(&config::paths::logs_dir(), &config.log.level)?;
        tracing::info!(base_url = config.base_url(), "starting interactive session");
        return cvlens_tui::run_interactive(&config);
    };

    logging::init_stderr(&config.log.level)?;

    match command {
        Commands::Login(args) => commands::auth::submit(&config, CredentialMode::Login, args).await,
        Commands::Register(args) => {
            commands::auth::submit(&config, CredentialMode::Register, args).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => commands::auth::whoami(&config).await,
        Commands::Analyze { file, json } => commands::analyze::run(&config, &file, json).await,
        Commands::Health => commands::health::run(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
