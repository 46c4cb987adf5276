// ABOUTME: Entry point for the ananeo CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use ananeo::config::{self, EngineConfig};
use ananeo::error::Result;
use ananeo::output::{Output, OutputMode};
use ananeo::runtime::RegistryAuth;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(match cli.output {
        OutputFormat::Normal => OutputMode::Normal,
        OutputFormat::Quiet => OutputMode::Quiet,
        OutputFormat::Json => OutputMode::Json,
    });

    match cli.command {
        Commands::Init {
            registry_prefix,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, registry_prefix.as_deref(), force)
        }
        Commands::Activate {
            version,
            registry_user,
            registry_password,
        } => {
            let config = discover_config()?;
            let auth = registry_auth(registry_user, registry_password);
            commands::activate(config, version, auth, output).await
        }
        Commands::Update {
            version,
            registry_user,
            registry_password,
        } => {
            let config = discover_config()?;
            let auth = registry_auth(registry_user, registry_password);
            commands::update(config, version, auth, output).await
        }
        Commands::Status => {
            let config = discover_config()?;
            commands::status(config, output).await
        }
    }
}

fn discover_config() -> Result<EngineConfig> {
    let cwd = env::current_dir()?;
    EngineConfig::discover(&cwd)
}

fn registry_auth(user: Option<String>, password: Option<String>) -> Option<RegistryAuth> {
    match (user, password) {
        (Some(username), Some(password)) => Some(RegistryAuth {
            username,
            password,
            server: None,
        }),
        _ => None,
    }
}
