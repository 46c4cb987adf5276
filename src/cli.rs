// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ananeo")]
#[command(about = "In-place activation and version updates for a containerized engine")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Normal)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Normal,
    Quiet,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Normal => "normal",
            OutputFormat::Quiet => "quiet",
            OutputFormat::Json => "json",
        };
        write!(f, "{name}")
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new ananeo.yml configuration file
    Init {
        /// Registry prefix to seed the template with
        #[arg(long)]
        registry_prefix: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Activate the engine at a version (performs first activation if needed)
    Activate {
        /// Version to activate (falls back to `version` in ananeo.yml)
        #[arg(long)]
        version: Option<String>,

        /// Registry username for authenticated pulls
        #[arg(long)]
        registry_user: Option<String>,

        /// Registry password or token for authenticated pulls
        #[arg(long)]
        registry_password: Option<String>,
    },

    /// Update the engine to a new version in place
    Update {
        /// Version to update to (falls back to `version` in ananeo.yml)
        #[arg(long)]
        version: Option<String>,

        /// Registry username for authenticated pulls
        #[arg(long)]
        registry_user: Option<String>,

        /// Registry password or token for authenticated pulls
        #[arg(long)]
        registry_password: Option<String>,
    },

    /// Show the managed engine container and its current version
    Status,
}
