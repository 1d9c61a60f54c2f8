//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use taskbind_core::config::{load_config, load_config_or_default, Config};

use commands::{ApplyCommand, InitCommand, TypesCommand, ValidateCommand};

/// Taskbind - bind pipeline resources to task specs
#[derive(Debug, Parser)]
#[command(name = "taskbind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (searched for from the working directory if omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new Taskbind configuration
    Init(InitCommand),

    /// Apply resource modifiers to a task spec
    Apply(ApplyCommand),

    /// Validate the resources a task spec declares
    Validate(ValidateCommand),

    /// List known resource types
    Types(TypesCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> anyhow::Result<i32> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Apply(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Types(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the explicit config file, or search for one and fall back to defaults.
    ///
    /// Returns the config together with the directory relative paths in it
    /// resolve against.
    pub fn load_config(&self) -> taskbind_core::Result<(Config, Option<PathBuf>)> {
        match &self.config {
            Some(path) => {
                let config = load_config(path)?;
                Ok((config, Some(config_dir(path))))
            }
            None => {
                let cwd = std::env::current_dir()?;
                let (config, path) = load_config_or_default(&cwd);
                debug!(found = path.is_some(), "configuration resolved");
                Ok((config, path.as_deref().map(config_dir)))
            }
        }
    }
}

fn config_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
