//! Command-line interface for gradekeeper
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing and keeps each command in its own
//! module under `commands/`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod output;

pub use output::Output;

use crate::config::GradekeeperConfig;

/// Gradekeeper - student records with a concurrent batch report engine
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate reports for all records across a worker pool
    Report(commands::report::ReportArgs),
    /// Access cache management
    #[command(subcommand)]
    Cache(CacheCommands),
    /// Record listing
    #[command(subcommand)]
    Records(RecordsCommands),
    /// Show version information
    Version,
}

/// Cache management subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache statistics
    Stats,
    /// Sweep stale entries and re-warm the hot set
    Refresh,
    /// Drop all entries and reset the counters
    Clear,
}

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordsCommands {
    /// List all loaded records with their averages
    List,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);
        let config = GradekeeperConfig::load_with_custom_config(self.config.as_deref())?;

        match self.command {
            Some(Commands::Report(args)) => {
                commands::report::execute(args, &config, &output).await
            }
            Some(Commands::Cache(cmd)) => commands::cache::execute(cmd, &config, &output).await,
            Some(Commands::Records(cmd)) => {
                commands::records::execute(cmd, &config, &output).await
            }
            Some(Commands::Version) => commands::version::execute(&output).await,
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
