//! Command-line parsing for the macro dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the ingestion/scoring code.

use clap::{Parser, Subcommand};

use crate::domain::DataSource;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Macro Pulse — five-indicator economic health dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default when no subcommand is given).
    Dash(SourceArgs),
    /// Print the full cycle as a plain-text report.
    Report(SourceArgs),
    /// Print the indicator score table only (useful for scripting).
    Score(SourceArgs),
}

/// Options shared by every command.
#[derive(Debug, Parser, Clone)]
pub struct SourceArgs {
    /// Data source for the cycle. Sample mode needs no network or API keys.
    #[arg(short = 's', long, value_enum, default_value_t = DataSource::Sample)]
    pub source: DataSource,
}
