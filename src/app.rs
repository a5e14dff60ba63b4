//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs an ingest/score cycle
//! - dispatches to the TUI or the text reports

use clap::Parser;

use crate::cli::{Command, SourceArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `pulse` binary.
pub fn run() -> Result<(), AppError> {
    // We want `pulse` and `pulse -s live` to behave like `pulse dash ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Dash(args) => crate::tui::run(args.source),
        Command::Report(args) => handle_report(args),
        Command::Score(args) => handle_score(args),
    }
}

fn handle_report(args: SourceArgs) -> Result<(), AppError> {
    let outcome = pipeline::run_cycle(args.source)?;
    println!("{}", crate::report::format_cycle_summary(&outcome));
    Ok(())
}

fn handle_score(args: SourceArgs) -> Result<(), AppError> {
    let outcome = pipeline::run_cycle(args.source)?;
    println!("{}", crate::report::format_score_table(&outcome));
    Ok(())
}

/// Rewrite argv so `pulse` defaults to `pulse dash`.
///
/// Rules:
/// - `pulse`                     -> `pulse dash`
/// - `pulse -s live ...`         -> `pulse dash -s live ...`
/// - `pulse --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("dash".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "dash" | "report" | "score");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "dash flags".
    if arg1.starts_with('-') {
        argv.insert(1, "dash".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_dash() {
        assert_eq!(rewrite_args(args(&["pulse"])), args(&["pulse", "dash"]));
    }

    #[test]
    fn leading_flag_is_routed_to_dash() {
        assert_eq!(
            rewrite_args(args(&["pulse", "-s", "live"])),
            args(&["pulse", "dash", "-s", "live"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["pulse", "report"])),
            args(&["pulse", "report"])
        );
        assert_eq!(
            rewrite_args(args(&["pulse", "--help"])),
            args(&["pulse", "--help"])
        );
    }
}
