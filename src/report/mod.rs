//! Formatted terminal output for one-shot commands.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;
pub mod narrative;

pub use format::{format_cycle_summary, format_score_table, sparkline};
