//! Shared cycle logic used by both the CLI commands and the TUI.
//!
//! One cycle is: fetch bundle -> normalize each series -> composite ->
//! classify. The outcome is a single immutable value; nothing is mutated
//! incrementally and a failed cycle produces no partial output.

use chrono::NaiveDate;

use crate::data;
use crate::domain::{DataSource, IndicatorSet, RawBundle, StatusBand, TrendAgreement};
use crate::error::AppError;
use crate::score;

/// Everything one successful cycle computes.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub source: DataSource,
    /// Latest observation date across the five histories.
    pub as_of: NaiveDate,
    pub indicators: IndicatorSet,
    pub composite: f64,
    pub status: StatusBand,
    pub agreement: TrendAgreement,
}

/// Execute a full cycle for the given source.
pub fn run_cycle(source: DataSource) -> Result<CycleOutcome, AppError> {
    let today = chrono::Local::now().date_naive();
    let bundle = data::fetch_bundle(source, today)?;
    run_cycle_with_bundle(source, &bundle)
}

/// Execute the scoring half of a cycle on a pre-fetched bundle.
///
/// Split out so tests (and a future cached mode) can drive the engine without
/// touching ingestion.
pub fn run_cycle_with_bundle(
    source: DataSource,
    bundle: &RawBundle,
) -> Result<CycleOutcome, AppError> {
    let mut pairs = Vec::with_capacity(bundle.len());
    for (role, raw) in bundle {
        pairs.push((*role, score::normalize_series(*role, raw)?));
    }
    let indicators = IndicatorSet::from_pairs(pairs)?;

    let composite = score::composite_index(&indicators);
    let status = score::classify_status(composite);
    let agreement = score::classify_trend_agreement(composite, &indicators);

    let as_of = indicators
        .iter()
        .filter_map(|(_, result)| result.history.last().map(|p| p.date))
        .max()
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    Ok(CycleOutcome {
        source,
        as_of,
        indicators,
        composite,
        status,
        agreement,
    })
}
