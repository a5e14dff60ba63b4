//! Live ingestion: fan out the five provider requests and join them.

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;

use crate::data::{FredClient, MarketClient};
use crate::domain::{RawBundle, RawSeries, SeriesRole};
use crate::error::AppError;

/// Trailing window covered by a live fetch.
const LOOKBACK_DAYS: i64 = 5 * 365;

/// Fetch all five raw series concurrently.
///
/// This is an all-or-nothing barrier: collecting into `Result` means every
/// request completes (or fails) before the bundle exists, and the first error
/// aborts the cycle. A partial bundle can never reach the scoring engine.
pub fn fetch_live_bundle(today: NaiveDate) -> Result<RawBundle, AppError> {
    let fred = FredClient::from_env()?;
    let markets = MarketClient::from_env()?;
    let start = today - Duration::days(LOOKBACK_DAYS);

    SeriesRole::ALL
        .par_iter()
        .map(|&role| {
            let raw = if role.is_observation() {
                RawSeries::Observation(fred.fetch_observations(role, start)?)
            } else {
                RawSeries::Historical(markets.fetch_history(role, start, today)?)
            };
            Ok((role, raw))
        })
        .collect::<Result<RawBundle, AppError>>()
}
