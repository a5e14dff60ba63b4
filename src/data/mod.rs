//! Series ingestion: sample synthesis and live provider clients.
//!
//! Both paths produce the same `RawBundle` shape so the scoring engine never
//! knows (or cares) where a cycle's data came from.

use chrono::NaiveDate;

use crate::domain::{DataSource, RawBundle};
use crate::error::AppError;

pub mod fred;
pub mod live;
pub mod markets;
pub mod sample;

pub use fred::FredClient;
pub use markets::MarketClient;

/// Produce the five role-tagged raw series for one cycle.
pub fn fetch_bundle(source: DataSource, today: NaiveDate) -> Result<RawBundle, AppError> {
    match source {
        DataSource::Sample => Ok(sample::generate_bundle(today)),
        DataSource::Live => live::fetch_live_bundle(today),
    }
}

/// Map a non-success upstream HTTP status to the right error kind.
///
/// 401/403 get their own variant with an actionable message; everything else
/// keeps the status code and response body for diagnosis.
pub(crate) fn upstream_error(series: &str, status: u16, body: String) -> AppError {
    if status == 401 || status == 403 {
        AppError::UpstreamAuth {
            series: series.to_string(),
            status,
        }
    } else {
        AppError::UpstreamRequest {
            series: series.to_string(),
            status,
            body,
        }
    }
}
