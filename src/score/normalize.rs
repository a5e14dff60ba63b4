//! Raw-series normalization: parse, filter, and percentile-score one series.
//!
//! The two wire shapes go through the same scoring core but differ at the
//! edges:
//!
//! - observation shape: string values with a `"."` missing-data sentinel;
//!   fewer than two valid points degrades to a zero score instead of failing
//! - historical shape: numeric closes, newest-first on the wire, reversed to
//!   chronological before anything else; fewer than two bars is an error

use chrono::NaiveDate;

use crate::domain::{
    IndicatorResult, NormalizedPoint, RawHistoricalSeries, RawObservationSeries, RawSeries,
    SeriesRole,
};
use crate::error::AppError;

/// Parse an observation-shape value string once, at the boundary.
///
/// The sentinel (`"."`), empty strings, unparseable text, and non-finite
/// numbers all read as "no value here".
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_date(role: SeriesRole, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::malformed(role.upstream_id(), format!("invalid date '{raw}': {e}")))
}

/// Score a chronological list of valid points. Caller guarantees `len >= 2`.
///
/// latest/previous are taken by array adjacency after filtering; we do not
/// re-derive calendar adjacency, so a gap left by dropped sentinel points is
/// treated like any other day-over-day step.
fn score_points(role: SeriesRole, points: Vec<NormalizedPoint>) -> IndicatorResult {
    let latest = points[points.len() - 1].value;
    let previous = points[points.len() - 2].value;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in &points {
        min = min.min(p.value);
        max = max.max(p.value);
    }

    // Flat series: park at the midpoint rather than dividing by zero.
    let percentile = if max == min {
        0.5
    } else {
        (latest - min) / (max - min)
    };

    let score = if role.inverted() {
        (1.0 - percentile) * 100.0
    } else {
        percentile * 100.0
    };

    IndicatorResult {
        current_value: latest,
        recent_change: latest - previous,
        score,
        history: points,
    }
}

/// Normalize an observation-shape series into a scored indicator.
///
/// An absent `observations` container is structural and fails the cycle;
/// individual sentinel points are silently dropped. With fewer than two valid
/// points the result degrades to zeros, keeping whatever history exists.
pub fn normalize_observation(
    role: SeriesRole,
    series: &RawObservationSeries,
) -> Result<IndicatorResult, AppError> {
    let observations = series.observations.as_ref().ok_or_else(|| {
        AppError::malformed(role.upstream_id(), "response has no 'observations' field")
    })?;

    let mut points = Vec::with_capacity(observations.len());
    for obs in observations {
        let Some(value) = parse_value(&obs.value) else {
            continue;
        };
        points.push(NormalizedPoint {
            date: parse_date(role, &obs.date)?,
            value,
        });
    }

    if points.len() < 2 {
        return Ok(IndicatorResult {
            history: points,
            ..Default::default()
        });
    }

    Ok(score_points(role, points))
}

/// Normalize a historical-close series into a scored indicator.
///
/// Unlike the observation path there is no zero-score fallback: fewer than
/// two usable bars is an error. Bars arrive newest-first and are reversed to
/// chronological order before scoring.
pub fn normalize_historical(
    role: SeriesRole,
    series: &RawHistoricalSeries,
) -> Result<IndicatorResult, AppError> {
    let bars = series.historical.as_ref().ok_or_else(|| {
        AppError::malformed(role.upstream_id(), "response has no 'historical' field")
    })?;

    let mut points = Vec::with_capacity(bars.len());
    for bar in bars.iter().rev() {
        if !bar.close.is_finite() {
            continue;
        }
        points.push(NormalizedPoint {
            date: parse_date(role, &bar.date)?,
            value: bar.close,
        });
    }

    if points.len() < 2 {
        return Err(AppError::malformed(
            role.upstream_id(),
            format!("need at least 2 price bars, got {}", points.len()),
        ));
    }

    Ok(score_points(role, points))
}

/// Dispatch normalization on the wire shape.
pub fn normalize_series(role: SeriesRole, raw: &RawSeries) -> Result<IndicatorResult, AppError> {
    match raw {
        RawSeries::Observation(series) => normalize_observation(role, series),
        RawSeries::Historical(series) => normalize_historical(role, series),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawBar, RawObservation};

    fn obs_series(values: &[&str]) -> RawObservationSeries {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, v)| RawObservation {
                date: format!("2025-03-{:02}", i + 1),
                value: (*v).to_string(),
            })
            .collect();
        RawObservationSeries {
            observations: Some(observations),
        }
    }

    fn hist_series(closes: &[f64]) -> RawHistoricalSeries {
        // Newest first, matching the wire shape.
        let historical = closes
            .iter()
            .enumerate()
            .map(|(i, c)| RawBar {
                date: format!("2025-03-{:02}", closes.len() - i),
                close: *c,
            })
            .collect();
        RawHistoricalSeries {
            historical: Some(historical),
        }
    }

    #[test]
    fn parse_value_table() {
        assert_eq!(parse_value("1.25"), Some(1.25));
        assert_eq!(parse_value(" 1.25 "), Some(1.25));
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("   "), None);
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("-0.5"), Some(-0.5));
    }

    #[test]
    fn score_stays_within_bounds_and_history_brackets_current() {
        let series = obs_series(&["3.0", "1.0", "4.0", "1.5", "2.6"]);
        let result = normalize_observation(SeriesRole::YieldCurve, &series).unwrap();

        assert!(result.score >= 0.0 && result.score <= 100.0);
        let min = result
            .history
            .iter()
            .map(|p| p.value)
            .fold(f64::INFINITY, f64::min);
        let max = result
            .history
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(min <= result.current_value && result.current_value <= max);
        assert!((result.current_value - 2.6).abs() < 1e-12);
        assert!((result.recent_change - 1.1).abs() < 1e-12);
    }

    #[test]
    fn flat_series_scores_fifty_regardless_of_inversion() {
        let series = obs_series(&["7.0", "7.0", "7.0"]);
        let plain = normalize_observation(SeriesRole::OilPrice, &series).unwrap();
        let inverted = normalize_observation(SeriesRole::VolatilityIndex, &series).unwrap();
        assert_eq!(plain.score, 50.0);
        assert_eq!(inverted.score, 50.0);
    }

    #[test]
    fn inversion_reflects_the_score() {
        let series = obs_series(&["10.0", "30.0", "18.0", "25.0"]);
        // Same data through a non-inverted and an inverted role: identical
        // latest/min/max, so the scores must mirror around 50.
        let plain = normalize_observation(SeriesRole::EquityIndex, &series).unwrap();
        let inverted = normalize_observation(SeriesRole::JoblessClaims, &series).unwrap();
        assert!((plain.score + inverted.score - 100.0).abs() < 1e-9);
        assert!((plain.score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn sentinel_points_are_dropped_and_adjacency_is_positional() {
        // The "." between 2.0 and 3.0 is dropped; recent_change compares the
        // surviving neighbors as if adjacent.
        let series = obs_series(&["1.0", "2.0", ".", "3.0"]);
        let result = normalize_observation(SeriesRole::YieldCurve, &series).unwrap();
        assert_eq!(result.history.len(), 3);
        assert!((result.recent_change - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_valid_observation_degrades_to_zeros() {
        let series = obs_series(&[".", "5.0", "."]);
        let result = normalize_observation(SeriesRole::JoblessClaims, &series).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.current_value, 0.0);
        assert_eq!(result.recent_change, 0.0);
        assert_eq!(result.history.len(), 1);
        assert!((result.history[0].value - 5.0).abs() < 1e-12);
    }

    #[test]
    fn all_sentinel_observation_degrades_to_zeros_with_empty_history() {
        let series = obs_series(&[".", ".", "."]);
        let result = normalize_observation(SeriesRole::VolatilityIndex, &series).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn missing_observation_container_is_structural() {
        let series = RawObservationSeries { observations: None };
        let err = normalize_observation(SeriesRole::YieldCurve, &series).unwrap_err();
        assert!(matches!(err, AppError::MalformedSeries { .. }));
    }

    #[test]
    fn bad_observation_date_is_structural() {
        let series = RawObservationSeries {
            observations: Some(vec![RawObservation {
                date: "03/01/2025".into(),
                value: "1.0".into(),
            }]),
        };
        let err = normalize_observation(SeriesRole::YieldCurve, &series).unwrap_err();
        assert!(matches!(err, AppError::MalformedSeries { .. }));
    }

    #[test]
    fn historical_bars_are_reversed_before_scoring() {
        // Wire order is newest first: today 5510.40, yesterday 5525.60.
        let series = hist_series(&[5510.40, 5525.60]);
        let result = normalize_historical(SeriesRole::EquityIndex, &series).unwrap();
        assert!((result.current_value - 5510.40).abs() < 1e-9);
        assert!((result.recent_change + 15.20).abs() < 1e-9);
        // History ends up chronological.
        assert!(result.history[0].date < result.history[1].date);
    }

    #[test]
    fn short_historical_series_is_an_error() {
        let series = hist_series(&[5510.40]);
        let err = normalize_historical(SeriesRole::EquityIndex, &series).unwrap_err();
        assert!(matches!(err, AppError::MalformedSeries { .. }));

        let empty = RawHistoricalSeries { historical: None };
        let err = normalize_historical(SeriesRole::OilPrice, &empty).unwrap_err();
        assert!(matches!(err, AppError::MalformedSeries { .. }));
    }

    #[test]
    fn dispatch_follows_the_variant() {
        let obs = RawSeries::Observation(obs_series(&["1.0", "2.0"]));
        assert!(normalize_series(SeriesRole::YieldCurve, &obs).is_ok());

        let hist = RawSeries::Historical(hist_series(&[2.0, 1.0]));
        assert!(normalize_series(SeriesRole::OilPrice, &hist).is_ok());
    }
}
