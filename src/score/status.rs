//! Composite classification: status band and trend agreement.

use crate::domain::{IndicatorSet, SeriesRole, StatusBand, TrendAgreement};

/// Regime boundary: at or above this the composite reads expansionary.
const EXPANSION_THRESHOLD: f64 = 45.0;

/// Classify the composite into one of four bands.
///
/// Thresholds are evaluated ascending with half-open bounds: exactly 25 lands
/// in the slowdown band, exactly 45 in moderate expansion, exactly 65 in
/// strong expansion.
pub fn classify_status(composite: f64) -> StatusBand {
    if composite < 25.0 {
        StatusBand::HighRecessionRisk
    } else if composite < EXPANSION_THRESHOLD {
        StatusBand::EconomicSlowdown
    } else if composite < 65.0 {
        StatusBand::ModerateExpansion
    } else {
        StatusBand::StrongExpansion
    }
}

/// Split the indicators into those confirming the composite's direction and
/// those contradicting it.
///
/// An indicator's signal is positive when its score beats 50 in its favorable
/// direction (below 50 for inverted roles, above 50 otherwise). Strict
/// comparisons both ways mean a score of exactly 50 carries no signal and
/// lands in neither list.
pub fn classify_trend_agreement(composite: f64, indicators: &IndicatorSet) -> TrendAgreement {
    let expansionary = composite >= EXPANSION_THRESHOLD;

    let mut agreement = TrendAgreement::default();
    for role in SeriesRole::ALL {
        let score = indicators.get(role).score;
        let positive = if role.inverted() {
            score < 50.0
        } else {
            score > 50.0
        };
        let negative = if role.inverted() {
            score > 50.0
        } else {
            score < 50.0
        };

        let confirming = if expansionary { positive } else { negative };
        let contradicting = if expansionary { negative } else { positive };

        if confirming {
            agreement.confirming.push(role);
        } else if contradicting {
            agreement.contradicting.push(role);
        }
    }

    agreement
}
