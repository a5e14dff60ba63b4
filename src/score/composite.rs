//! Weighted composite aggregation.

use crate::domain::{IndicatorSet, SeriesRole};

/// Weighted sum of the five indicator scores, in [0,100].
///
/// No renormalization happens here: `IndicatorSet` guarantees all five roles
/// are present, so the fixed weights always apply in full.
pub fn composite_index(indicators: &IndicatorSet) -> f64 {
    SeriesRole::ALL
        .iter()
        .map(|&role| indicators.get(role).score * role.weight())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IndicatorResult;

    fn set_with_scores(scores: [f64; 5]) -> IndicatorSet {
        let pairs = SeriesRole::ALL
            .iter()
            .zip(scores)
            .map(|(&role, score)| {
                (
                    role,
                    IndicatorResult {
                        score,
                        ..Default::default()
                    },
                )
            })
            .collect();
        IndicatorSet::from_pairs(pairs).unwrap()
    }

    #[test]
    fn extremes_map_to_extremes() {
        assert!((composite_index(&set_with_scores([100.0; 5])) - 100.0).abs() < 1e-9);
        assert!(composite_index(&set_with_scores([0.0; 5])).abs() < 1e-12);
    }

    #[test]
    fn composite_is_order_independent() {
        let scores = [62.0, 48.5, 33.0, 71.0, 55.5];
        let forward: Vec<_> = SeriesRole::ALL
            .iter()
            .zip(scores)
            .map(|(&role, score)| {
                (
                    role,
                    IndicatorResult {
                        score,
                        ..Default::default()
                    },
                )
            })
            .collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = composite_index(&IndicatorSet::from_pairs(forward).unwrap());
        let b = composite_index(&IndicatorSet::from_pairs(backward).unwrap());
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn weights_are_applied_per_role() {
        // Only the yield curve scores; composite must be exactly its weight share.
        let composite = composite_index(&set_with_scores([100.0, 0.0, 0.0, 0.0, 0.0]));
        assert!((composite - 30.0).abs() < 1e-9);

        let composite = composite_index(&set_with_scores([0.0, 100.0, 0.0, 0.0, 0.0]));
        assert!((composite - 25.0).abs() < 1e-9);
    }
}
