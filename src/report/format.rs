//! Plain-text rendering of a cycle outcome.

use crate::app::pipeline::CycleOutcome;
use crate::domain::SeriesRole;
use crate::report::narrative;

const SPARK_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a value series as a fixed-width Unicode sparkline.
///
/// The series is bucketed down (or stretched) to `width` cells; each cell
/// shows the bucket mean scaled into the series' own [min,max] range. A flat
/// series renders at mid height.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    let cells = width.min(values.len()).max(1);
    let mut out = String::with_capacity(cells * 3);
    for cell in 0..cells {
        let lo = cell * values.len() / cells;
        let hi = ((cell + 1) * values.len() / cells).max(lo + 1);
        let bucket = &values[lo..hi];
        let mean = bucket.iter().sum::<f64>() / bucket.len() as f64;

        let level = if max == min {
            0.5
        } else {
            (mean - min) / (max - min)
        };
        let idx = ((level * (SPARK_BLOCKS.len() - 1) as f64).round() as usize)
            .min(SPARK_BLOCKS.len() - 1);
        out.push(SPARK_BLOCKS[idx]);
    }
    out
}

/// Format the indicator table plus the composite line.
pub fn format_score_table(outcome: &CycleOutcome) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<22} {:>12} {:>12} {:>7} {:>7}\n",
            "indicator", "current", "change", "score", "weight"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!("{:-<22} {:-<12} {:-<12} {:-<7} {:-<7}\n", "", "", "", "", "").trim_end(),
    );
    out.push('\n');

    for (role, result) in outcome.indicators.iter() {
        out.push_str(
            format!(
                "{:<22} {:>12} {:>12} {:>7.1} {:>7.2}\n",
                role.display_name(),
                role.format_value(result.current_value),
                fmt_signed(role, result.recent_change),
                result.score,
                role.weight(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str(&format!(
        "\nComposite: {:.1} — {}\n",
        outcome.composite,
        outcome.status.label()
    ));

    out
}

/// Format the full report: summary header, score table, sparklines, narrative.
pub fn format_cycle_summary(outcome: &CycleOutcome) -> String {
    let mut out = String::new();

    out.push_str("=== pulse — Macro Pulse ===\n");
    out.push_str(&format!("Source: {}\n", outcome.source.display_name()));
    out.push_str(&format!("As-of: {}\n", outcome.as_of));
    out.push('\n');
    out.push_str(&format_score_table(outcome));

    out.push_str("\nTrend (90d):\n");
    for (role, result) in outcome.indicators.iter() {
        let values: Vec<f64> = result.history.iter().map(|p| p.value).collect();
        out.push_str(&format!(
            "{:<22} {}\n",
            role.display_name(),
            sparkline(&values, 40)
        ));
    }

    out.push('\n');
    out.push_str(narrative::outlook(outcome.status));
    out.push('\n');
    out.push_str(&narrative::agreement_line(&outcome.agreement));
    out.push('\n');

    out
}

fn fmt_signed(role: SeriesRole, change: f64) -> String {
    let body = role.format_value(change.abs());
    if change < 0.0 {
        format!("-{body}")
    } else {
        format!("+{body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_cycle_with_bundle;
    use crate::data::sample::generate_bundle;
    use crate::domain::DataSource;

    fn outcome() -> CycleOutcome {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let bundle = generate_bundle(today);
        run_cycle_with_bundle(DataSource::Sample, &bundle).unwrap()
    }

    #[test]
    fn sparkline_uses_only_block_characters_at_requested_width() {
        let values: Vec<f64> = (0..90).map(|i| (i as f64 / 7.0).sin()).collect();
        let line = sparkline(&values, 40);
        assert_eq!(line.chars().count(), 40);
        assert!(line.chars().all(|c| SPARK_BLOCKS.contains(&c)));
    }

    #[test]
    fn flat_sparkline_sits_mid_height() {
        let line = sparkline(&[3.0; 20], 10);
        assert!(line.chars().all(|c| c == SPARK_BLOCKS[4]), "got: {line}");
    }

    #[test]
    fn short_series_does_not_stretch() {
        let line = sparkline(&[1.0, 2.0], 40);
        assert_eq!(line.chars().count(), 2);
        assert!(sparkline(&[], 40).is_empty());
    }

    #[test]
    fn score_table_names_every_indicator_and_the_band() {
        let outcome = outcome();
        let table = format_score_table(&outcome);
        for role in crate::domain::SeriesRole::ALL {
            assert!(table.contains(role.display_name()), "missing {role:?}");
        }
        assert!(table.contains(outcome.status.label()));
        assert!(table.contains("Composite:"));
    }

    #[test]
    fn summary_includes_source_sparklines_and_narrative() {
        let outcome = outcome();
        let summary = format_cycle_summary(&outcome);
        assert!(summary.contains("Source: sample"));
        assert!(summary.contains("As-of: 2025-06-03"));
        assert!(summary.contains("Trend (90d):"));
        assert!(summary.chars().any(|c| SPARK_BLOCKS.contains(&c)));
        // Narrative is always present, whatever the band.
        assert!(summary.len() > format_score_table(&outcome).len());
    }

    #[test]
    fn signed_changes_carry_their_sign() {
        let outcome = outcome();
        let table = format_score_table(&outcome);
        // Equity moved down in the fixed tail, oil moved up.
        assert!(table.contains("-") && table.contains("+"));
    }
}
