//! Narrative text for the dashboard: a fixed outlook paragraph per status
//! band plus a generated one-line trend-agreement summary.

use crate::domain::{StatusBand, TrendAgreement};

/// Fixed outlook paragraph for a status band.
pub fn outlook(band: StatusBand) -> &'static str {
    match band {
        StatusBand::HighRecessionRisk => {
            "Outlook: conditions are consistent with a high risk of recession. \
             Leading indicators are deteriorating together, and historical \
             episodes with this profile have usually preceded contractions in \
             output and employment."
        }
        StatusBand::EconomicSlowdown => {
            "Outlook: momentum is fading. The composite sits below its \
             expansionary range, which typically reflects softening labor \
             demand and defensive positioning in markets rather than outright \
             contraction."
        }
        StatusBand::ModerateExpansion => {
            "Outlook: the economy is expanding at a moderate pace. Most \
             indicators are in healthy territory, though the mix suggests \
             growth closer to trend than to boom conditions."
        }
        StatusBand::StrongExpansion => {
            "Outlook: conditions are firmly expansionary. Labor, markets, and \
             rates indicators are aligned at supportive levels; the usual \
             risks at this stage are overheating and policy tightening."
        }
    }
}

/// One-line summary naming which indicators back the composite's direction.
pub fn agreement_line(agreement: &TrendAgreement) -> String {
    let names = |roles: &[crate::domain::SeriesRole]| -> String {
        if roles.is_empty() {
            "none".to_string()
        } else {
            roles
                .iter()
                .map(|r| r.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        }
    };

    format!(
        "Confirming the trend: {}. Contradicting: {}.",
        names(&agreement.confirming),
        names(&agreement.contradicting)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesRole;

    #[test]
    fn every_band_has_an_outlook() {
        for band in [
            StatusBand::HighRecessionRisk,
            StatusBand::EconomicSlowdown,
            StatusBand::ModerateExpansion,
            StatusBand::StrongExpansion,
        ] {
            assert!(outlook(band).starts_with("Outlook:"));
        }
    }

    #[test]
    fn agreement_line_names_roles_or_says_none() {
        let agreement = TrendAgreement {
            confirming: vec![SeriesRole::YieldCurve, SeriesRole::OilPrice],
            contradicting: vec![],
        };
        let line = agreement_line(&agreement);
        assert!(line.contains("Yield Curve"));
        assert!(line.contains("Oil Price"));
        assert!(line.contains("Contradicting: none."));
    }
}
