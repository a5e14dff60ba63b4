//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during scoring
//! - decoded straight from provider JSON
//! - consumed by both the TUI and the plain-text report

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::AppError;

/// Where a cycle gets its raw series from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    /// Deterministic synthetic data; no network, no API keys.
    Sample,
    /// Real provider data over HTTP (requires API keys in the environment).
    Live,
}

impl DataSource {
    pub fn display_name(self) -> &'static str {
        match self {
            DataSource::Sample => "sample",
            DataSource::Live => "live",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DataSource::Sample => DataSource::Live,
            DataSource::Live => DataSource::Sample,
        }
    }
}

// clap renders the default value through Display.
impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The five indicator roles that make up the composite.
///
/// The discriminant order is the canonical display/iteration order and must
/// match `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesRole {
    YieldCurve,
    JoblessClaims,
    VolatilityIndex,
    EquityIndex,
    OilPrice,
}

impl SeriesRole {
    pub const ALL: [SeriesRole; 5] = [
        SeriesRole::YieldCurve,
        SeriesRole::JoblessClaims,
        SeriesRole::VolatilityIndex,
        SeriesRole::EquityIndex,
        SeriesRole::OilPrice,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SeriesRole::YieldCurve => "Yield Curve (10y-2y)",
            SeriesRole::JoblessClaims => "Jobless Claims",
            SeriesRole::VolatilityIndex => "Volatility Index",
            SeriesRole::EquityIndex => "Equity Index",
            SeriesRole::OilPrice => "Oil Price",
        }
    }

    /// Weight of this role in the composite. The five weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            SeriesRole::YieldCurve => 0.30,
            SeriesRole::JoblessClaims => 0.25,
            SeriesRole::VolatilityIndex => 0.15,
            SeriesRole::EquityIndex => 0.20,
            SeriesRole::OilPrice => 0.10,
        }
    }

    /// Whether a lower raw value is economically favorable for this role.
    ///
    /// Inverted roles get their percentile rank reflected (100 - p) so that a
    /// high score always reads "good" on the dashboard.
    pub fn inverted(self) -> bool {
        matches!(self, SeriesRole::JoblessClaims | SeriesRole::VolatilityIndex)
    }

    /// FRED series identifier for observation-shaped roles.
    pub fn fred_series_id(self) -> Option<&'static str> {
        match self {
            SeriesRole::YieldCurve => Some("T10Y2Y"),
            SeriesRole::JoblessClaims => Some("ICSA"),
            SeriesRole::VolatilityIndex => Some("VIXCLS"),
            SeriesRole::EquityIndex | SeriesRole::OilPrice => None,
        }
    }

    /// Market-data symbol for historical-shaped roles.
    pub fn market_symbol(self) -> Option<&'static str> {
        match self {
            SeriesRole::EquityIndex => Some("^GSPC"),
            SeriesRole::OilPrice => Some("CLUSD"),
            _ => None,
        }
    }

    /// True when this role arrives in observation shape (date + string value),
    /// false when it arrives in historical-close shape.
    pub fn is_observation(self) -> bool {
        self.fred_series_id().is_some()
    }

    /// Upstream identifier used in error messages.
    pub fn upstream_id(self) -> &'static str {
        match self {
            SeriesRole::YieldCurve => "T10Y2Y",
            SeriesRole::JoblessClaims => "ICSA",
            SeriesRole::VolatilityIndex => "VIXCLS",
            SeriesRole::EquityIndex => "^GSPC",
            SeriesRole::OilPrice => "CLUSD",
        }
    }

    /// Format a raw value for display, with per-role precision.
    pub fn format_value(self, v: f64) -> String {
        match self {
            SeriesRole::YieldCurve => format!("{v:.2}%"),
            SeriesRole::JoblessClaims => format!("{v:.0}"),
            SeriesRole::VolatilityIndex => format!("{v:.1}"),
            SeriesRole::EquityIndex => format!("{v:.2}"),
            SeriesRole::OilPrice => format!("${v:.2}"),
        }
    }
}

/// One raw point of an observation-shaped series.
///
/// `value` is string-encoded on the wire and may be the missing-data sentinel
/// (`"."`) instead of a number.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: String,
}

/// Observation-shaped wire payload.
///
/// The container is `Option` so a payload missing the field entirely still
/// deserializes; normalization rejects it with a structural error, which is
/// distinct from individual sentinel points (those are just dropped).
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservationSeries {
    pub observations: Option<Vec<RawObservation>>,
}

/// One raw bar of a historical-close series.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBar {
    pub date: String,
    pub close: f64,
}

/// Historical-close wire payload, ordered newest-to-oldest as received.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHistoricalSeries {
    pub historical: Option<Vec<RawBar>>,
}

/// Tagged union over the two raw wire shapes; normalization dispatches on the
/// variant instead of duck-typing each payload.
#[derive(Debug, Clone)]
pub enum RawSeries {
    Observation(RawObservationSeries),
    Historical(RawHistoricalSeries),
}

/// Exactly five role-tagged raw series, one per `SeriesRole`.
pub type RawBundle = Vec<(SeriesRole, RawSeries)>;

/// A parsed, chronological series point. `value` is always finite; points
/// whose raw value was the sentinel are dropped, never substituted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Scored output for a single indicator.
///
/// `score` is meaningful only when `history` has at least two valid points;
/// below that, all numeric fields are zero and only the history is kept.
#[derive(Debug, Clone, Default)]
pub struct IndicatorResult {
    pub current_value: f64,
    pub recent_change: f64,
    /// Percentile rank of the current value within its own history, in [0,100].
    pub score: f64,
    pub history: Vec<NormalizedPoint>,
}

/// The five scored indicators, complete by construction.
///
/// Holding one named field per role (rather than a map) makes "all five roles
/// present" a type-level guarantee, so the composite can never silently sum a
/// partial set.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub yield_curve: IndicatorResult,
    pub jobless_claims: IndicatorResult,
    pub volatility_index: IndicatorResult,
    pub equity_index: IndicatorResult,
    pub oil_price: IndicatorResult,
}

impl IndicatorSet {
    /// Assemble a set from role-tagged results, failing fast on a missing or
    /// duplicated role.
    pub fn from_pairs(pairs: Vec<(SeriesRole, IndicatorResult)>) -> Result<Self, AppError> {
        let mut slots: [Option<IndicatorResult>; 5] = Default::default();
        for (role, result) in pairs {
            let slot = &mut slots[role as usize];
            if slot.is_some() {
                return Err(AppError::Config(format!(
                    "Duplicate indicator for {}.",
                    role.display_name()
                )));
            }
            *slot = Some(result);
        }

        let mut taken = slots.into_iter();
        let mut next = |role: SeriesRole| {
            taken.next().flatten().ok_or_else(|| {
                AppError::Config(format!("Missing indicator for {}.", role.display_name()))
            })
        };

        Ok(Self {
            yield_curve: next(SeriesRole::YieldCurve)?,
            jobless_claims: next(SeriesRole::JoblessClaims)?,
            volatility_index: next(SeriesRole::VolatilityIndex)?,
            equity_index: next(SeriesRole::EquityIndex)?,
            oil_price: next(SeriesRole::OilPrice)?,
        })
    }

    pub fn get(&self, role: SeriesRole) -> &IndicatorResult {
        match role {
            SeriesRole::YieldCurve => &self.yield_curve,
            SeriesRole::JoblessClaims => &self.jobless_claims,
            SeriesRole::VolatilityIndex => &self.volatility_index,
            SeriesRole::EquityIndex => &self.equity_index,
            SeriesRole::OilPrice => &self.oil_price,
        }
    }

    /// Iterate the set in canonical role order.
    pub fn iter(&self) -> impl Iterator<Item = (SeriesRole, &IndicatorResult)> {
        SeriesRole::ALL.iter().map(move |&role| (role, self.get(role)))
    }
}

/// Visual severity tag attached to a status band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Positive,
}

/// Classification of the composite index into four contiguous bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    HighRecessionRisk,
    EconomicSlowdown,
    ModerateExpansion,
    StrongExpansion,
}

impl StatusBand {
    pub fn label(self) -> &'static str {
        match self {
            StatusBand::HighRecessionRisk => "High Recession Risk",
            StatusBand::EconomicSlowdown => "Economic Slowdown",
            StatusBand::ModerateExpansion => "Moderate Expansion",
            StatusBand::StrongExpansion => "Strong Expansion",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            StatusBand::HighRecessionRisk => Severity::Critical,
            StatusBand::EconomicSlowdown => Severity::Warning,
            StatusBand::ModerateExpansion => Severity::Info,
            StatusBand::StrongExpansion => Severity::Positive,
        }
    }
}

/// Which indicators agree with the composite's direction and which fight it.
///
/// Both lists are in `SeriesRole::ALL` order. An indicator scoring exactly 50
/// has no directional signal and appears in neither list.
#[derive(Debug, Clone, Default)]
pub struct TrendAgreement {
    pub confirming: Vec<SeriesRole>,
    pub contradicting: Vec<SeriesRole>,
}
