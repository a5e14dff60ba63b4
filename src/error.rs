//! Crate-wide error type.
//!
//! Each variant maps to a stable process exit code so shell scripts can tell
//! configuration mistakes apart from upstream/runtime failures.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Missing API key, invalid invocation, or an incomplete indicator set.
    #[error("{0}")]
    Config(String),

    /// The raw series is structurally unusable: missing container field,
    /// undecodable payload, invalid date, or a historical series with fewer
    /// than two bars.
    #[error("Malformed series {series}: {detail}")]
    MalformedSeries { series: String, detail: String },

    /// HTTP 401/403 from an upstream provider.
    #[error("Upstream rejected the request for {series} (HTTP {status}) — verify your API keys.")]
    UpstreamAuth { series: String, status: u16 },

    /// Any other non-success HTTP response.
    #[error("Upstream request for {series} failed with HTTP {status}: {body}")]
    UpstreamRequest {
        series: String,
        status: u16,
        body: String,
    },

    /// The request never reached the upstream (connectivity, DNS, firewall).
    #[error("Network failure while fetching {series}: {detail}. The request did not reach the provider; check connectivity.")]
    Network { series: String, detail: String },

    /// Terminal/TUI I/O failures (raw mode, draw, event polling).
    #[error("{0}")]
    Terminal(String),
}

impl AppError {
    pub fn malformed(series: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::MalformedSeries {
            series: series.into(),
            detail: detail.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::MalformedSeries { .. } => 3,
            AppError::UpstreamAuth { .. }
            | AppError::UpstreamRequest { .. }
            | AppError::Network { .. }
            | AppError::Terminal(_) => 4,
        }
    }
}
