//! FRED API client for the observation-shaped series.

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::data::upstream_error;
use crate::domain::{RawObservationSeries, SeriesRole};
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org";

pub struct FredClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    /// Build a client from the environment (`.env` is honored).
    ///
    /// `FRED_BASE_URL` can point at a proxy/intermediary for deployments
    /// without direct outbound access; by default we go straight to FRED.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::Config("Missing FRED_API_KEY in environment (.env).".into()))?;
        let base_url =
            std::env::var("FRED_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    /// Fetch the observation payload for one role from `start` through today.
    ///
    /// The payload is returned as-is; sentinel filtering and scoring happen in
    /// normalization so live and sample data share one code path.
    pub fn fetch_observations(
        &self,
        role: SeriesRole,
        start: NaiveDate,
    ) -> Result<RawObservationSeries, AppError> {
        let series_id = role.fred_series_id().ok_or_else(|| {
            AppError::Config(format!(
                "{} is not served by the observation provider.",
                role.display_name()
            ))
        })?;

        let url = format!("{}/fred/series/observations", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", &self.api_key),
                ("file_type", "json"),
                ("observation_start", &start.to_string()),
                ("sort_order", "asc"),
            ])
            .send()
            .map_err(|e| AppError::Network {
                series: series_id.to_string(),
                detail: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(upstream_error(series_id, status.as_u16(), body));
        }

        resp.json::<RawObservationSeries>()
            .map_err(|e| AppError::malformed(series_id, format!("undecodable payload: {e}")))
    }
}
