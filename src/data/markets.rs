//! Market-data client for the historical-close series.

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::data::upstream_error;
use crate::domain::{RawHistoricalSeries, SeriesRole};
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

pub struct MarketClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MarketClient {
    /// Build a client from the environment (`.env` is honored).
    ///
    /// `MARKET_BASE_URL` can point at a proxy/intermediary; by default we go
    /// straight to the provider.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("MARKET_API_KEY").map_err(|_| {
            AppError::Config("Missing MARKET_API_KEY in environment (.env).".into())
        })?;
        let base_url =
            std::env::var("MARKET_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    /// Fetch the daily close history for one role over `[from, to]`.
    ///
    /// Bars come back newest-first; normalization reverses them.
    pub fn fetch_history(
        &self,
        role: SeriesRole,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RawHistoricalSeries, AppError> {
        let symbol = role.market_symbol().ok_or_else(|| {
            AppError::Config(format!(
                "{} is not served by the market-data provider.",
                role.display_name()
            ))
        })?;

        let url = format!("{}/api/v3/historical-price-full/{}", self.base_url, symbol);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .map_err(|e| AppError::Network {
                series: symbol.to_string(),
                detail: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(upstream_error(symbol, status.as_u16(), body));
        }

        resp.json::<RawHistoricalSeries>()
            .map_err(|e| AppError::malformed(symbol, format!("undecodable payload: {e}")))
    }
}
