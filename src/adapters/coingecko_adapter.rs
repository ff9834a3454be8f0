//! CoinGecko HTTP data adapter.
//!
//! Fetches `GET {base_url}/coins/{asset}/market_chart` with daily interval
//! sampling. The response's `prices` array holds `[ms_timestamp, price]`
//! pairs; a `null` price is kept as NaN so the metric for that day becomes
//! undefined instead of shifting the series.

use crate::domain::error::CoinlensError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_VS_CURRENCY: &str = "usd";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, Option<f64>)>,
}

pub struct CoinGeckoAdapter {
    client: Client,
    base_url: String,
    vs_currency: String,
}

impl CoinGeckoAdapter {
    pub fn new(base_url: &str, vs_currency: &str, timeout: Duration) -> Result<Self, CoinlensError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coinlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoinlensError::ConfigInvalid {
                section: "api".into(),
                key: "base_url".into(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            vs_currency: vs_currency.to_lowercase(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, CoinlensError> {
        let base_url = config.get_string_or("api", "base_url", DEFAULT_BASE_URL);
        let vs_currency = config.get_string_or("api", "vs_currency", DEFAULT_VS_CURRENCY);
        let timeout_secs = config.get_int("api", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
        if timeout_secs <= 0 {
            return Err(CoinlensError::ConfigInvalid {
                section: "api".into(),
                key: "timeout_secs".into(),
                reason: "timeout_secs must be positive".into(),
            });
        }

        Self::new(&base_url, &vs_currency, Duration::from_secs(timeout_secs as u64))
    }

    pub fn market_chart_url(&self, asset: &str) -> String {
        format!("{}/coins/{}/market_chart", self.base_url, asset)
    }
}

/// Decodes a `market_chart` response body into a price series.
pub fn parse_market_chart(asset: &str, body: &str) -> Result<PriceSeries, CoinlensError> {
    let response: MarketChartResponse =
        serde_json::from_str(body).map_err(|e| CoinlensError::Decode {
            asset: asset.to_string(),
            reason: e.to_string(),
        })?;

    let mut points = Vec::with_capacity(response.prices.len());
    for (millis, price) in response.prices {
        if !millis.is_finite() {
            return Err(CoinlensError::Decode {
                asset: asset.to_string(),
                reason: format!("invalid timestamp {}", millis),
            });
        }
        let point = PricePoint::from_millis(millis as i64, price.unwrap_or(f64::NAN))
            .ok_or_else(|| CoinlensError::Decode {
                asset: asset.to_string(),
                reason: format!("timestamp out of range: {}", millis),
            })?;
        points.push(point);
    }

    Ok(PriceSeries::sorted(asset, points))
}

impl DataPort for CoinGeckoAdapter {
    fn fetch_prices(&self, asset: &str, days: u32) -> Result<PriceSeries, CoinlensError> {
        let fetch_error = |reason: String| CoinlensError::Fetch {
            asset: asset.to_string(),
            reason,
        };

        let url = self.market_chart_url(asset);
        tracing::debug!(url = url.as_str(), days, "requesting market chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", self.vs_currency.clone()),
                ("days", days.to_string()),
                ("interval", "daily".to_string()),
            ])
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP status {}", status)));
        }

        let body = response.text().map_err(|e| fetch_error(e.to_string()))?;
        parse_market_chart(asset, &body)
    }
}
