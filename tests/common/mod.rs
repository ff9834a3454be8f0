#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use coinlens::domain::analysis::AnalysisConfig;
use coinlens::domain::error::CoinlensError;
use coinlens::domain::metrics::MetricSeries;
pub use coinlens::domain::price::{PricePoint, PriceSeries};
use coinlens::ports::chart_port::ChartPort;
use coinlens::ports::data_port::DataPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<f64>>,
    pub errors: HashMap<String, String>,
    pub calls: RefCell<Vec<(String, u32)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_prices(mut self, asset: &str, prices: Vec<f64>) -> Self {
        self.data.insert(asset.to_string(), prices);
        self
    }

    pub fn with_error(mut self, asset: &str, reason: &str) -> Self {
        self.errors.insert(asset.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(&self, asset: &str, days: u32) -> Result<PriceSeries, CoinlensError> {
        self.calls.borrow_mut().push((asset.to_string(), days));
        if let Some(reason) = self.errors.get(asset) {
            return Err(CoinlensError::Fetch {
                asset: asset.to_string(),
                reason: reason.clone(),
            });
        }
        let prices = self.data.get(asset).cloned().unwrap_or_default();
        Ok(make_series(asset, &prices))
    }
}

/// Records every render call instead of drawing.
pub struct MockChartPort {
    pub rendered: RefCell<Vec<(String, usize)>>,
    pub fail_for: Vec<String>,
}

impl MockChartPort {
    pub fn new() -> Self {
        Self {
            rendered: RefCell::new(Vec::new()),
            fail_for: Vec::new(),
        }
    }

    pub fn failing_for(mut self, asset: &str) -> Self {
        self.fail_for.push(asset.to_string());
        self
    }
}

impl ChartPort for MockChartPort {
    fn render(&self, metrics: &MetricSeries, asset: &str) -> Result<PathBuf, CoinlensError> {
        let path = PathBuf::from(format!("{}_analysis.png", asset));
        if self.fail_for.iter().any(|a| a == asset) {
            return Err(CoinlensError::Chart {
                path: path.display().to_string(),
                reason: "mock failure".into(),
            });
        }
        self.rendered
            .borrow_mut()
            .push((asset.to_string(), metrics.len()));
        Ok(path)
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn make_series(asset: &str, prices: &[f64]) -> PriceSeries {
    let start = start_time();
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint::new(start + Duration::days(i as i64), price))
        .collect();
    PriceSeries::new(asset, points)
}

/// Deterministic, strictly positive price walk.
pub fn generate_prices(count: usize, start_price: f64) -> Vec<f64> {
    (0..count)
        .map(|i| start_price * (1.0 + 0.02 * ((i as f64) * 0.9).sin()) + i as f64)
        .collect()
}

pub fn analysis_config(assets: &[&str]) -> AnalysisConfig {
    AnalysisConfig {
        assets: assets.iter().map(|s| s.to_string()).collect(),
        days: 30,
        delay: std::time::Duration::ZERO,
    }
}
