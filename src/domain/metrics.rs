//! Rolling price metrics for one asset.
//!
//! [`compute`] enriches a [`PriceSeries`] with a 7- and 30-sample simple moving
//! average, the daily return and a 30-sample rolling volatility (sample
//! standard deviation of daily returns). Every derived field is an
//! `Option<f64>` index-aligned with the input prices.
//!
//! Volatility at `i` covers `daily_return[i-29..=i]` and needs all 30 returns
//! defined. Because `daily_return[0]` is always undefined, volatility first
//! appears at index 30, one sample after MA30.

use super::indicator::returns::pct_change;
use super::indicator::sma::rolling_mean;
use super::indicator::stddev::rolling_sample_stddev;
use super::indicator::IndicatorType;
use super::price::PriceSeries;
use chrono::{DateTime, Utc};

pub const MA_SHORT: IndicatorType = IndicatorType::Sma(7);
pub const MA_LONG: IndicatorType = IndicatorType::Sma(30);
pub const VOLATILITY: IndicatorType = IndicatorType::Volatility(30);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub ma7: Option<f64>,
    pub ma30: Option<f64>,
    pub daily_return: Option<f64>,
    pub volatility: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub asset: String,
    pub points: Vec<MetricPoint>,
}

impl MetricSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&MetricPoint> {
        self.points.last()
    }

    pub fn ma7(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.ma7).collect()
    }

    pub fn ma30(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.ma30).collect()
    }

    pub fn daily_returns(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.daily_return).collect()
    }

    pub fn volatility(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.volatility).collect()
    }
}

/// Computes the metric series, or `None` when the input has no samples.
pub fn compute(series: &PriceSeries) -> Option<MetricSeries> {
    if series.is_empty() {
        return None;
    }

    let prices = series.prices();
    let ma7 = rolling_mean(&prices, MA_SHORT.period());
    let ma30 = rolling_mean(&prices, MA_LONG.period());
    let returns = pct_change(&prices);
    let volatility = rolling_sample_stddev(&returns, VOLATILITY.period());

    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| MetricPoint {
            timestamp: p.timestamp,
            price: p.price,
            ma7: ma7[i],
            ma30: ma30[i],
            daily_return: returns[i],
            volatility: volatility[i],
        })
        .collect();

    Some(MetricSeries {
        asset: series.asset.clone(),
        points,
    })
}
