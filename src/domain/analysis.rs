//! Per-asset analysis pipeline: fetch, compute, render, summarize.
//!
//! Assets are processed sequentially. A failure on one asset is logged and
//! recorded in [`AnalysisReport::skipped`]; it never stops the run. The
//! configured delay is slept between consecutive fetches to stay under the
//! data source's rate limit.

use super::error::CoinlensError;
use super::metrics::{self, MetricSeries, VOLATILITY};
use super::summary::AssetSummary;
use crate::ports::chart_port::ChartPort;
use crate::ports::data_port::DataPort;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_DELAY_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub assets: Vec<String>,
    pub days: u32,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct AssetAnalysis {
    pub metrics: MetricSeries,
    pub summary: AssetSummary,
    /// `None` when rendering failed; the summary is still reported.
    pub chart: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SkippedAsset {
    pub asset: String,
    pub error: CoinlensError,
}

#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub analyzed: Vec<AssetAnalysis>,
    pub skipped: Vec<SkippedAsset>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.analyzed.is_empty()
    }
}

pub fn analyze_asset(
    data_port: &dyn DataPort,
    chart_port: &dyn ChartPort,
    asset: &str,
    days: u32,
) -> Result<AssetAnalysis, CoinlensError> {
    let series = data_port.fetch_prices(asset, days)?;
    tracing::debug!(asset, samples = series.len(), "fetched price series");

    if series.len() <= VOLATILITY.warmup() {
        tracing::debug!(
            asset,
            samples = series.len(),
            "series too short for {}; volatility will be undefined",
            VOLATILITY
        );
    }

    let metrics = metrics::compute(&series).ok_or_else(|| CoinlensError::NoData {
        asset: asset.to_string(),
    })?;

    let chart = match chart_port.render(&metrics, asset) {
        Ok(path) => {
            tracing::info!(asset, path = %path.display(), "chart written");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(asset, error = %e, "chart rendering failed");
            None
        }
    };

    let summary = AssetSummary::from_metrics(&metrics, days);
    Ok(AssetAnalysis {
        metrics,
        summary,
        chart,
    })
}

/// Runs every configured asset through [`analyze_asset`], invoking
/// `on_analyzed` as soon as each asset completes.
pub fn run_analysis<F>(
    data_port: &dyn DataPort,
    chart_port: &dyn ChartPort,
    config: &AnalysisConfig,
    mut on_analyzed: F,
) -> AnalysisReport
where
    F: FnMut(&AssetAnalysis),
{
    let mut report = AnalysisReport::default();

    for (i, asset) in config.assets.iter().enumerate() {
        if i > 0 && !config.delay.is_zero() {
            tracing::debug!(delay_ms = config.delay.as_millis() as u64, "rate limit pause");
            std::thread::sleep(config.delay);
        }

        tracing::info!(asset = asset.as_str(), days = config.days, "analyzing");
        match analyze_asset(data_port, chart_port, asset, config.days) {
            Ok(analysis) => {
                on_analyzed(&analysis);
                report.analyzed.push(analysis);
            }
            Err(error) => {
                tracing::warn!(asset = asset.as_str(), error = %error, "skipping asset");
                report.skipped.push(SkippedAsset {
                    asset: asset.clone(),
                    error,
                });
            }
        }
    }

    report
}
