//! Chart rendering port trait.

use crate::domain::error::CoinlensError;
use crate::domain::metrics::MetricSeries;
use std::path::PathBuf;

/// Port for writing one chart artifact per analyzed asset.
pub trait ChartPort {
    /// Renders the series and returns the path of the written artifact.
    fn render(&self, metrics: &MetricSeries, asset: &str) -> Result<PathBuf, CoinlensError>;
}
