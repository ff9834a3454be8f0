//! Per-asset summary statistics printed after each analysis.

use super::metrics::MetricSeries;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetSummary {
    pub asset: String,
    pub days: u32,
    pub samples: usize,
    pub latest_price: Option<f64>,
    pub average_price: Option<f64>,
    pub latest_ma7: Option<f64>,
    pub latest_ma30: Option<f64>,
    pub current_volatility: Option<f64>,
}

impl AssetSummary {
    pub fn from_metrics(metrics: &MetricSeries, days: u32) -> Self {
        let last = metrics.last();

        let finite: Vec<f64> = metrics
            .points
            .iter()
            .map(|p| p.price)
            .filter(|p| p.is_finite())
            .collect();
        let average_price = if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64).filter(|a| a.is_finite())
        };

        Self {
            asset: metrics.asset.clone(),
            days,
            samples: metrics.len(),
            latest_price: last.map(|p| p.price).filter(|p| p.is_finite()),
            average_price,
            latest_ma7: last.and_then(|p| p.ma7),
            latest_ma30: last.and_then(|p| p.ma30),
            current_volatility: last.and_then(|p| p.volatility),
        }
    }
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for AssetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latest Price:          {}", money(self.latest_price))?;
        writeln!(
            f,
            "{}-day Average Price: {}",
            self.days,
            money(self.average_price)
        )?;
        writeln!(f, "7-day MA:              {}", money(self.latest_ma7))?;
        writeln!(f, "30-day MA:             {}", money(self.latest_ma30))?;
        match self.current_volatility {
            Some(v) => write!(f, "Current Volatility:    {:.4}", v),
            None => write!(f, "Current Volatility:    n/a"),
        }
    }
}
