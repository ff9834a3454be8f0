//! Rolling-window indicator building blocks.
//!
//! Each calculator takes a plain slice and returns a `Vec<Option<f64>>`
//! index-aligned with its input. `None` marks a value that cannot be computed
//! yet (insufficient history) or at all (zero divisor, non-finite input).
//!
//! - [`sma::rolling_mean`]: simple trailing moving average
//! - [`returns::pct_change`]: fractional change from the previous sample
//! - [`stddev::rolling_sample_stddev`]: sample standard deviation over a window
//!
//! Daily returns have no window and are not an [`IndicatorType`].

pub mod returns;
pub mod sma;
pub mod stddev;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Volatility(usize),
}

impl IndicatorType {
    /// Window length in samples.
    pub fn period(&self) -> usize {
        match self {
            IndicatorType::Sma(period) | IndicatorType::Volatility(period) => *period,
        }
    }

    /// Number of leading indices for which the indicator is undefined.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(period) => period.saturating_sub(1),
            IndicatorType::Volatility(period) => *period,
        }
    }

    /// Human-readable label used in chart legends.
    pub fn label(&self) -> String {
        match self {
            IndicatorType::Sma(period) => format!("{}-day MA", period),
            IndicatorType::Volatility(period) => format!("{}-day Volatility", period),
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
        }
    }
}
