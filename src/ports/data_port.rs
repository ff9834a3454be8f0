//! Price data source port trait.

use crate::domain::error::CoinlensError;
use crate::domain::price::PriceSeries;

pub trait DataPort {
    /// Daily samples for `asset` covering the last `days` days, oldest first.
    fn fetch_prices(&self, asset: &str, days: u32) -> Result<PriceSeries, CoinlensError>;
}
