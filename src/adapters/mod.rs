//! Concrete adapter implementations for ports.

pub mod coingecko_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod png_chart_adapter;
