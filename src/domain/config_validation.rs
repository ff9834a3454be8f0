//! Configuration validation.
//!
//! Validates every config field before an analysis run. All keys are
//! optional; only values that are present are checked.

use crate::domain::assets::parse_assets;
use crate::domain::error::CoinlensError;
use crate::ports::config_port::ConfigPort;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    validate_base_url(config)?;
    validate_timeout(config)?;
    validate_days(config)?;
    validate_delay(config)?;
    validate_assets(config)?;
    validate_chart_dimensions(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> CoinlensError {
    CoinlensError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Reads an integer key, distinguishing "absent" from "present but not a number".
fn get_integer(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<i64>, CoinlensError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("expected an integer, got '{}'", raw.trim()))),
    }
}

fn validate_base_url(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    if let Some(url) = config.get_string("api", "base_url") {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid("api", "base_url", "base_url must start with http:// or https://"));
        }
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    match get_integer(config, "api", "timeout_secs")? {
        Some(v) if v <= 0 => Err(invalid("api", "timeout_secs", "timeout_secs must be positive")),
        _ => Ok(()),
    }
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    match get_integer(config, "analysis", "days")? {
        Some(v) if v <= 0 || v > u32::MAX as i64 => {
            Err(invalid("analysis", "days", "days must be a positive integer"))
        }
        _ => Ok(()),
    }
}

fn validate_delay(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    match get_integer(config, "analysis", "delay_ms")? {
        Some(v) if v < 0 => Err(invalid("analysis", "delay_ms", "delay_ms must be non-negative")),
        _ => Ok(()),
    }
}

fn validate_assets(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    match config.get_string("analysis", "assets") {
        Some(assets) => parse_assets(&assets)
            .map(|_| ())
            .map_err(|e| invalid("analysis", "assets", e.to_string())),
        None => Ok(()),
    }
}

fn validate_chart_dimensions(config: &dyn ConfigPort) -> Result<(), CoinlensError> {
    for key in ["width", "height"] {
        if let Some(v) = get_integer(config, "chart", key)? {
            if v <= 0 || v > 10_000 {
                return Err(invalid("chart", key, format!("{} must be between 1 and 10000", key)));
            }
        }
    }
    Ok(())
}
