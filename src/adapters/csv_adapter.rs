//! CSV file data adapter for offline analysis.
//!
//! Reads `<base_path>/<asset>.csv` with a `timestamp,price` header. The
//! timestamp column accepts Unix milliseconds, RFC 3339 or `YYYY-MM-DD`.
//! Only samples within `days` of the most recent sample are returned.

use crate::domain::error::CoinlensError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, asset: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", asset))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl DataPort for CsvAdapter {
    fn fetch_prices(&self, asset: &str, days: u32) -> Result<PriceSeries, CoinlensError> {
        let path = self.csv_path(asset);
        let content = fs::read_to_string(&path).map_err(|e| CoinlensError::Fetch {
            asset: asset.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let decode_error = |reason: String| CoinlensError::Decode {
            asset: asset.to_string(),
            reason,
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| decode_error(format!("CSV parse error: {}", e)))?;

            let ts_str = record
                .get(0)
                .ok_or_else(|| decode_error("missing timestamp column".into()))?;
            let timestamp = parse_timestamp(ts_str).ok_or_else(|| {
                decode_error(format!("invalid timestamp '{}' on row {}", ts_str, line + 1))
            })?;

            let price: f64 = record
                .get(1)
                .ok_or_else(|| decode_error("missing price column".into()))?
                .trim()
                .parse()
                .map_err(|e| decode_error(format!("invalid price on row {}: {}", line + 1, e)))?;

            points.push(PricePoint::new(timestamp, price));
        }

        let mut series = PriceSeries::sorted(asset, points);
        if let Some(latest) = series.last().map(|p| p.timestamp) {
            let cutoff = latest - Duration::days(i64::from(days));
            series.points.retain(|p| p.timestamp >= cutoff);
        }

        Ok(series)
    }
}
