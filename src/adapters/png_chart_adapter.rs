//! PNG chart rendering with the plotters bitmap backend.
//!
//! Draws price, 7-day MA and 30-day MA against date and writes
//! `<output_dir>/<asset>_analysis.png`.

use crate::domain::error::CoinlensError;
use crate::domain::metrics::{MA_LONG, MA_SHORT, MetricPoint, MetricSeries};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use chrono::{DateTime, Utc};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 800;

const ORANGE: RGBColor = RGBColor(255, 165, 0);

pub struct PngChartAdapter {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PngChartAdapter {
    pub fn new(output_dir: PathBuf, width: u32, height: u32) -> Self {
        Self {
            output_dir,
            width,
            height,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let dimension = |key: &str, default: u32| {
            u32::try_from(config.get_int("chart", key, i64::from(default)))
                .ok()
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        Self::new(
            PathBuf::from(config.get_string_or("chart", "output_dir", ".")),
            dimension("width", DEFAULT_WIDTH),
            dimension("height", DEFAULT_HEIGHT),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn chart_path(&self, asset: &str) -> PathBuf {
        self.output_dir.join(format!("{}_analysis.png", asset))
    }
}

/// "bitcoin" -> "Bitcoin"
pub fn chart_title(asset: &str) -> String {
    let mut chars = asset.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    format!("{} Price Analysis", name)
}

/// Defined, finite samples of one line of the chart.
fn line_points<F>(points: &[MetricPoint], value: F) -> Vec<(DateTime<Utc>, f64)>
where
    F: Fn(&MetricPoint) -> Option<f64>,
{
    points
        .iter()
        .filter_map(|p| value(p).filter(|v| v.is_finite()).map(|v| (p.timestamp, v)))
        .collect()
}

/// Padded y-axis range over every plotted value.
fn value_range(lines: &[&[(DateTime<Utc>, f64)]]) -> Option<(f64, f64)> {
    let values = lines.iter().flat_map(|line| line.iter().map(|(_, v)| *v));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let padding = ((max - min) * 0.05).max(max.abs() * 1e-6).max(1e-8);
    Some((min - padding, max + padding))
}

impl ChartPort for PngChartAdapter {
    fn render(&self, metrics: &MetricSeries, asset: &str) -> Result<PathBuf, CoinlensError> {
        let path = self.chart_path(asset);
        let chart_error = |reason: String| CoinlensError::Chart {
            path: path.display().to_string(),
            reason,
        };

        let price = line_points(&metrics.points, |p| Some(p.price));
        if price.len() < 2 {
            return Err(chart_error(
                "not enough price data to draw a chart (minimum 2 points)".into(),
            ));
        }
        let ma7 = line_points(&metrics.points, |p| p.ma7);
        let ma30 = line_points(&metrics.points, |p| p.ma30);

        let (y_min, y_max) = value_range(&[price.as_slice(), ma7.as_slice(), ma30.as_slice()])
            .ok_or_else(|| chart_error("no finite values to plot".into()))?;
        let x_min = price[0].0;
        let x_max = price[price.len() - 1].0;
        if x_min >= x_max {
            return Err(chart_error("price samples span no time".into()));
        }

        std::fs::create_dir_all(&self.output_dir)?;

        {
            let root = BitMapBackend::new(&path, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| chart_error(format!("failed to fill canvas: {}", e)))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(chart_title(asset), ("sans-serif", 32).into_font())
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(|e| chart_error(format!("failed to build chart: {}", e)))?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc("Price (USD)")
                .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m-%d").to_string())
                .draw()
                .map_err(|e| chart_error(format!("failed to draw mesh: {}", e)))?;

            let lines = [
                ("Price".to_string(), price, BLUE),
                (MA_SHORT.label(), ma7, ORANGE),
                (MA_LONG.label(), ma30, RED),
            ];
            for (label, points, color) in lines {
                if points.is_empty() {
                    continue;
                }
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(|e| chart_error(format!("failed to draw {}: {}", label, e)))?
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| chart_error(format!("failed to draw legend: {}", e)))?;

            root.present()
                .map_err(|e| chart_error(format!("failed to write image: {}", e)))?;
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::domain::metrics::compute;
    use crate::domain::price::{PricePoint, PriceSeries};
    use tempfile::TempDir;

    fn metrics_for(prices: &[f64]) -> MetricSeries {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::from_millis(1_704_067_200_000 + i as i64 * 86_400_000, p).unwrap())
            .collect();
        compute(&PriceSeries::new("bitcoin", points)).unwrap()
    }

    #[test]
    fn title_capitalizes_asset() {
        assert_eq!(chart_title("bitcoin"), "Bitcoin Price Analysis");
        assert_eq!(chart_title("ETHEREUM"), "Ethereum Price Analysis");
        assert_eq!(chart_title(""), " Price Analysis");
    }

    #[test]
    fn chart_path_uses_asset_name() {
        let adapter = PngChartAdapter::new(PathBuf::from("out"), 800, 600);
        assert_eq!(adapter.chart_path("cardano"), PathBuf::from("out/cardano_analysis.png"));
    }

    #[test]
    fn from_config_defaults_and_overrides() {
        let adapter = PngChartAdapter::from_config(&FileConfigAdapter::empty());
        assert_eq!(adapter.output_dir(), Path::new("."));
        assert_eq!((adapter.width, adapter.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));

        let config = FileConfigAdapter::from_string(
            "[chart]\noutput_dir = charts\nwidth = 640\nheight = -1\n",
        )
        .unwrap();
        let adapter = PngChartAdapter::from_config(&config);
        assert_eq!(adapter.output_dir(), Path::new("charts"));
        assert_eq!((adapter.width, adapter.height), (640, DEFAULT_HEIGHT));
    }

    #[test]
    fn line_points_skip_undefined() {
        let metrics = metrics_of_len(10);
        let ma7 = line_points(&metrics.points, |p| p.ma7);
        assert_eq!(ma7.len(), 4);
        assert_eq!(ma7[0].0, metrics.points[6].timestamp);
    }

    fn metrics_of_len(n: usize) -> MetricSeries {
        metrics_for(&(0..n).map(|i| 100.0 + i as f64).collect::<Vec<_>>())
    }

    #[test]
    fn value_range_pads_flat_series() {
        let t = Utc::now();
        let flat = vec![(t, 100.0), (t, 100.0)];
        let (lo, hi) = value_range(&[flat.as_slice()]).unwrap();
        assert!(lo < 100.0 && hi > 100.0);
        assert!(value_range(&[]).is_none());
    }

    #[test]
    fn single_point_is_chart_error() {
        let dir = TempDir::new().unwrap();
        let adapter = PngChartAdapter::new(dir.path().to_path_buf(), 800, 600);
        let err = adapter.render(&metrics_for(&[1.0]), "bitcoin").unwrap_err();
        assert!(matches!(err, CoinlensError::Chart { .. }));
        assert!(!adapter.chart_path("bitcoin").exists());
    }

    #[test]
    #[ignore] // needs a system sans-serif font for captions and labels
    fn renders_png_file() {
        let dir = TempDir::new().unwrap();
        let adapter = PngChartAdapter::new(dir.path().join("charts"), 800, 600);
        let path = adapter.render(&metrics_of_len(40), "bitcoin").unwrap();

        assert_eq!(path, dir.path().join("charts").join("bitcoin_analysis.png"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
