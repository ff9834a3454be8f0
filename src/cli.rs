//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::coingecko_adapter::{self, CoinGeckoAdapter};
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::png_chart_adapter::PngChartAdapter;
use crate::domain::analysis::{self, AnalysisConfig, DEFAULT_DAYS, DEFAULT_DELAY_MS};
use crate::domain::assets::{default_assets, normalize_assets, parse_assets};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::CoinlensError;
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "coinlens", about = "Cryptocurrency price analysis")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (overrides [logging] level)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch prices, compute metrics and render a chart per asset
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Asset id to analyze; repeat for several (overrides [analysis] assets)
        #[arg(long = "asset")]
        assets: Vec<String>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Read `<asset>.csv` files from this directory instead of the HTTP API
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOverrides {
    pub assets: Vec<String>,
    pub days: Option<u32>,
    pub delay_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            assets,
            days,
            output_dir,
            delay_ms,
            data_dir,
        } => {
            let overrides = AnalyzeOverrides {
                assets,
                days,
                delay_ms,
                output_dir,
                data_dir,
            };
            run_analyze(config.as_ref(), &overrides, cli.log_level.as_deref())
        }
        Command::Validate { config } => run_validate(&config, cli.log_level.as_deref()),
    }
}

/// Installs the global fmt subscriber on stderr. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    // a subscriber may already be installed (tests run several commands)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn resolve_log_level(flag: Option<&str>, config: &dyn ConfigPort) -> String {
    match flag {
        Some(level) => level.to_string(),
        None => config.get_string_or("logging", "level", DEFAULT_LOG_LEVEL),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(path) => FileConfigAdapter::from_file(path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }),
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn resolve_assets(
    overrides: &AnalyzeOverrides,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, CoinlensError> {
    let invalid = |e: crate::domain::assets::AssetListError| CoinlensError::ConfigInvalid {
        section: "analysis".into(),
        key: "assets".into(),
        reason: e.to_string(),
    };

    if !overrides.assets.is_empty() {
        return normalize_assets(overrides.assets.iter().map(String::as_str)).map_err(invalid);
    }

    match config.get_string("analysis", "assets") {
        Some(list) => parse_assets(&list).map_err(invalid),
        None => Ok(default_assets()),
    }
}

/// `[analysis] data_dir`, or `None` when unset or blank (read from HTTP).
pub fn configured_data_dir(config: &dyn ConfigPort) -> Option<PathBuf> {
    config
        .get_string("analysis", "data_dir")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

pub fn build_analysis_config(
    config: &dyn ConfigPort,
    overrides: &AnalyzeOverrides,
) -> Result<AnalysisConfig, CoinlensError> {
    let assets = resolve_assets(overrides, config)?;

    let days = match overrides.days {
        Some(days) => days,
        None => {
            let raw = config.get_int("analysis", "days", i64::from(DEFAULT_DAYS));
            u32::try_from(raw).ok().filter(|d| *d > 0).ok_or_else(|| {
                CoinlensError::ConfigInvalid {
                    section: "analysis".into(),
                    key: "days".into(),
                    reason: "days must be a positive integer".into(),
                }
            })?
        }
    };
    if days == 0 {
        return Err(CoinlensError::ConfigInvalid {
            section: "analysis".into(),
            key: "days".into(),
            reason: "days must be a positive integer".into(),
        });
    }

    let delay_ms = match overrides.delay_ms {
        Some(ms) => ms,
        None => {
            let raw = config.get_int("analysis", "delay_ms", DEFAULT_DELAY_MS as i64);
            u64::try_from(raw).map_err(|_| CoinlensError::ConfigInvalid {
                section: "analysis".into(),
                key: "delay_ms".into(),
                reason: "delay_ms must be non-negative".into(),
            })?
        }
    };

    Ok(AnalysisConfig {
        assets,
        days,
        delay: Duration::from_millis(delay_ms),
    })
}

fn run_analyze(
    config_path: Option<&PathBuf>,
    overrides: &AnalyzeOverrides,
    log_level: Option<&str>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    init_tracing(&resolve_log_level(log_level, &config));

    if let Some(path) = config_path {
        tracing::info!(path = %path.display(), "loaded config");
    }

    if let Err(e) = validate_analysis_config(&config) {
        tracing::error!("{e}");
        return (&e).into();
    }

    let analysis_config = match build_analysis_config(&config, overrides) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return (&e).into();
        }
    };

    let chart_port = match &overrides.output_dir {
        Some(dir) => {
            let from_config = PngChartAdapter::from_config(&config);
            let (width, height) = from_config.dimensions();
            PngChartAdapter::new(dir.clone(), width, height)
        }
        None => PngChartAdapter::from_config(&config),
    };

    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| configured_data_dir(&config));

    match data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "reading prices from CSV files");
            let data_port = CsvAdapter::new(dir);
            run_analysis_pipeline(&data_port, &chart_port, &analysis_config)
        }
        None => {
            let data_port = match CoinGeckoAdapter::from_config(&config) {
                Ok(a) => a,
                Err(e) => {
                    tracing::error!("{e}");
                    return (&e).into();
                }
            };
            let base_url =
                config.get_string_or("api", "base_url", coingecko_adapter::DEFAULT_BASE_URL);
            tracing::info!(base_url = %base_url, "reading prices from HTTP API");
            run_analysis_pipeline(&data_port, &chart_port, &analysis_config)
        }
    }
}

pub fn run_analysis_pipeline(
    data_port: &dyn DataPort,
    chart_port: &dyn ChartPort,
    config: &AnalysisConfig,
) -> ExitCode {
    let report = analysis::run_analysis(data_port, chart_port, config, |a| {
        println!("\n=== {} ===", a.summary.asset);
        println!("{}", a.summary);
        if let Some(path) = &a.chart {
            println!("Analysis saved as {}", path.display());
        }
    });

    for skipped in &report.skipped {
        tracing::warn!(asset = skipped.asset.as_str(), "skipped: {}", skipped.error);
    }
    tracing::info!(
        analyzed = report.analyzed.len(),
        skipped = report.skipped.len(),
        "analysis complete"
    );

    if report.is_empty() {
        tracing::error!("no asset could be analyzed");
        return ExitCode::from(5);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf, log_level: Option<&str>) -> ExitCode {
    let config = match load_config(Some(config_path)) {
        Ok(c) => c,
        Err(code) => return code,
    };
    init_tracing(&resolve_log_level(log_level, &config));

    println!("Validating config: {}", config_path.display());
    if let Err(e) = validate_analysis_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let analysis_config = match build_analysis_config(&config, &AnalyzeOverrides::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let chart = PngChartAdapter::from_config(&config);
    let (width, height) = chart.dimensions();

    println!("\nAnalysis:");
    println!("  assets:   {}", analysis_config.assets.join(", "));
    println!("  days:     {}", analysis_config.days);
    println!("  delay:    {} ms", analysis_config.delay.as_millis());
    match configured_data_dir(&config) {
        Some(dir) => println!("  source:   CSV files in {}", dir.display()),
        None => println!(
            "  source:   {}",
            config.get_string_or("api", "base_url", coingecko_adapter::DEFAULT_BASE_URL)
        ),
    }
    println!("\nChart:");
    println!("  output:   {}", chart.output_dir().display());
    println!("  size:     {}x{}", width, height);

    println!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
