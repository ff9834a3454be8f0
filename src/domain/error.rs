//! Domain error types.

/// Top-level error type for coinlens.
#[derive(Debug, thiserror::Error)]
pub enum CoinlensError {
    #[error("failed to fetch {asset}: {reason}")]
    Fetch { asset: String, reason: String },

    #[error("malformed price data for {asset}: {reason}")]
    Decode { asset: String, reason: String },

    #[error("no price data for {asset}")]
    NoData { asset: String },

    #[error("failed to render chart {path}: {reason}")]
    Chart { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CoinlensError> for std::process::ExitCode {
    fn from(err: &CoinlensError) -> Self {
        let code: u8 = match err {
            CoinlensError::Io(_) => 1,
            CoinlensError::ConfigParse { .. } | CoinlensError::ConfigInvalid { .. } => 2,
            CoinlensError::Fetch { .. } | CoinlensError::Decode { .. } => 3,
            CoinlensError::Chart { .. } => 4,
            CoinlensError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
