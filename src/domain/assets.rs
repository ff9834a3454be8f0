//! Asset list parsing.
//!
//! Asset identifiers are CoinGecko coin ids (`bitcoin`, `ethereum`, ...),
//! given as a comma-separated list in config or repeated `--asset` flags.

use std::collections::HashSet;

pub const DEFAULT_ASSETS: &[&str] = &["bitcoin", "ethereum", "cardano"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetListError {
    #[error("empty token in asset list")]
    EmptyToken,

    #[error("duplicate asset: {0}")]
    DuplicateAsset(String),

    #[error("invalid asset id: {0}")]
    InvalidId(String),
}

pub fn parse_assets(input: &str) -> Result<Vec<String>, AssetListError> {
    normalize_assets(input.split(','))
}

/// Trims, lower-cases and de-duplicates-checks a sequence of asset ids.
pub fn normalize_assets<'a, I>(tokens: I) -> Result<Vec<String>, AssetListError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assets = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(AssetListError::EmptyToken);
        }
        let asset = trimmed.to_lowercase();
        if !is_valid_id(&asset) {
            return Err(AssetListError::InvalidId(asset));
        }
        if !seen.insert(asset.clone()) {
            return Err(AssetListError::DuplicateAsset(asset));
        }
        assets.push(asset);
    }

    Ok(assets)
}

fn is_valid_id(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

pub fn default_assets() -> Vec<String> {
    DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes() {
        let assets = parse_assets(" Bitcoin, ethereum ,CARDANO").unwrap();
        assert_eq!(assets, vec!["bitcoin", "ethereum", "cardano"]);
    }

    #[test]
    fn single_asset() {
        assert_eq!(parse_assets("solana").unwrap(), vec!["solana"]);
    }

    #[test]
    fn hyphenated_ids_are_valid() {
        assert_eq!(
            parse_assets("matic-network,usd-coin").unwrap(),
            vec!["matic-network", "usd-coin"]
        );
    }

    #[test]
    fn rejects_empty_token() {
        assert_eq!(parse_assets("bitcoin,,ethereum"), Err(AssetListError::EmptyToken));
        assert_eq!(parse_assets(""), Err(AssetListError::EmptyToken));
    }

    #[test]
    fn rejects_duplicates_case_insensitively() {
        assert_eq!(
            parse_assets("bitcoin,BITCOIN"),
            Err(AssetListError::DuplicateAsset("bitcoin".into()))
        );
    }

    #[test]
    fn rejects_path_like_ids() {
        assert_eq!(
            parse_assets("../etc/passwd"),
            Err(AssetListError::InvalidId("../etc/passwd".into()))
        );
    }

    #[test]
    fn normalize_from_flags() {
        let assets = normalize_assets(["Dogecoin", "litecoin"]).unwrap();
        assert_eq!(assets, vec!["dogecoin", "litecoin"]);
    }

    #[test]
    fn default_list_matches_constant() {
        assert_eq!(default_assets(), vec!["bitcoin", "ethereum", "cardano"]);
    }
}
