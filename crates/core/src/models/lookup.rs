//! DexScreener search response shapes and lookup normalization

use super::token::{Network, Status};
use crate::format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response from the public `latest/dex/search` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub pairs: Option<Vec<PairInfo>>,
}

/// One trading pair from the search result set
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub url: String,
    pub base_token: BaseToken,
    #[serde(default)]
    pub liquidity: Option<LiquidityInfo>,
    #[serde(default)]
    pub price_change: Option<PriceChangeInfo>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub fdv: Option<f64>,
    /// Millisecond epoch of pair creation
    #[serde(default)]
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseToken {
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityInfo {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceChangeInfo {
    #[serde(default)]
    pub h24: Option<f64>,
}

/// USD liquidity above which a looked-up token is tiered Excellent
const EXCELLENT_LIQUIDITY_USD: f64 = 500_000.0;

/// Normalized partial token produced by a lookup. Pre-fills the add
/// form; nothing here is persisted until the user saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPreview {
    pub name: String,
    pub market_cap: String,
    pub liquidity: String,
    pub age: String,
    pub price_change: String,
    pub network: Network,
    pub status: Status,
    pub custom_link: String,
    pub dex_screener_url: String,
}

impl TokenPreview {
    /// Derive the display record from the best (first) pair of a result set.
    pub fn from_pair(pair: &PairInfo, now: DateTime<Utc>) -> Self {
        let liquidity_usd = pair.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0);
        let status = if liquidity_usd > EXCELLENT_LIQUIDITY_USD {
            Status::Excellent
        } else {
            Status::Good
        };

        let age = match pair.pair_created_at {
            Some(created_ms) => age_bucket(now.timestamp_millis() - created_ms),
            None => "New".to_string(),
        };

        let price_change = match pair.price_change.as_ref().and_then(|p| p.h24) {
            Some(h24) if h24 > 0.0 => format!("+{}%", h24),
            Some(h24) => format!("{}%", h24),
            None => "0%".to_string(),
        };

        TokenPreview {
            name: pair.base_token.symbol.clone(),
            market_cap: format::format_compact_usd(pair.market_cap.or(pair.fdv).unwrap_or(0.0)),
            liquidity: format::format_compact_usd(liquidity_usd),
            age,
            price_change,
            network: Network::from_chain_id(&pair.chain_id),
            status,
            custom_link: pair.url.clone(),
            dex_screener_url: pair.url.clone(),
        }
    }
}

/// Bucket an elapsed duration into m/h/d/mo with integer-floor division.
fn age_bucket(elapsed_ms: i64) -> String {
    let minutes = elapsed_ms / 60_000;
    let hours = elapsed_ms / 3_600_000;
    let days = elapsed_ms / 86_400_000;
    if minutes < 60 {
        format!("{}m", minutes)
    } else if hours < 24 {
        format!("{}h", hours)
    } else if days < 30 {
        format!("{}d", days)
    } else {
        format!("{}mo", days / 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pair(json: &str) -> PairInfo {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_age_buckets() {
        assert_eq!(age_bucket(59 * 60_000), "59m");
        assert_eq!(age_bucket(60 * 60_000), "1h");
        assert_eq!(age_bucket(23 * 3_600_000 + 3_599_000), "23h");
        assert_eq!(age_bucket(24 * 3_600_000), "1d");
        assert_eq!(age_bucket(29 * 86_400_000), "29d");
        assert_eq!(age_bucket(65 * 86_400_000), "2mo");
    }

    #[test]
    fn test_preview_normalization() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let p = pair(
            r#"{
                "chainId": "solana",
                "url": "https://dexscreener.com/solana/abc123",
                "baseToken": {"symbol": "BONK"},
                "liquidity": {"usd": 750000.0},
                "priceChange": {"h24": 12.5},
                "marketCap": 1234567.0,
                "pairCreatedAt": 1785974400000
            }"#,
        );
        // pairCreatedAt is 2026-08-06T00:00:00Z, 36h before `now`
        let preview = TokenPreview::from_pair(&p, now);
        assert_eq!(preview.name, "BONK");
        assert_eq!(preview.network, Network::Solana);
        assert_eq!(preview.status, Status::Excellent);
        assert_eq!(preview.age, "1d");
        assert_eq!(preview.price_change, "+12.5%");
        assert_eq!(preview.market_cap, "$1.23M");
        assert_eq!(preview.liquidity, "$750.0K");
    }

    #[test]
    fn test_preview_fallbacks() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let p = pair(
            r#"{
                "chainId": "tron",
                "url": "https://dexscreener.com/tron/xyz",
                "baseToken": {"symbol": "TRX"},
                "fdv": 5000.0,
                "priceChange": {"h24": -3.0}
            }"#,
        );
        let preview = TokenPreview::from_pair(&p, now);
        assert_eq!(preview.network, Network::Other);
        assert_eq!(preview.status, Status::Good);
        assert_eq!(preview.age, "New");
        assert_eq!(preview.price_change, "-3%");
        // marketCap missing, falls back to fdv
        assert_eq!(preview.market_cap, "$5.0K");
    }

    #[test]
    fn test_preview_missing_change_is_zero_percent() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let p = pair(r#"{"chainId": "eth", "url": "", "baseToken": {"symbol": "PEPE"}}"#);
        let preview = TokenPreview::from_pair(&p, now);
        assert_eq!(preview.price_change, "0%");
        assert_eq!(preview.market_cap, "$0");
        assert_eq!(preview.network, Network::Ethereum);
    }
}
