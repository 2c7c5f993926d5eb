//! DexScreener public search lookup
//!
//! One GET per lookup; no caching, deduplication, or retry. A repeated
//! user action simply issues another request.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, error, instrument};
use trackr_core::{Error, Result, SearchResponse, TokenPreview};

const SEARCH_URL: &str = "https://api.dexscreener.com/latest/dex/search";

/// Trailing path segment of a DexScreener pair URL
static PAIR_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"dexscreener\.com/[^/]+/([A-Za-z0-9]+)").expect("pair URL pattern compiles")
});

/// Resolve the search key from a free-text query: a DexScreener URL
/// yields its pair segment, any other path-like input its last segment,
/// everything else is used verbatim.
pub fn extract_search_key(query: &str) -> String {
    let trimmed = query.trim();
    if let Some(caps) = PAIR_URL.captures(trimmed) {
        return caps[1].to_string();
    }
    if trimmed.contains('/') {
        return trimmed
            .rsplit('/')
            .next()
            .unwrap_or(trimmed)
            .to_string();
    }
    trimmed.to_string()
}

/// Client for the public DexScreener market-data lookup
pub struct DexScreenerClient {
    http: Client,
}

impl DexScreenerClient {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Resolve a URL or bare symbol/address to a normalized token
    /// preview from the best matching pair.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<TokenPreview> {
        let key = extract_search_key(query);
        debug!("Searching DexScreener for '{}'", key);

        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[("q", key.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("Lookup request failed: {}", e);
                Error::LookupError(e.to_string())
            })?;

        let response = response.error_for_status().map_err(|e| {
            error!("Lookup returned non-success: {}", e);
            Error::LookupError(e.to_string())
        })?;

        let data: SearchResponse = response.json().await.map_err(|e| {
            error!("Failed to parse lookup response: {}", e);
            Error::LookupError(e.to_string())
        })?;

        let pairs = data.pairs.unwrap_or_default();
        let pair = pairs
            .first()
            .ok_or_else(|| Error::LookupError(format!("no results for '{}'", key)))?;

        let preview = TokenPreview::from_pair(pair, chrono::Utc::now());
        debug!(
            "Lookup resolved '{}' to {} on {}",
            key, preview.name, preview.network
        );
        Ok(preview)
    }
}

impl Default for DexScreenerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_key_from_pair_url() {
        assert_eq!(
            extract_search_key("https://dexscreener.com/solana/8gJ6abc123"),
            "8gJ6abc123"
        );
        assert_eq!(
            extract_search_key("dexscreener.com/base/0xDeadBeef"),
            "0xDeadBeef"
        );
    }

    #[test]
    fn test_extract_key_from_other_path() {
        assert_eq!(
            extract_search_key("https://birdeye.so/token/So1abc"),
            "So1abc"
        );
    }

    #[test]
    fn test_bare_symbol_passes_through() {
        assert_eq!(extract_search_key("  BONK  "), "BONK");
        assert_eq!(extract_search_key("8gJ6abc123"), "8gJ6abc123");
    }
}
