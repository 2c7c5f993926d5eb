//! Watchlist token models and the `tokens` table wire shapes

use serde::{Deserialize, Serialize};

/// Blockchain a record belongs to. Closed set; unrecognized wire values
/// are a deserialization error rather than a silent widening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Solana,
    Ethereum,
    Base,
    #[serde(rename = "BSC")]
    Bsc,
    Other,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Solana,
        Network::Ethereum,
        Network::Base,
        Network::Bsc,
        Network::Other,
    ];

    /// Map a lookup chain id onto a network by substring.
    /// The `Other` fallback here is the one intentional open edge.
    pub fn from_chain_id(chain_id: &str) -> Self {
        let id = chain_id.to_lowercase();
        if id.contains("sol") {
            Network::Solana
        } else if id.contains("eth") {
            Network::Ethereum
        } else if id.contains("base") {
            Network::Base
        } else if id.contains("bsc") {
            Network::Bsc
        } else {
            Network::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Solana => "Solana",
            Network::Ethereum => "Ethereum",
            Network::Base => "Base",
            Network::Bsc => "BSC",
            Network::Other => "Other",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse quality tier assigned to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Good,
    Excellent,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Good => f.write_str("Good"),
            Status::Excellent => f.write_str("Excellent"),
        }
    }
}

/// A tracked token. Monetary/percentage fields are display strings; the
/// numeric reading is recomputed on demand and never persisted back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub market_cap: String,
    #[serde(default)]
    pub liquidity: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub price_change: String,
    /// RFC 3339 creation timestamp, assigned client-side at insert time
    pub date_added: String,
    pub network: Network,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub custom_link: String,
    #[serde(default)]
    pub dex_screener_url: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub notes: String,
}

/// Row shape of the remote `tokens` table (snake_case wire names)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRow {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub market_cap: Option<String>,
    #[serde(default)]
    pub liquidity: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub price_change: Option<String>,
    pub date_added: String,
    pub network: Network,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub custom_link: Option<String>,
    #[serde(default)]
    pub dex_screener_url: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<TokenRow> for Token {
    fn from(row: TokenRow) -> Self {
        Token {
            id: row.id,
            name: row.name,
            market_cap: row.market_cap.unwrap_or_default(),
            liquidity: row.liquidity.unwrap_or_default(),
            age: row.age.unwrap_or_default(),
            price_change: row.price_change.unwrap_or_else(|| "0%".to_string()),
            date_added: row.date_added,
            network: row.network,
            status: row.status,
            custom_link: row.custom_link.unwrap_or_default(),
            dex_screener_url: row.dex_screener_url.unwrap_or_default(),
            is_favorite: row.is_favorite.unwrap_or(false),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

/// Insert/update payload for the `tokens` table. The id is always
/// server-assigned; `date_added` is set only on insert.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPayload {
    pub user_id: String,
    pub name: String,
    pub market_cap: String,
    pub liquidity: String,
    pub age: String,
    pub price_change: String,
    pub network: Network,
    pub status: Option<Status>,
    pub custom_link: String,
    pub dex_screener_url: String,
    pub is_favorite: bool,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
}

impl TokenPayload {
    /// Build a payload from an edited token, applying the display
    /// defaults for fields the user left empty.
    pub fn from_token(token: &Token, user_id: &str) -> Self {
        TokenPayload {
            user_id: user_id.to_string(),
            name: token.name.clone(),
            market_cap: default_if_empty(&token.market_cap, "$0"),
            liquidity: default_if_empty(&token.liquidity, "$0"),
            age: default_if_empty(&token.age, "New"),
            price_change: default_if_empty(&token.price_change, "0%"),
            network: token.network,
            status: Some(token.status.unwrap_or(Status::Good)),
            custom_link: token.custom_link.clone(),
            dex_screener_url: if token.dex_screener_url.is_empty() {
                token.custom_link.clone()
            } else {
                token.dex_screener_url.clone()
            },
            is_favorite: token.is_favorite,
            notes: token.notes.clone(),
            date_added: None,
        }
    }

    pub fn with_date_added(mut self, ts: String) -> Self {
        self.date_added = Some(ts);
        self
    }
}

pub(crate) fn default_if_empty(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_chain_id() {
        assert_eq!(Network::from_chain_id("solana"), Network::Solana);
        assert_eq!(Network::from_chain_id("ethereum"), Network::Ethereum);
        assert_eq!(Network::from_chain_id("base"), Network::Base);
        assert_eq!(Network::from_chain_id("bsc"), Network::Bsc);
        assert_eq!(Network::from_chain_id("polygon"), Network::Other);
    }

    #[test]
    fn test_network_serde_names_are_closed() {
        let json = serde_json::to_string(&Network::Bsc).unwrap();
        assert_eq!(json, "\"BSC\"");
        assert!(serde_json::from_str::<Network>("\"Tron\"").is_err());
    }

    #[test]
    fn test_row_mapping_defaults() {
        let row: TokenRow = serde_json::from_str(
            r#"{"id":"t1","name":"DOGE","date_added":"2026-01-05T10:00:00+00:00","network":"Solana"}"#,
        )
        .unwrap();
        let token = Token::from(row);
        assert_eq!(token.price_change, "0%");
        assert!(!token.is_favorite);
        assert_eq!(token.notes, "");
    }

    #[test]
    fn test_payload_skips_date_added_on_update() {
        let token = Token {
            id: "t1".into(),
            name: "DOGE".into(),
            market_cap: String::new(),
            liquidity: String::new(),
            age: String::new(),
            price_change: String::new(),
            date_added: "2026-01-05T10:00:00+00:00".into(),
            network: Network::Solana,
            status: None,
            custom_link: "dexscreener.com/solana/abc".into(),
            dex_screener_url: String::new(),
            is_favorite: false,
            notes: String::new(),
        };
        let payload = TokenPayload::from_token(&token, "u1");
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("date_added").is_none());
        assert_eq!(json["market_cap"], "$0");
        assert_eq!(json["dex_screener_url"], "dexscreener.com/solana/abc");
        assert_eq!(json["status"], "Good");
    }
}
