//! Point-in-time JSON export of the three collections

use super::{Token, Wallet};
use serde::{Deserialize, Serialize};

/// Snapshot document. On import, missing keys leave the corresponding
/// collection untouched and unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallets: Option<Vec<Wallet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_wall: Option<Vec<Wallet>>,
    /// ISO-8601 export time
    #[serde(default)]
    pub timestamp: String,
}

impl Snapshot {
    /// Export filename embedding the given calendar date
    pub fn file_name(date: chrono::NaiveDate) -> String {
        format!("crypto-trackr-backup-{}.json", date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;

    fn sample_token(id: &str) -> Token {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "DOGE",
            "marketCap": "$1.23M",
            "dateAdded": "2026-08-07T10:00:00+00:00",
            "network": "Solana",
            "isFavorite": true,
        }))
        .unwrap()
    }

    fn sample_wallet(id: &str) -> Wallet {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "address": "So1abc",
            "dateAdded": "2026-08-07T10:00:00+00:00",
            "network": "Base",
            "winRate": 70,
        }))
        .unwrap()
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = Snapshot {
            tokens: Some(vec![sample_token("t1"), sample_token("t2")]),
            wallets: Some(vec![sample_wallet("w1")]),
            wallet_wall: Some(vec![sample_wallet("ww1")]),
            timestamp: "2026-08-07T12:00:00+00:00".to_string(),
        };
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();

        let tokens = restored.tokens.unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].id, "t1");
        assert_eq!(tokens[0].network, Network::Solana);
        assert!(tokens[0].is_favorite);
        assert_eq!(restored.wallets.unwrap()[0].win_rate, 70);
        assert_eq!(restored.wallet_wall.unwrap()[0].id, "ww1");
    }

    #[test]
    fn test_wallet_wall_key_is_camel_case() {
        let snapshot = Snapshot {
            wallet_wall: Some(vec![sample_wallet("ww1")]),
            ..Default::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("walletWall").is_some());
        assert!(value.get("tokens").is_none());
    }

    #[test]
    fn test_import_ignores_unknown_and_missing_keys() {
        let restored: Snapshot = serde_json::from_str(
            r#"{"walletWall": [], "somethingElse": 42, "timestamp": "2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(restored.tokens.is_none());
        assert!(restored.wallets.is_none());
        assert_eq!(restored.wallet_wall.unwrap().len(), 0);
    }

    #[test]
    fn test_file_name_embeds_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(Snapshot::file_name(date), "crypto-trackr-backup-2026-08-07.json");
    }
}
