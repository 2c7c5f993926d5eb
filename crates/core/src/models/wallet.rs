//! Wallet models shared by the `wallets` and `wallet_wall` collections

use super::token::{default_if_empty, Network, Status};
use serde::{Deserialize, Serialize};

/// A tracked on-chain address with trading performance figures.
/// Used identically by the wallets tab and the wallet wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub buy_volume: String,
    #[serde(default)]
    pub sell_volume: String,
    /// Signed display string, e.g. "+$700"
    #[serde(default)]
    pub profit: String,
    #[serde(default)]
    pub source: String,
    pub network: Network,
    #[serde(default)]
    pub age: String,
    pub date_added: String,
    #[serde(default)]
    pub status: Option<Status>,
    /// Return ratio display string, e.g. "2.5x"
    #[serde(default)]
    pub multiplier: String,
    /// Integer percentage 0-100
    #[serde(default = "default_win_rate")]
    pub win_rate: i64,
    #[serde(default)]
    pub custom_link: String,
    #[serde(default)]
    pub gmgn_link: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_win_rate() -> i64 {
    50
}

/// Row shape of the remote wallet tables (snake_case wire names)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRow {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub address: String,
    #[serde(default)]
    pub buy_volume: Option<String>,
    #[serde(default)]
    pub sell_volume: Option<String>,
    #[serde(default)]
    pub profit: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub network: Network,
    #[serde(default)]
    pub age: Option<String>,
    pub date_added: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub multiplier: Option<String>,
    #[serde(default)]
    pub win_rate: Option<i64>,
    #[serde(default)]
    pub custom_link: Option<String>,
    #[serde(default)]
    pub gmgn_link: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<WalletRow> for Wallet {
    fn from(row: WalletRow) -> Self {
        Wallet {
            id: row.id,
            address: row.address,
            buy_volume: row.buy_volume.unwrap_or_default(),
            sell_volume: row.sell_volume.unwrap_or_default(),
            profit: row.profit.unwrap_or_default(),
            source: row.source.unwrap_or_default(),
            network: row.network,
            age: row.age.unwrap_or_default(),
            date_added: row.date_added,
            status: row.status,
            multiplier: row.multiplier.unwrap_or_default(),
            win_rate: row.win_rate.unwrap_or(50),
            custom_link: row.custom_link.unwrap_or_default(),
            gmgn_link: row.gmgn_link.unwrap_or_default(),
            is_favorite: row.is_favorite.unwrap_or(false),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

/// Insert/update payload for the wallet tables
#[derive(Debug, Clone, Serialize)]
pub struct WalletPayload {
    pub user_id: String,
    pub address: String,
    pub buy_volume: String,
    pub sell_volume: String,
    pub profit: String,
    pub source: String,
    pub network: Network,
    pub age: String,
    pub status: Option<Status>,
    pub multiplier: String,
    pub win_rate: i64,
    pub custom_link: String,
    pub gmgn_link: String,
    pub is_favorite: bool,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
}

impl WalletPayload {
    pub fn from_wallet(wallet: &Wallet, user_id: &str) -> Self {
        WalletPayload {
            user_id: user_id.to_string(),
            address: wallet.address.clone(),
            buy_volume: wallet.buy_volume.clone(),
            sell_volume: wallet.sell_volume.clone(),
            profit: wallet.profit.clone(),
            source: wallet.source.clone(),
            network: wallet.network,
            age: default_if_empty(&wallet.age, "New"),
            status: Some(wallet.status.unwrap_or(Status::Good)),
            multiplier: default_if_empty(&wallet.multiplier, "1x"),
            win_rate: wallet.win_rate,
            custom_link: wallet.custom_link.clone(),
            gmgn_link: wallet.gmgn_link.clone(),
            is_favorite: wallet.is_favorite,
            notes: wallet.notes.clone(),
            date_added: None,
        }
    }

    pub fn with_date_added(mut self, ts: String) -> Self {
        self.date_added = Some(ts);
        self
    }
}
