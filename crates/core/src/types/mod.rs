//! Shared view-state type definitions

use serde::{Deserialize, Serialize};

/// The three record collections, doubling as the UI tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Watchlist,
    Wallets,
    WalletWall,
}

impl Collection {
    /// Remote table backing this collection
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Watchlist => "tokens",
            Collection::Wallets => "wallets",
            Collection::WalletWall => "wallet_wall",
        }
    }

    /// The wallets tab and the wallet wall share the wallet record shape
    pub fn is_wallet_kind(&self) -> bool {
        !matches!(self, Collection::Watchlist)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sortable token columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenSortField {
    #[default]
    DateAdded,
    PriceChange,
    MarketCap,
}

/// Sortable wallet columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WalletSortField {
    #[default]
    DateAdded,
    Multiplier,
    WinRate,
}

/// Current sort key and direction for one collection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(field: F) -> Self {
        SortState {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Selecting the active field flips direction; a new field resets
    /// to descending.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }
}

impl<F: Copy + PartialEq + Default> Default for SortState<F> {
    fn default() -> Self {
        SortState::new(F::default())
    }
}
