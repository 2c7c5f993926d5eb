//! Application state management

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use trackr_core::{
    Collection, Network, Result, SortState, Token, TokenSortField, Wallet, WalletSortField,
};
use trackr_engine::Selection;
use trackr_networking::{DexScreenerClient, SupabaseClient};
use trackr_persistence::{Database, SessionEncryptor};

/// The three in-memory collections mirrored from the remote store
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub tokens: Vec<Token>,
    pub wallets: Vec<Wallet>,
    pub wallet_wall: Vec<Wallet>,
}

impl Collections {
    /// Wallet list backing a wallet-kind collection
    pub fn wallets_of(&self, collection: Collection) -> &Vec<Wallet> {
        match collection {
            Collection::Wallets => &self.wallets,
            Collection::WalletWall => &self.wallet_wall,
            Collection::Watchlist => {
                debug_assert!(false, "watchlist holds tokens, not wallets");
                &self.wallets
            }
        }
    }

    pub fn wallets_of_mut(&mut self, collection: Collection) -> &mut Vec<Wallet> {
        match collection {
            Collection::WalletWall => &mut self.wallet_wall,
            _ => &mut self.wallets,
        }
    }
}

/// Ephemeral view state: active tab, filters, sorts, and selection.
/// Selection and the source filter reset on tab switch; search text,
/// network filter, and the favorites flag persist across tabs.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub active_tab: Collection,
    pub search: String,
    pub network_filter: Option<Network>,
    pub source_filter: Option<String>,
    pub favorites_only: bool,
    pub token_sort: SortState<TokenSortField>,
    pub wallet_sort: SortState<WalletSortField>,
    pub selection: Selection,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            active_tab: Collection::Watchlist,
            search: String::new(),
            network_filter: None,
            source_filter: None,
            favorites_only: false,
            token_sort: SortState::default(),
            wallet_sort: SortState::default(),
            selection: Selection::default(),
        }
    }
}

/// Global application state shared across commands
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SupabaseClient>,
    pub lookup: Arc<DexScreenerClient>,
    pub db: Arc<RwLock<Option<Database>>>,
    pub encryptor: Arc<SessionEncryptor>,
    pub data_dir: PathBuf,
    pub collections: Arc<RwLock<Collections>>,
    pub view: Arc<RwLock<ViewState>>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        data_dir: PathBuf,
        encryption_key: &[u8],
        supabase_url: &str,
        anon_key: &str,
    ) -> Result<Self> {
        let encryptor = SessionEncryptor::new(encryption_key)?;

        Ok(Self {
            client: Arc::new(SupabaseClient::new(supabase_url, anon_key)),
            lookup: Arc::new(DexScreenerClient::new()),
            db: Arc::new(RwLock::new(None)),
            encryptor: Arc::new(encryptor),
            data_dir,
            collections: Arc::new(RwLock::new(Collections::default())),
            view: Arc::new(RwLock::new(ViewState::default())),
        })
    }

    /// Initialize the saved-login database
    pub async fn init_db(&self) -> Result<()> {
        let db_path = self.data_dir.join("trackr.db");
        let db = Database::connect(&db_path).await?;

        let mut db_lock = self.db.write().await;
        *db_lock = Some(db);

        Ok(())
    }
}
