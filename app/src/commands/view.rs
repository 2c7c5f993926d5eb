//! View-state commands: tabs, filters, sorting, selection, derived lists

use crate::AppState;
use tracing::debug;
use trackr_core::{Collection, Network, Token, TokenSortField, Wallet, WalletSortField};
use trackr_engine::view::{
    available_sources, collection_stats, date_group_boundaries, sort_tokens, sort_wallets,
    CollectionStats, ListFilter,
};

/// Switch the active tab. Selection and the source filter reset; search
/// text, network filter, and the favorites flag carry over.
pub async fn set_active_tab(state: &AppState, tab: Collection) {
    let mut view = state.view.write().await;
    if view.active_tab != tab {
        debug!("Switching tab to {}", tab.table());
        view.active_tab = tab;
        view.selection.clear();
        view.source_filter = None;
    }
}

pub async fn set_search(state: &AppState, query: &str) {
    state.view.write().await.search = query.to_string();
}

pub async fn set_network_filter(state: &AppState, network: Option<Network>) {
    state.view.write().await.network_filter = network;
}

pub async fn set_source_filter(state: &AppState, source: Option<String>) {
    state.view.write().await.source_filter = source;
}

pub async fn set_favorites_only(state: &AppState, value: bool) {
    state.view.write().await.favorites_only = value;
}

pub async fn toggle_token_sort(state: &AppState, field: TokenSortField) {
    state.view.write().await.token_sort.toggle(field);
}

pub async fn toggle_wallet_sort(state: &AppState, field: WalletSortField) {
    state.view.write().await.wallet_sort.toggle(field);
}

async fn current_filter(state: &AppState) -> ListFilter {
    let view = state.view.read().await;
    ListFilter {
        search: view.search.clone(),
        favorites_only: view.favorites_only,
        network: view.network_filter,
        source: view.source_filter.clone(),
    }
}

/// Sorted and filtered token list for the watchlist tab
pub async fn visible_tokens(state: &AppState) -> Vec<Token> {
    let filter = current_filter(state).await;
    let sort = state.view.read().await.token_sort;
    let collections = state.collections.read().await;
    filter.apply(&sort_tokens(&collections.tokens, sort))
}

/// Sorted and filtered wallet list for a wallet-kind tab
pub async fn visible_wallets(state: &AppState, collection: Collection) -> Vec<Wallet> {
    let filter = current_filter(state).await;
    let sort = state.view.read().await.wallet_sort;
    let collections = state.collections.read().await;
    filter.apply(&sort_wallets(collections.wallets_of(collection), sort))
}

/// Visible wallets annotated with date-divider flags, one per row
pub async fn visible_wallets_grouped(
    state: &AppState,
    collection: Collection,
) -> Vec<(bool, Wallet)> {
    let list = visible_wallets(state, collection).await;
    let boundaries = date_group_boundaries(&list);
    boundaries.into_iter().zip(list).collect()
}

/// Visible tokens annotated with date-divider flags, one per row
pub async fn visible_tokens_grouped(state: &AppState) -> Vec<(bool, Token)> {
    let list = visible_tokens(state).await;
    let boundaries = date_group_boundaries(&list);
    boundaries.into_iter().zip(list).collect()
}

/// Aggregate stats over the active collection (unfiltered)
pub async fn active_stats(state: &AppState) -> CollectionStats {
    let tab = state.view.read().await.active_tab;
    let collections = state.collections.read().await;
    match tab {
        Collection::Watchlist => collection_stats(&collections.tokens),
        _ => collection_stats(collections.wallets_of(tab)),
    }
}

/// Unique sources of the active wallet-kind collection; empty on the
/// watchlist tab
pub async fn active_sources(state: &AppState) -> Vec<String> {
    let tab = state.view.read().await.active_tab;
    if !tab.is_wallet_kind() {
        return Vec::new();
    }
    let collections = state.collections.read().await;
    available_sources(collections.wallets_of(tab))
}

// ─── Bulk selection ──────────────────────────────────────────────────

pub async fn toggle_selection(state: &AppState, id: &str) {
    state.view.write().await.selection.toggle(id);
}

/// Select-all over the currently visible list of the active tab
pub async fn select_all_visible(state: &AppState) {
    let tab = state.view.read().await.active_tab;
    if !tab.is_wallet_kind() {
        return;
    }
    let visible = visible_wallets(state, tab).await;
    state.view.write().await.selection.select_all(&visible);
}

/// Newline-joined addresses of the selected wallets in visible order,
/// for the caller to place on the clipboard. The selection clears after
/// a successful copy; no-op (None) when nothing is selected.
pub async fn copy_selected_addresses(state: &AppState) -> Option<String> {
    let tab = state.view.read().await.active_tab;
    if !tab.is_wallet_kind() {
        return None;
    }
    let visible = visible_wallets(state, tab).await;

    let mut view = state.view.write().await;
    let addresses = view.selection.selected_addresses(&visible);
    if addresses.is_empty() {
        return None;
    }
    debug!("Copied {} selected addresses", view.selection.len());
    view.selection.clear();
    Some(addresses)
}
