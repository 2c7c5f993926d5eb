//! Record lifecycle commands: fetch, create, edit, delete, favorite
//!
//! Mutations apply to the in-memory collections immediately after the
//! remote call succeeds; the favorite toggle applies before it.

use crate::AppState;
use chrono::Utc;
use tracing::{error, info, warn};
use trackr_core::{
    Collection, Error, Result, Token, TokenPayload, TokenPreview, Wallet, WalletPayload,
};
use trackr_engine::extract::{extract_wallet_stats, WalletStats};
use trackr_engine::view::find_same_day_duplicate;
use trackr_networking::api;

/// Fetch all three collections, each independently. Collections that
/// load successfully are applied even when a sibling fails; the error
/// then names the collections that did not load.
pub async fn refresh(state: &AppState) -> Result<()> {
    info!("Fetching collections");

    let (tokens, wallets, wall) = tokio::join!(
        api::list_tokens(&state.client),
        api::list_wallets(&state.client, Collection::Wallets),
        api::list_wallets(&state.client, Collection::WalletWall),
    );

    let mut failed: Vec<&str> = Vec::new();
    let mut collections = state.collections.write().await;

    match tokens {
        Ok(list) => collections.tokens = list,
        Err(e) => {
            error!("Token fetch failed: {}", e);
            failed.push(Collection::Watchlist.table());
        }
    }
    match wallets {
        Ok(list) => collections.wallets = list,
        Err(e) => {
            error!("Wallet fetch failed: {}", e);
            failed.push(Collection::Wallets.table());
        }
    }
    match wall {
        Ok(list) => collections.wallet_wall = list,
        Err(e) => {
            error!("Wallet wall fetch failed: {}", e);
            failed.push(Collection::WalletWall.table());
        }
    }

    if failed.is_empty() {
        info!(
            "Collections loaded: {} tokens, {} wallets, {} wall entries",
            collections.tokens.len(),
            collections.wallets.len(),
            collections.wallet_wall.len()
        );
        Ok(())
    } else {
        Err(Error::StoreError(format!(
            "failed to load: {}",
            failed.join(", ")
        )))
    }
}

/// Resolve a pasted URL or symbol to a token preview via the external
/// lookup. Nothing is persisted until the user saves the form.
pub async fn lookup_token(state: &AppState, query: &str) -> Result<TokenPreview> {
    state.lookup.search(query).await
}

/// Best-effort pre-fill of wallet figures from pasted text
pub fn prefill_wallet_stats(text: &str) -> WalletStats {
    extract_wallet_stats(text)
}

/// Add a brand-new token. Rejects client-side, before any remote call,
/// when a token with the same name and network was already added on the
/// current local calendar day.
pub async fn add_token(state: &AppState, draft: &Token) -> Result<Token> {
    if draft.name.is_empty() {
        return Err(Error::InvalidData("token name is required".to_string()));
    }

    {
        let collections = state.collections.read().await;
        if let Some(existing) =
            find_same_day_duplicate(&collections.tokens, &draft.name, draft.network, Utc::now())
        {
            warn!(
                "Rejected duplicate token {} on {} (existing id {})",
                draft.name, draft.network, existing.id
            );
            return Err(Error::DuplicateError {
                name: draft.name.clone(),
                network: draft.network.to_string(),
            });
        }
    }

    let user_id = state.client.require_user_id().await?;
    let payload = TokenPayload::from_token(draft, &user_id);
    let created = api::insert_token(&state.client, payload).await?;

    info!("Token {} added ({})", created.name, created.id);
    state.collections.write().await.tokens.insert(0, created.clone());
    Ok(created)
}

/// Full overwrite of an existing token
pub async fn update_token(state: &AppState, token: &Token) -> Result<()> {
    let user_id = state.client.require_user_id().await?;
    let payload = TokenPayload::from_token(token, &user_id);
    api::update_token(&state.client, &token.id, &payload).await?;

    let mut collections = state.collections.write().await;
    if let Some(slot) = collections.tokens.iter_mut().find(|t| t.id == token.id) {
        *slot = token.clone();
    }
    Ok(())
}

/// Add a wallet to the given wallet-kind collection
pub async fn add_wallet(
    state: &AppState,
    collection: Collection,
    draft: &Wallet,
) -> Result<Wallet> {
    if draft.address.is_empty() {
        return Err(Error::InvalidData("wallet address is required".to_string()));
    }

    let user_id = state.client.require_user_id().await?;
    let payload = WalletPayload::from_wallet(draft, &user_id);
    let created = api::insert_wallet(&state.client, collection, payload).await?;

    info!("Wallet {} added to {}", created.address, collection.table());
    state
        .collections
        .write()
        .await
        .wallets_of_mut(collection)
        .insert(0, created.clone());
    Ok(created)
}

/// Full overwrite of an existing wallet
pub async fn update_wallet(
    state: &AppState,
    collection: Collection,
    wallet: &Wallet,
) -> Result<()> {
    let user_id = state.client.require_user_id().await?;
    let payload = WalletPayload::from_wallet(wallet, &user_id);
    api::update_wallet(&state.client, collection, &wallet.id, &payload).await?;

    let mut collections = state.collections.write().await;
    if let Some(slot) = collections
        .wallets_of_mut(collection)
        .iter_mut()
        .find(|w| w.id == wallet.id)
    {
        *slot = wallet.clone();
    }
    Ok(())
}

/// Delete a record by id. Confirmation is the caller's responsibility;
/// the selection also drops the id so a stale member cannot linger.
pub async fn delete_record(state: &AppState, collection: Collection, id: &str) -> Result<()> {
    api::delete_record(&state.client, collection, id).await?;

    let mut collections = state.collections.write().await;
    match collection {
        Collection::Watchlist => collections.tokens.retain(|t| t.id != id),
        _ => collections.wallets_of_mut(collection).retain(|w| w.id != id),
    }
    drop(collections);

    let mut view = state.view.write().await;
    if view.selection.contains(id) {
        view.selection.toggle(id);
    }

    info!("Record {} deleted from {}", id, collection.table());
    Ok(())
}

/// Toggle the favorite flag. The in-memory copy flips first; a remote
/// failure is logged and the local flip is kept (accepted risk).
pub async fn toggle_favorite(state: &AppState, collection: Collection, id: &str) -> Result<()> {
    let new_value = {
        let mut collections = state.collections.write().await;
        let flipped = match collection {
            Collection::Watchlist => collections.tokens.iter_mut().find(|t| t.id == id).map(|t| {
                t.is_favorite = !t.is_favorite;
                t.is_favorite
            }),
            _ => collections
                .wallets_of_mut(collection)
                .iter_mut()
                .find(|w| w.id == id)
                .map(|w| {
                    w.is_favorite = !w.is_favorite;
                    w.is_favorite
                }),
        };
        flipped.ok_or_else(|| Error::InvalidData(format!("unknown record id {}", id)))?
    };

    if let Err(e) = api::set_favorite(&state.client, collection, id, new_value).await {
        warn!("Favorite update for {} not persisted: {}", id, e);
    }
    Ok(())
}
