//! Record store adapter for the three tracked collections
//!
//! Every read is scoped to the signed-in user and ordered newest first.
//! Creation timestamps are assigned here, at call time, not by the
//! server. Updates are full-payload overwrites by id; row-level
//! security enforces ownership remotely.

use crate::SupabaseClient;
use chrono::Utc;
use tracing::{debug, instrument};
use trackr_core::{
    Collection, Error, Result, Token, TokenPayload, TokenRow, Wallet, WalletPayload, WalletRow,
};

fn scope_query(user_id: &str) -> [(&'static str, String); 3] {
    [
        ("select", "*".to_string()),
        ("user_id", format!("eq.{}", user_id)),
        ("order", "date_added.desc".to_string()),
    ]
}

/// List the user's tokens, newest first
#[instrument(skip(client))]
pub async fn list_tokens(client: &SupabaseClient) -> Result<Vec<Token>> {
    let user_id = client.require_user_id().await?;
    let rows: Vec<TokenRow> = client.rest_get("tokens", &scope_query(&user_id)).await?;
    debug!("Fetched {} tokens", rows.len());
    Ok(rows.into_iter().map(Token::from).collect())
}

/// List a wallet-kind collection, newest first
#[instrument(skip(client))]
pub async fn list_wallets(client: &SupabaseClient, collection: Collection) -> Result<Vec<Wallet>> {
    debug_assert!(collection.is_wallet_kind());
    let user_id = client.require_user_id().await?;
    let rows: Vec<WalletRow> = client
        .rest_get(collection.table(), &scope_query(&user_id))
        .await?;
    debug!("Fetched {} rows from {}", rows.len(), collection.table());
    Ok(rows.into_iter().map(Wallet::from).collect())
}

/// Insert a new token, stamping the creation time now
#[instrument(skip(client, payload))]
pub async fn insert_token(client: &SupabaseClient, payload: TokenPayload) -> Result<Token> {
    let payload = payload.with_date_added(Utc::now().to_rfc3339());
    let rows: Vec<TokenRow> = client.rest_insert("tokens", &[payload]).await?;
    rows.into_iter()
        .next()
        .map(Token::from)
        .ok_or_else(|| Error::StoreError("insert returned no row".to_string()))
}

/// Insert a new wallet into the given wallet-kind collection
#[instrument(skip(client, payload))]
pub async fn insert_wallet(
    client: &SupabaseClient,
    collection: Collection,
    payload: WalletPayload,
) -> Result<Wallet> {
    debug_assert!(collection.is_wallet_kind());
    let payload = payload.with_date_added(Utc::now().to_rfc3339());
    let rows: Vec<WalletRow> = client.rest_insert(collection.table(), &[payload]).await?;
    rows.into_iter()
        .next()
        .map(Wallet::from)
        .ok_or_else(|| Error::StoreError("insert returned no row".to_string()))
}

/// Full-payload overwrite of an existing token
#[instrument(skip(client, payload))]
pub async fn update_token(
    client: &SupabaseClient,
    id: &str,
    payload: &TokenPayload,
) -> Result<()> {
    client.rest_update("tokens", id, payload).await
}

/// Full-payload overwrite of an existing wallet
#[instrument(skip(client, payload))]
pub async fn update_wallet(
    client: &SupabaseClient,
    collection: Collection,
    id: &str,
    payload: &WalletPayload,
) -> Result<()> {
    debug_assert!(collection.is_wallet_kind());
    client.rest_update(collection.table(), id, payload).await
}

/// Delete a record by id from any collection
#[instrument(skip(client))]
pub async fn delete_record(
    client: &SupabaseClient,
    collection: Collection,
    id: &str,
) -> Result<()> {
    client.rest_delete(collection.table(), id).await
}

/// Single-column favorite update used by the optimistic toggle
#[instrument(skip(client))]
pub async fn set_favorite(
    client: &SupabaseClient,
    collection: Collection,
    id: &str,
    value: bool,
) -> Result<()> {
    client
        .rest_update(
            collection.table(),
            id,
            &serde_json::json!({ "is_favorite": value }),
        )
        .await
}
