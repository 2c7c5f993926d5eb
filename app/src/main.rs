//! CryptoTrackr - headless entry point
//!
//! Boots the application state, restores or establishes a session, and
//! performs the initial fetch. UI surfaces drive the command layer in
//! `trackr_app::commands`; this binary reports collection stats and
//! exits.

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trackr_app::{commands, AppState};
use trackr_core::Collection;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackr_app=debug,trackr_core=debug,trackr_networking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CryptoTrackr");

    let supabase_url =
        std::env::var("SUPABASE_URL").context("SUPABASE_URL environment variable is required")?;
    let anon_key = std::env::var("SUPABASE_ANON_KEY")
        .context("SUPABASE_ANON_KEY environment variable is required")?;

    let data_dir = dirs_next::data_local_dir()
        .map(|p| p.join("CryptoTrackr"))
        .unwrap_or_else(|| PathBuf::from("."));

    let encryption_key = trackr_persistence::derive_machine_key()
        .context("Failed to derive machine encryption key")?;
    tracing::info!("Encryption key derived from machine fingerprint");

    let state = AppState::new(data_dir, &encryption_key, &supabase_url, &anon_key)
        .context("Failed to create application state")?;
    state.init_db().await.context("Failed to initialize database")?;

    // Log session changes from the auth notification stream
    let mut session_rx = state.client.subscribe();
    tokio::spawn(async move {
        while session_rx.changed().await.is_ok() {
            match session_rx.borrow().as_ref() {
                Some(user) => tracing::info!("Session active for {}", user.email),
                None => tracing::info!("Session cleared"),
            }
        }
    });

    // Restore the saved login, or sign in from the environment
    let user = match commands::auth::restore_session(&state).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            match (std::env::var("TRACKR_EMAIL"), std::env::var("TRACKR_PASSWORD")) {
                (Ok(email), Ok(password)) => {
                    Some(commands::auth::sign_in(&state, &email, &password).await?)
                }
                _ => None,
            }
        }
        Err(e) => {
            tracing::error!("Saved session could not be restored: {}", e);
            None
        }
    };

    let Some(user) = user else {
        tracing::warn!(
            "No session available. Save a login first or set TRACKR_EMAIL / TRACKR_PASSWORD."
        );
        return Ok(());
    };
    tracing::info!("Signed in as {} ({})", user.email, user.id);

    if let Err(e) = commands::records::refresh(&state).await {
        tracing::error!("Initial fetch incomplete: {}", e);
    }

    for tab in [
        Collection::Watchlist,
        Collection::Wallets,
        Collection::WalletWall,
    ] {
        commands::view::set_active_tab(&state, tab).await;
        let stats = commands::view::active_stats(&state).await;
        tracing::info!(
            "{}: {} total, {} good, {} excellent, {} favorites",
            tab.table(),
            stats.total,
            stats.good,
            stats.excellent,
            stats.favorites
        );
    }

    Ok(())
}
