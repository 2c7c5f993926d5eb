//! Authentication commands
//!
//! Sign-in persists the rotated refresh token as an encrypted saved
//! login so the session can be restored on the next launch.

use crate::AppState;
use tracing::{debug, error, info, warn};
use trackr_core::{AuthSession, AuthUser, Error, ProfileSummary, Result};
use trackr_persistence::sqlite;

/// Register a new account. Returns the signed-in user when the backend
/// issues a session immediately; None while email confirmation is
/// pending.
pub async fn sign_up(state: &AppState, email: &str, password: &str) -> Result<Option<AuthUser>> {
    info!("Signing up {}", email);
    let session = state.client.sign_up(email, password).await?;

    match session {
        Some(session) => {
            save_profile(state, &session).await?;
            Ok(Some(session.user))
        }
        None => {
            info!("Sign-up for {} awaits email confirmation", email);
            Ok(None)
        }
    }
}

/// Sign in with email and password
pub async fn sign_in(state: &AppState, email: &str, password: &str) -> Result<AuthUser> {
    info!("Signing in {}", email);
    let session = state.client.sign_in(email, password).await?;
    save_profile(state, &session).await?;
    Ok(session.user)
}

/// Restore the active saved login by exchanging its refresh token.
/// Returns None when no login is saved.
pub async fn restore_session(state: &AppState) -> Result<Option<AuthUser>> {
    let db_guard = state.db.read().await;
    let db = db_guard
        .as_ref()
        .ok_or_else(|| Error::DatabaseError("Database not initialized".to_string()))?;

    let Some(profile) = sqlite::get_active_profile(db.pool()).await? else {
        debug!("No active saved login");
        return Ok(None);
    };

    let encrypted = sqlite::get_profile_token(db.pool(), profile.id)
        .await?
        .ok_or_else(|| Error::DatabaseError("Saved login has no token".to_string()))?;
    let refresh_token = state.encryptor.decrypt(&encrypted)?;
    drop(db_guard);

    let session = match state.client.refresh_session(&refresh_token).await {
        Ok(session) => session,
        Err(e) => {
            error!("Could not restore session for {}: {}", profile.email, e);
            return Err(e);
        }
    };

    // The refresh token rotates on every grant; persist the new one
    save_profile(state, &session).await?;

    info!("Session restored for {}", profile.email);
    Ok(Some(session.user))
}

/// Sign out: revoke remotely, deactivate saved logins, clear all state
pub async fn sign_out(state: &AppState) -> Result<()> {
    info!("Signing out");

    if let Err(e) = state.client.sign_out().await {
        // Local state is cleared regardless; the remote revoke is best effort
        warn!("Remote sign-out failed: {}", e);
    }

    let db_guard = state.db.read().await;
    if let Some(db) = db_guard.as_ref() {
        sqlite::deactivate_all_profiles(db.pool()).await?;
    }
    drop(db_guard);

    let mut collections = state.collections.write().await;
    *collections = Default::default();
    drop(collections);

    let mut view = state.view.write().await;
    *view = Default::default();

    Ok(())
}

/// List saved logins (no sensitive data)
pub async fn list_profiles(state: &AppState) -> Result<Vec<ProfileSummary>> {
    let db_guard = state.db.read().await;
    let db = db_guard
        .as_ref()
        .ok_or_else(|| Error::DatabaseError("Database not initialized".to_string()))?;

    let profiles = sqlite::list_profiles(db.pool()).await?;
    Ok(profiles.into_iter().map(ProfileSummary::from).collect())
}

/// Persist the session's refresh token as the active saved login
async fn save_profile(state: &AppState, session: &AuthSession) -> Result<()> {
    let db_guard = state.db.read().await;
    let db = db_guard
        .as_ref()
        .ok_or_else(|| Error::DatabaseError("Database not initialized".to_string()))?;

    let encrypted = state.encryptor.encrypt(&session.refresh_token)?;
    let email = &session.user.email;

    let profile_id = if sqlite::profile_exists(db.pool(), email).await? {
        let existing = sqlite::list_profiles(db.pool())
            .await?
            .into_iter()
            .find(|p| &p.email == email)
            .ok_or_else(|| Error::DatabaseError("Saved login disappeared".to_string()))?;
        sqlite::update_profile_token(db.pool(), existing.id, &encrypted).await?;
        existing.id
    } else {
        sqlite::create_profile(db.pool(), email, Some(&session.user.id), &encrypted).await?
    };

    sqlite::set_active_profile(db.pool(), profile_id).await?;
    sqlite::update_last_verified(db.pool(), profile_id).await?;

    debug!("Saved login {} persisted", email);
    Ok(())
}
