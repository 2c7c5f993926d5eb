//! Saved-login CRUD operations

use crate::encryption::EncryptedSecret;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use trackr_core::{Error, Profile, Result};

/// Database row for a saved login
#[derive(Debug, sqlx::FromRow)]
#[allow(dead_code)]
struct ProfileRow {
    id: i64,
    email: String,
    user_id: Option<String>,
    refresh_token_encrypted: Vec<u8>,
    iv: Vec<u8>,
    last_verified: Option<DateTime<Utc>>,
    is_active: i32,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            email: row.email,
            user_id: row.user_id,
            last_verified: row.last_verified,
            is_active: row.is_active != 0,
        }
    }
}

/// Create a saved login with an encrypted refresh token
pub async fn create_profile(
    pool: &SqlitePool,
    email: &str,
    user_id: Option<&str>,
    encrypted: &EncryptedSecret,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO profiles (email, user_id, refresh_token_encrypted, iv)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(email)
    .bind(user_id)
    .bind(&encrypted.ciphertext)
    .bind(&encrypted.iv[..])
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// List all saved logins (without decrypted tokens)
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>> {
    let rows: Vec<ProfileRow> = sqlx::query_as(
        r#"
        SELECT id, email, user_id, refresh_token_encrypted, iv, last_verified, is_active
        FROM profiles
        ORDER BY last_verified DESC NULLS LAST
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(rows.into_iter().map(Profile::from).collect())
}

/// Get the currently active saved login
pub async fn get_active_profile(pool: &SqlitePool) -> Result<Option<Profile>> {
    let row: Option<ProfileRow> = sqlx::query_as(
        r#"
        SELECT id, email, user_id, refresh_token_encrypted, iv, last_verified, is_active
        FROM profiles
        WHERE is_active = 1
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.map(Profile::from))
}

/// Get the encrypted refresh token for a saved login
pub async fn get_profile_token(pool: &SqlitePool, id: i64) -> Result<Option<EncryptedSecret>> {
    let row: Option<(Vec<u8>, Vec<u8>)> = sqlx::query_as(
        r#"
        SELECT refresh_token_encrypted, iv
        FROM profiles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    match row {
        Some((ciphertext, iv_vec)) => {
            if iv_vec.len() != 12 {
                return Err(Error::DatabaseError("Invalid IV length".to_string()));
            }
            let mut iv = [0u8; 12];
            iv.copy_from_slice(&iv_vec);
            Ok(Some(EncryptedSecret { ciphertext, iv }))
        }
        None => Ok(None),
    }
}

/// Check if a saved login exists for the given email
pub async fn profile_exists(pool: &SqlitePool, email: &str) -> Result<bool> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(count.0 > 0)
}

/// Set a saved login as the active one (deactivates all others)
pub async fn set_active_profile(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("UPDATE profiles SET is_active = 0")
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    sqlx::query("UPDATE profiles SET is_active = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Deactivate every saved login (sign-out)
pub async fn deactivate_all_profiles(pool: &SqlitePool) -> Result<()> {
    sqlx::query("UPDATE profiles SET is_active = 0")
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Replace the refresh token for a saved login (tokens rotate on every
/// refresh-token grant)
pub async fn update_profile_token(
    pool: &SqlitePool,
    id: i64,
    encrypted: &EncryptedSecret,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE profiles
        SET refresh_token_encrypted = ?, iv = ?
        WHERE id = ?
        "#,
    )
    .bind(&encrypted.ciphertext)
    .bind(&encrypted.iv[..])
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Update the last_verified timestamp for a saved login
pub async fn update_last_verified(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE profiles
        SET last_verified = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Delete a saved login
pub async fn delete_profile(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM profiles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}
