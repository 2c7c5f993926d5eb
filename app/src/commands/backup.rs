//! Snapshot export/import commands
//!
//! The snapshot is a one-shot JSON document of all three collections.
//! Import is view-only: it replaces the in-memory lists and never
//! writes through to the remote store.

use crate::AppState;
use chrono::{Local, Utc};
use std::path::{Path, PathBuf};
use tracing::info;
use trackr_core::{Error, Result, Snapshot};

/// Serialize all three collections into a dated snapshot file inside
/// `dir`. Returns the written path.
pub async fn export_snapshot(state: &AppState, dir: &Path) -> Result<PathBuf> {
    let collections = state.collections.read().await;
    let snapshot = Snapshot {
        tokens: Some(collections.tokens.clone()),
        wallets: Some(collections.wallets.clone()),
        wallet_wall: Some(collections.wallet_wall.clone()),
        timestamp: Utc::now().to_rfc3339(),
    };
    drop(collections);

    let json = serde_json::to_string_pretty(&snapshot)?;
    let path = dir.join(Snapshot::file_name(Local::now().date_naive()));
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| Error::InvalidData(format!("could not write snapshot: {}", e)))?;

    info!("Snapshot exported to {}", path.display());
    Ok(path)
}

/// Load a snapshot file and replace the collections it contains.
/// Missing keys leave the corresponding collection untouched.
pub async fn import_snapshot(state: &AppState, path: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::InvalidData(format!("could not read snapshot: {}", e)))?;

    let snapshot: Snapshot =
        serde_json::from_str(&raw).map_err(|e| Error::ParseError(e.to_string()))?;

    let mut collections = state.collections.write().await;
    if let Some(tokens) = snapshot.tokens {
        collections.tokens = tokens;
    }
    if let Some(wallets) = snapshot.wallets {
        collections.wallets = wallets;
    }
    if let Some(wall) = snapshot.wallet_wall {
        collections.wallet_wall = wall;
    }

    info!("Snapshot imported from {} (view only)", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackr_core::{Token, Wallet};

    fn test_state(dir: &Path) -> AppState {
        AppState::new(dir.to_path_buf(), &[7u8; 32], "http://localhost:54321", "k").unwrap()
    }

    fn token(id: &str) -> Token {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "DOGE",
            "dateAdded": "2026-08-01T10:00:00+00:00",
            "network": "Solana",
        }))
        .unwrap()
    }

    fn wallet(id: &str) -> Wallet {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "address": format!("addr-{}", id),
            "dateAdded": "2026-08-01T10:00:00+00:00",
            "network": "Base",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let dir = std::env::temp_dir().join(format!("trackr-backup-test-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let source = test_state(&dir);
        {
            let mut collections = source.collections.write().await;
            collections.tokens = vec![token("t1"), token("t2")];
            collections.wallets = vec![wallet("w1")];
            collections.wallet_wall = vec![wallet("ww1")];
        }
        let path = export_snapshot(&source, &dir).await.unwrap();

        let target = test_state(&dir);
        import_snapshot(&target, &path).await.unwrap();

        let restored = target.collections.read().await;
        assert_eq!(restored.tokens.len(), 2);
        assert_eq!(restored.tokens[0].id, "t1");
        assert_eq!(restored.wallets[0].id, "w1");
        assert_eq!(restored.wallet_wall[0].id, "ww1");
        drop(restored);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_import_malformed_json_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("trackr-badjson-test-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("broken.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let state = test_state(&dir);
        let err = import_snapshot(&state, &path).await.unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
