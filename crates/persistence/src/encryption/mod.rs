//! AES-256-GCM encryption for saved refresh tokens
//!
//! The key is machine-bound: Argon2id over the machine id and hostname
//! with an application salt, so a copied database is useless elsewhere.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::Argon2;
use rand::RngCore;
use trackr_core::{Error, Result};

/// Encrypted secret with the IV needed for decryption
#[derive(Debug, Clone)]
pub struct EncryptedSecret {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; 12],
}

/// Handles AES-256-GCM encryption/decryption of saved session secrets
pub struct SessionEncryptor {
    cipher: Aes256Gcm,
}

impl SessionEncryptor {
    /// Create a new encryptor from a 32-byte key
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.len() != 32 {
            return Err(Error::EncryptionError(format!(
                "Key must be 32 bytes, got {}",
                key.len()
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| Error::EncryptionError(e.to_string()))?;

        Ok(Self { cipher })
    }

    /// Create an encryptor from a passphrase (Argon2id derivation)
    pub fn from_password(password: &str) -> Result<Self> {
        let key = derive_key_from_password(password, b"crypto-trackr-salt-v1")?;
        Self::new(&key)
    }

    /// Encrypt a plaintext secret with a fresh random IV
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret> {
        let mut iv = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut iv);
        let nonce = Nonce::from_slice(&iv);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| Error::EncryptionError(e.to_string()))?;

        Ok(EncryptedSecret { ciphertext, iv })
    }

    /// Decrypt an encrypted secret
    pub fn decrypt(&self, encrypted: &EncryptedSecret) -> Result<String> {
        let nonce = Nonce::from_slice(&encrypted.iv);

        let plaintext = self
            .cipher
            .decrypt(nonce, encrypted.ciphertext.as_ref())
            .map_err(|e| Error::EncryptionError(e.to_string()))?;

        String::from_utf8(plaintext).map_err(|e| Error::EncryptionError(e.to_string()))
    }
}

// ─── Machine-bound key derivation ────────────────────────────────────

/// Derive a 32-byte AES key from a passphrase using Argon2id
fn derive_key_from_password(password: &str, salt: &[u8]) -> Result<[u8; 32]> {
    let mut key = [0u8; 32];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| Error::EncryptionError(format!("Argon2 key derivation failed: {}", e)))?;
    Ok(key)
}

/// Machine-unique fingerprint: machine id plus hostname fallback entropy
fn machine_fingerprint() -> String {
    let machine_id =
        machine_uid::get().unwrap_or_else(|_| "fallback-no-machine-id".to_string());

    let hostname = std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .unwrap_or_else(|_| "unknown-host".to_string());

    format!("trackr-{}-{}", machine_id, hostname)
}

/// Derive the AES key bound to this machine. Stable across calls on one
/// machine, different on another.
pub fn derive_machine_key() -> Result<[u8; 32]> {
    let fingerprint = machine_fingerprint();
    derive_key_from_password(&fingerprint, b"crypto-trackr-v1-machine-salt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let encryptor = SessionEncryptor::from_password("test_password_123").unwrap();
        let original = "v2.aBcDeFgHiJkLmNoPqRsTuVwXyZ012345.refresh-token-value";

        let encrypted = encryptor.encrypt(original).unwrap();
        let decrypted = encryptor.decrypt(&encrypted).unwrap();

        assert_eq!(original, decrypted);
    }

    #[test]
    fn test_unique_iv_per_encryption() {
        let encryptor = SessionEncryptor::from_password("test_password").unwrap();
        let secret = "refresh_token";

        let encrypted1 = encryptor.encrypt(secret).unwrap();
        let encrypted2 = encryptor.encrypt(secret).unwrap();

        assert_ne!(encrypted1.iv, encrypted2.iv);
        assert_ne!(encrypted1.ciphertext, encrypted2.ciphertext);
    }

    #[test]
    fn test_wrong_key_fails() {
        let encryptor1 = SessionEncryptor::from_password("password1").unwrap();
        let encryptor2 = SessionEncryptor::from_password("password2").unwrap();

        let encrypted = encryptor1.encrypt("secret_token").unwrap();
        assert!(encryptor2.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_invalid_key_length() {
        let short_key = [0u8; 16];
        assert!(SessionEncryptor::new(&short_key).is_err());
    }

    #[test]
    fn test_derive_machine_key_is_stable() {
        let key1 = derive_machine_key().unwrap();
        let key2 = derive_machine_key().unwrap();
        assert_eq!(key1, key2);
        assert!(key1.iter().any(|&b| b != 0));
    }
}
