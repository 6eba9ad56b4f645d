// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Encrypted storage — age (X25519) sealing of secrets written to the local
// store.  The device key lives in its own file next to the database so a
// copied database alone does not reveal the session token.

use std::io::{Read, Write};
use std::path::Path;

use age::secrecy::ExposeSecret;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pandi_core::error::{PandiError, Result};
use tracing::{debug, info, instrument};

/// Device-local X25519 identity used to seal and unseal stored secrets.
pub struct EncryptedStorage {
    identity: age::x25519::Identity,
}

impl EncryptedStorage {
    /// Create a storage handle with a fresh random key.
    pub fn generate() -> Self {
        Self {
            identity: age::x25519::Identity::generate(),
        }
    }

    /// Parse an `AGE-SECRET-KEY-1…` string.
    pub fn from_key(key: &str) -> Result<Self> {
        let identity = key
            .trim()
            .parse::<age::x25519::Identity>()
            .map_err(|e| PandiError::Decryption(format!("bad device key: {e}")))?;
        Ok(Self { identity })
    }

    /// Load the device key at `path`, creating it on first use.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let key = std::fs::read_to_string(path)?;
            debug!("device key loaded");
            return Self::from_key(&key);
        }

        let storage = Self::generate();
        std::fs::write(path, storage.identity.to_string().expose_secret())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        info!("device key created");
        Ok(storage)
    }

    /// Encrypt `plaintext` and return a complete age file.
    #[instrument(skip_all, fields(plaintext_len = plaintext.len()))]
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let recipient = self.identity.to_public();
        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
                .map_err(|e| PandiError::Encryption(e.to_string()))?;

        let mut ciphertext = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut ciphertext)
            .map_err(|e| PandiError::Encryption(e.to_string()))?;
        writer
            .write_all(plaintext)
            .map_err(|e| PandiError::Encryption(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| PandiError::Encryption(e.to_string()))?;

        debug!(ciphertext_len = ciphertext.len(), "encryption complete");
        Ok(ciphertext)
    }

    /// Decrypt a complete age file produced by [`encrypt`](Self::encrypt).
    #[instrument(skip_all, fields(ciphertext_len = ciphertext.len()))]
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let decryptor = age::Decryptor::new(ciphertext)
            .map_err(|e| PandiError::Decryption(e.to_string()))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(&self.identity as &dyn age::Identity))
            .map_err(|e| PandiError::Decryption(e.to_string()))?;

        let mut plaintext = Vec::new();
        reader
            .read_to_end(&mut plaintext)
            .map_err(|e| PandiError::Decryption(e.to_string()))?;

        debug!(plaintext_len = plaintext.len(), "decryption complete");
        Ok(plaintext)
    }

    /// Encrypt a string into base64 text suitable for the key/value store.
    pub fn seal(&self, secret: &str) -> Result<String> {
        Ok(STANDARD.encode(self.encrypt(secret.as_bytes())?))
    }

    /// Inverse of [`seal`](Self::seal).
    pub fn unseal(&self, sealed: &str) -> Result<String> {
        let bytes = STANDARD
            .decode(sealed.trim())
            .map_err(|e| PandiError::Decryption(format!("not sealed data: {e}")))?;
        String::from_utf8(self.decrypt(&bytes)?)
            .map_err(|e| PandiError::Decryption(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_round_trip() {
        let storage = EncryptedStorage::generate();
        let sealed = storage.seal("header.payload.signature").expect("seal");
        assert!(!sealed.contains("payload"));
        assert_eq!(storage.unseal(&sealed).expect("unseal"), "header.payload.signature");
    }

    #[test]
    fn other_key_cannot_unseal() {
        let sealed = EncryptedStorage::generate().seal("secret").expect("seal");
        let result = EncryptedStorage::generate().unseal(&sealed);
        assert!(matches!(result, Err(PandiError::Decryption(_))));
    }

    #[test]
    fn plaintext_is_not_mistaken_for_sealed_data() {
        let storage = EncryptedStorage::generate();
        assert!(storage.unseal("eyJhbGciOiJIUzI1NiJ9.e30.sig").is_err());
    }

    #[test]
    fn device_key_is_created_once_and_reused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.key");

        let first = EncryptedStorage::load_or_create(&path).expect("create");
        let sealed = first.seal("token").expect("seal");

        let second = EncryptedStorage::load_or_create(&path).expect("load");
        assert_eq!(second.unseal(&sealed).expect("unseal"), "token");
    }
}
