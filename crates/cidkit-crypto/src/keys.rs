//! Key material: SHA-256 of the passphrase

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{Result, SecretError};
use crate::KEY_SIZE;

/// 256-bit key derived from a passphrase. Zeroized on drop.
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: [u8; KEY_SIZE],
}

impl KeyMaterial {
    /// Hash a passphrase into key material. Empty passphrases are rejected.
    pub fn derive(passphrase: &str) -> Result<Self> {
        if passphrase.is_empty() {
            return Err(SecretError::EmptyKey);
        }
        Ok(Self {
            bytes: Sha256::digest(passphrase.as_bytes()).into(),
        })
    }

    /// Same as [`KeyMaterial::derive`] for a passphrase held in a `SecretString`.
    pub fn from_secret(passphrase: &SecretString) -> Result<Self> {
        Self::derive(passphrase.expose_secret())
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
