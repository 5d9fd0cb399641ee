//! Authenticated encryption of single secret strings
//!
//! Used when secret values leave the store in portable exports. Every call to
//! `encrypt` draws a fresh IV, so the same plaintext never produces the same
//! token twice.

use base64::alphabet::URL_SAFE;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::SecretString;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{Result, SecretError};
use crate::keys::KeyMaterial;
use crate::keystream::apply_keystream;
use crate::{IV_SIZE, MAC_SIZE, MIN_TOKEN_BYTES};

type HmacSha256 = Hmac<Sha256>;

/// base64url with padding on output; padded and unpadded tokens both decode.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A cipher bound to one passphrase.
///
/// Derives the key material once, so encrypting many values for one export
/// hashes the passphrase a single time.
#[derive(Debug, Clone)]
pub struct SecretCipher {
    key: KeyMaterial,
}

impl SecretCipher {
    pub fn new(passphrase: &SecretString) -> Result<Self> {
        Ok(Self {
            key: KeyMaterial::from_secret(passphrase)?,
        })
    }

    pub fn from_passphrase(passphrase: &str) -> Result<Self> {
        Ok(Self {
            key: KeyMaterial::derive(passphrase)?,
        })
    }

    /// Encrypt `plaintext` into a base64url token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut iv = [0u8; IV_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let mut sealed = Vec::with_capacity(IV_SIZE + plaintext.len() + MAC_SIZE);
        sealed.extend_from_slice(&iv);
        sealed.extend_from_slice(plaintext.as_bytes());
        apply_keystream(&self.key, &iv, &mut sealed[IV_SIZE..])?;

        let tag = self.mac(&sealed)?.finalize().into_bytes();
        sealed.extend_from_slice(&tag);

        Ok(TOKEN_ENGINE.encode(&sealed))
    }

    /// Verify and decrypt a token produced by [`SecretCipher::encrypt`].
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let mut sealed = TOKEN_ENGINE
            .decode(token.trim())
            .map_err(|e| SecretError::MalformedPayload(format!("token is not base64url: {e}")))?;

        if sealed.len() < MIN_TOKEN_BYTES {
            return Err(SecretError::MalformedPayload(format!(
                "token too short: {} bytes (minimum {MIN_TOKEN_BYTES})",
                sealed.len()
            )));
        }

        let tag_start = sealed.len() - MAC_SIZE;
        let (authenticated, tag) = sealed.split_at(tag_start);

        // Constant-time comparison; nothing touches the ciphertext before this.
        self.mac(authenticated)?
            .verify_slice(tag)
            .map_err(|_| SecretError::InvalidKey)?;

        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&sealed[..IV_SIZE]);
        sealed.truncate(tag_start);
        let mut plaintext = sealed.split_off(IV_SIZE);
        apply_keystream(&self.key, &iv, &mut plaintext)?;

        String::from_utf8(plaintext).map_err(|e| {
            e.into_bytes().zeroize();
            SecretError::MalformedPayload("decrypted secret is not valid UTF-8".into())
        })
    }

    fn mac(&self, data: &[u8]) -> Result<HmacSha256> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.key.as_bytes())
            .map_err(|_| SecretError::InvalidKey)?;
        mac.update(data);
        Ok(mac)
    }
}

/// Encrypt `plaintext` under `key`.
pub fn encrypt_secret(plaintext: &str, key: &str) -> Result<String> {
    SecretCipher::from_passphrase(key)?.encrypt(plaintext)
}

/// Decrypt a token produced by [`encrypt_secret`] with the same `key`.
pub fn decrypt_secret(token: &str, key: &str) -> Result<String> {
    SecretCipher::from_passphrase(key)?.decrypt(token)
}
