//! cidkit-crypto: passphrase encryption for exported secret values
//!
//! Token format (base64url, padded):
//! ```text
//! [16 bytes: random IV][N bytes: ciphertext][32 bytes: HMAC-SHA256 tag]
//! ```
//!
//! Key derivation and stream:
//! ```text
//! key_material = SHA-256(passphrase)
//! keystream    = SHA-256(key_material || iv || 0u32be) || SHA-256(... || 1u32be) || ...
//! ciphertext   = plaintext XOR keystream[..N]
//! tag          = HMAC-SHA256(key_material, iv || ciphertext)
//! ```
//!
//! The tag is verified in constant time before the keystream is generated.

pub mod error;
pub mod keys;
pub mod keystream;
pub mod secret;

pub use error::SecretError;
pub use keys::KeyMaterial;
pub use secret::{decrypt_secret, encrypt_secret, SecretCipher};

/// Size of the derived key material (SHA-256 output)
pub const KEY_SIZE: usize = 32;

/// Size of the per-token random IV
pub const IV_SIZE: usize = 16;

/// Size of the HMAC-SHA256 tag
pub const MAC_SIZE: usize = 32;

/// Smallest decodable token: empty ciphertext
pub const MIN_TOKEN_BYTES: usize = IV_SIZE + MAC_SIZE;
