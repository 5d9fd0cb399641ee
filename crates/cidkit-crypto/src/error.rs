use thiserror::Error;

/// Failures of the secret cipher.
///
/// A wrong passphrase and a tampered token both surface as `InvalidKey`.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("encryption key must not be empty")]
    EmptyKey,

    #[error("malformed secret token: {0}")]
    MalformedPayload(String),

    #[error("secret decryption failed: invalid key or corrupted token")]
    InvalidKey,
}

pub type Result<T> = std::result::Result<T, SecretError>;
