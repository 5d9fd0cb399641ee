//! SHA-256 counter-mode keystream
//!
//! Block `i` is `SHA-256(key_material || iv || i as u32 big-endian)`. The
//! stream is truncated to the message length; identical inputs always give an
//! identical stream.

use sha2::{Digest, Sha256};

use crate::error::{Result, SecretError};
use crate::keys::KeyMaterial;
use crate::IV_SIZE;

/// Bytes produced per counter value
pub const BLOCK_SIZE: usize = 32;

/// Longest message the 32-bit counter can cover.
pub const MAX_STREAM_LEN: u64 = (u32::MAX as u64 + 1) * BLOCK_SIZE as u64;

/// XOR `data` in place with the keystream for `(key, iv)`.
///
/// Encryption and decryption are the same operation.
pub fn apply_keystream(key: &KeyMaterial, iv: &[u8; IV_SIZE], data: &mut [u8]) -> Result<()> {
    if data.len() as u64 > MAX_STREAM_LEN {
        return Err(SecretError::MalformedPayload(format!(
            "{} bytes exceeds the keystream limit of {MAX_STREAM_LEN}",
            data.len()
        )));
    }

    for (chunk, counter) in data.chunks_mut(BLOCK_SIZE).zip(0u32..) {
        let block = Sha256::new()
            .chain_update(key.as_bytes())
            .chain_update(iv)
            .chain_update(counter.to_be_bytes())
            .finalize();
        for (byte, pad) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= pad;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(key: &KeyMaterial, iv: &[u8; IV_SIZE], len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        apply_keystream(key, iv, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_block_layout() {
        let key = KeyMaterial::derive("layout").unwrap();
        let iv = [7u8; IV_SIZE];
        let ks = stream(&key, &iv, 70);

        for (i, chunk) in ks.chunks(BLOCK_SIZE).enumerate() {
            let mut input = Vec::new();
            input.extend_from_slice(key.as_bytes());
            input.extend_from_slice(&iv);
            input.extend_from_slice(&(i as u32).to_be_bytes());
            let expected = Sha256::digest(&input);
            assert_eq!(chunk, &expected[..chunk.len()], "block {i}");
        }
    }

    #[test]
    fn test_prefix_stable_across_lengths() {
        let key = KeyMaterial::derive("prefix").unwrap();
        let iv = [1u8; IV_SIZE];
        let short = stream(&key, &iv, 10);
        let long = stream(&key, &iv, 100);
        assert_eq!(short, long[..10]);
    }

    #[test]
    fn test_iv_changes_stream() {
        let key = KeyMaterial::derive("iv").unwrap();
        assert_ne!(
            stream(&key, &[0u8; IV_SIZE], 32),
            stream(&key, &[1u8; IV_SIZE], 32)
        );
    }

    #[test]
    fn test_xor_is_involution() {
        let key = KeyMaterial::derive("twice").unwrap();
        let iv = [9u8; IV_SIZE];
        let original = b"attack at dawn, or maybe a little later".to_vec();

        let mut data = original.clone();
        apply_keystream(&key, &iv, &mut data).unwrap();
        assert_ne!(data, original);
        apply_keystream(&key, &iv, &mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn test_empty_message() {
        let key = KeyMaterial::derive("empty").unwrap();
        let mut data: [u8; 0] = [];
        apply_keystream(&key, &[0u8; IV_SIZE], &mut data).unwrap();
    }
}
