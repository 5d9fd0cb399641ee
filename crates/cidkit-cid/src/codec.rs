//! CID generation and parsing
//!
//! Generation is deterministic: identical content always yields an identical
//! CID string, which is what lets external stores deduplicate by key.

use std::io::Read;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha512};

use crate::error::{CidError, Result};
use crate::{
    CID_LENGTH_PREFIX_BYTES, CID_LENGTH_PREFIX_CHARS, CID_MIN_LENGTH, DIRECT_CONTENT_EMBED_LIMIT,
    MAX_CONTENT_LENGTH,
};

/// The two logical fields of a decoded CID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidParts {
    /// Byte length of the original content
    pub content_length: u64,
    /// Embedded content (literal CIDs) or SHA-512 digest (hashed CIDs)
    pub payload: Vec<u8>,
}

impl CidParts {
    /// Whether the encoded length puts this CID in the literal range.
    pub fn is_literal(&self) -> bool {
        self.content_length <= DIRECT_CONTENT_EMBED_LIMIT as u64
    }
}

/// Encode a content length as the 8-character CID prefix.
pub fn encode_cid_length(length: u64) -> Result<String> {
    if length > MAX_CONTENT_LENGTH {
        return Err(CidError::LengthOverflow(length));
    }
    // Drop the two high bytes of the u64; the range check above keeps them zero.
    let bytes = length.to_be_bytes();
    Ok(URL_SAFE_NO_PAD.encode(&bytes[8 - CID_LENGTH_PREFIX_BYTES..]))
}

/// Decode an 8-character CID prefix back into a content length.
pub fn decode_cid_length(prefix: &str) -> Result<u64> {
    if prefix.len() != CID_LENGTH_PREFIX_CHARS {
        return Err(CidError::InvalidFormat(format!(
            "length prefix must be {CID_LENGTH_PREFIX_CHARS} characters, got {}",
            prefix.len()
        )));
    }
    let decoded = URL_SAFE_NO_PAD
        .decode(prefix)
        .map_err(|e| CidError::InvalidFormat(format!("length prefix is not base64url: {e}")))?;

    let mut bytes = [0u8; 8];
    bytes[8 - CID_LENGTH_PREFIX_BYTES..].copy_from_slice(&decoded);
    Ok(u64::from_be_bytes(bytes))
}

/// Generate the CID for a byte slice.
pub fn generate(content: &[u8]) -> Result<String> {
    let length = content.len() as u64;
    let mut cid = encode_cid_length(length)?;
    if content.len() <= DIRECT_CONTENT_EMBED_LIMIT {
        URL_SAFE_NO_PAD.encode_string(content, &mut cid);
    } else {
        URL_SAFE_NO_PAD.encode_string(Sha512::digest(content), &mut cid);
    }
    Ok(cid)
}

/// Generate the CID for everything `reader` yields.
///
/// Only the first `DIRECT_CONTENT_EMBED_LIMIT + 1` bytes are buffered; the
/// rest is streamed through the hasher. The result equals
/// `generate(&all_bytes)`.
pub fn generate_from_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut head = Vec::with_capacity(DIRECT_CONTENT_EMBED_LIMIT + 1);
    reader
        .by_ref()
        .take(DIRECT_CONTENT_EMBED_LIMIT as u64 + 1)
        .read_to_end(&mut head)?;

    if head.len() <= DIRECT_CONTENT_EMBED_LIMIT {
        return generate(&head);
    }

    let mut hasher = Sha512::new();
    hasher.update(&head);
    let rest = std::io::copy(&mut reader, &mut hasher)?;
    let length = head.len() as u64 + rest;

    let mut cid = encode_cid_length(length)?;
    URL_SAFE_NO_PAD.encode_string(hasher.finalize(), &mut cid);
    Ok(cid)
}

/// Remove URL context around a CID: `#fragment`, `?query`, one leading `/`,
/// and a trailing `.extension`.
pub(crate) fn strip_url_wrapping(value: &str) -> &str {
    let value = value.split('#').next().unwrap_or_default();
    let value = value.split('?').next().unwrap_or_default();
    let value = value.strip_prefix('/').unwrap_or(value);
    value.split('.').next().unwrap_or_default()
}

/// Parse a CID string into its length and payload.
///
/// URL wrapping (leading `/`, extension, query, fragment) is tolerated. The
/// payload length is not checked against the literal/hashed convention; use
/// [`crate::is_normalized_cid`] for that.
pub fn parse(cid: &str) -> Result<CidParts> {
    let body = strip_url_wrapping(cid);
    if body.len() < CID_MIN_LENGTH {
        return Err(CidError::InvalidFormat(format!(
            "CID must be at least {CID_MIN_LENGTH} characters, got {}",
            body.len()
        )));
    }
    if !body.is_char_boundary(CID_LENGTH_PREFIX_CHARS) {
        return Err(CidError::InvalidFormat(
            "length prefix contains non-ASCII characters".into(),
        ));
    }

    let (prefix, encoded_payload) = body.split_at(CID_LENGTH_PREFIX_CHARS);
    let content_length = decode_cid_length(prefix)?;
    let payload = URL_SAFE_NO_PAD
        .decode(encoded_payload)
        .map_err(|e| CidError::InvalidFormat(format!("payload is not base64url: {e}")))?;

    Ok(CidParts {
        content_length,
        payload,
    })
}
