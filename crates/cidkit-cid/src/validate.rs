//! Validation predicates
//!
//! Two tiers: cheap shape filters ([`is_probable_cid_component`],
//! [`is_strict_cid_candidate`]) that never decode and never reject a real
//! CID, and the authoritative [`is_normalized_cid`] check that decodes and
//! enforces payload/length consistency.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::codec::parse;
use crate::{CID_LENGTH, CID_LENGTH_PREFIX_CHARS, CID_MIN_LENGTH, DIGEST_SIZE, DIRECT_CONTENT_EMBED_LIMIT};

/// `A-Z a-z 0-9 - _`
pub(crate) fn is_base64url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// True iff `candidate` is exactly a canonical CID string.
///
/// No URL wrapping is tolerated here: a leading `/` or an extension makes the
/// candidate non-normalized.
pub fn is_normalized_cid(candidate: &str) -> bool {
    if candidate.len() < CID_MIN_LENGTH || candidate.len() > CID_LENGTH {
        return false;
    }
    if !candidate.chars().all(is_base64url_char) {
        return false;
    }
    let Ok(parts) = parse(candidate) else {
        return false;
    };

    let expected_payload = if parts.is_literal() {
        parts.content_length as usize
    } else {
        DIGEST_SIZE
    };
    if parts.payload.len() != expected_payload {
        return false;
    }

    // Canonical base64url only: re-encoding must reproduce the input.
    URL_SAFE_NO_PAD.encode(&parts.payload) == candidate[CID_LENGTH_PREFIX_CHARS..]
}

/// Cheap filter for a path component that may be a CID with an extension.
///
/// Checks the character set and that the part before the first `.` is long
/// enough to hold a length prefix. May return true for non-CIDs.
pub fn is_probable_cid_component(s: &str) -> bool {
    let (body, extension) = match s.split_once('.') {
        Some((body, extension)) => (body, Some(extension)),
        None => (s, None),
    };
    if body.len() < CID_MIN_LENGTH || !body.chars().all(is_base64url_char) {
        return false;
    }
    extension.map_or(true, |ext| {
        ext.chars().all(|c| is_base64url_char(c) || c == '.')
    })
}

/// Stricter filter for an already extension-stripped candidate.
///
/// Rejects any `.`, anything outside the base64url alphabet, and anything
/// outside the valid CID length range. Still does not decode.
pub fn is_strict_cid_candidate(s: &str) -> bool {
    (CID_MIN_LENGTH..=CID_LENGTH).contains(&s.len()) && s.chars().all(is_base64url_char)
}

/// True iff `cid` parses and encodes a length within the embed limit.
///
/// A leading `/` is accepted.
pub fn is_literal_cid(cid: &str) -> bool {
    parse(cid).is_ok_and(|parts| parts.content_length <= DIRECT_CONTENT_EMBED_LIMIT as u64)
}

/// Return the content embedded in a literal CID without any store lookup.
///
/// `None` for hashed CIDs and for malformed ones, including literal CIDs whose
/// payload does not match the encoded length.
pub fn extract_literal_content(cid: &str) -> Option<Vec<u8>> {
    let parts = parse(cid).ok()?;
    if !parts.is_literal() || parts.payload.len() as u64 != parts.content_length {
        return None;
    }
    Some(parts.payload)
}
