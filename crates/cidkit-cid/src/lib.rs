//! cidkit-cid: self-describing content identifiers
//!
//! A CID is `base64url(6-byte big-endian length) ++ base64url(payload)` with no
//! separator and no padding. Content up to [`DIRECT_CONTENT_EMBED_LIMIT`]
//! bytes is embedded directly ("literal" CID); anything larger is referenced
//! by its SHA-512 digest ("hashed" CID).
//!
//! ```text
//! ""              -> AAAAAAAA
//! "abcd"          -> AAAAAAAE YWJjZA
//! 100 x "x"       -> AAAAAABk <86 chars of SHA-512>
//! ```
//!
//! # Overview
//! - `codec`: generate and parse CID strings
//! - `validate`: strict and cheap validation predicates, literal extraction
//! - `path`: URL path / component helpers used by routing code
//! - `cid`: the [`Cid`] value type
//! - `scan`: locate CID references in free text

pub mod cid;
pub mod codec;
pub mod error;
pub mod path;
pub mod scan;
pub mod validate;

pub use cid::Cid;
pub use codec::{
    decode_cid_length, encode_cid_length, generate, generate_from_reader, parse, CidParts,
};
pub use error::{CidError, Result};
pub use path::{normalize_component, split_cid_path, CidPath};
pub use scan::{find_cid_candidates, find_cid_references, CidReference};
pub use validate::{
    extract_literal_content, is_literal_cid, is_normalized_cid, is_probable_cid_component,
    is_strict_cid_candidate,
};

/// Content up to this many bytes is embedded in the CID itself.
pub const DIRECT_CONTENT_EMBED_LIMIT: usize = 64;

/// Width of the big-endian length field, in bytes.
pub const CID_LENGTH_PREFIX_BYTES: usize = 6;

/// Width of the encoded length field, in base64url characters.
pub const CID_LENGTH_PREFIX_CHARS: usize = 8;

/// Largest content length representable in the 6-byte prefix.
pub const MAX_CONTENT_LENGTH: u64 = (1 << 48) - 1;

/// SHA-512 digest size in bytes.
pub const DIGEST_SIZE: usize = 64;

/// Encoded length of a hashed payload (64 bytes, unpadded base64url).
pub const CID_DIGEST_CHARS: usize = 86;

/// Shortest valid CID: the empty-content case.
pub const CID_MIN_LENGTH: usize = CID_LENGTH_PREFIX_CHARS;

/// Longest valid CID.
pub const CID_LENGTH: usize = CID_LENGTH_PREFIX_CHARS + CID_DIGEST_CHARS;
