//! The `Cid` value type
//!
//! Holds the normalized string form. Equality, ordering, and hashing all use
//! that string, so two references differing only by leading `/`, extension,
//! query, or fragment compare equal once parsed.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{self, strip_url_wrapping, CidParts};
use crate::error::{CidError, Result};
use crate::validate::{extract_literal_content, is_normalized_cid};
use crate::DIRECT_CONTENT_EMBED_LIMIT;

/// CID of zero-length content.
const EMPTY_CID: &str = "AAAAAAAA";

/// A validated, normalized content identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cid(String);

impl Cid {
    /// Address `content`.
    pub fn from_content(content: &[u8]) -> Result<Self> {
        codec::generate(content).map(Self)
    }

    /// Address everything `reader` yields, streaming large inputs.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        codec::generate_from_reader(reader).map(Self)
    }

    /// The CID of empty content, `AAAAAAAA`.
    pub fn empty() -> Self {
        Self(EMPTY_CID.to_string())
    }

    /// Parse a CID reference, tolerating URL wrapping.
    ///
    /// The bare identifier left after stripping must be normalized.
    pub fn parse(value: &str) -> Result<Self> {
        let body = strip_url_wrapping(value.trim());
        if !is_normalized_cid(body) {
            return Err(CidError::InvalidFormat(format!(
                "not a normalized CID: {value:?}"
            )));
        }
        Ok(Self(body.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decoded length and payload.
    pub fn parts(&self) -> CidParts {
        // A normalized CID always parses.
        codec::parse(&self.0).unwrap_or(CidParts {
            content_length: 0,
            payload: Vec::new(),
        })
    }

    /// Byte length of the addressed content.
    pub fn content_length(&self) -> u64 {
        self.parts().content_length
    }

    pub fn is_literal(&self) -> bool {
        self.content_length() <= DIRECT_CONTENT_EMBED_LIMIT as u64
    }

    /// Embedded content for literal CIDs; `None` when a store lookup is needed.
    pub fn literal_content(&self) -> Option<Vec<u8>> {
        extract_literal_content(&self.0)
    }

    /// Embedded content or SHA-512 digest.
    pub fn payload(&self) -> Vec<u8> {
        self.parts().payload
    }

    /// `/<cid>` with an optional `.ext` suffix, for building links.
    pub fn to_path(&self, extension: Option<&str>) -> String {
        match extension.map(|e| e.trim_start_matches('.')) {
            Some(ext) if !ext.is_empty() => format!("/{}.{ext}", self.0),
            _ => format!("/{}", self.0),
        }
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cid {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn empty_cid_is_stable() {
        assert_eq!(Cid::empty(), Cid::from_content(b"").unwrap());
        assert_eq!(Cid::empty().as_str(), "AAAAAAAA");
        assert_eq!(Cid::empty().content_length(), 0);
        assert_eq!(Cid::empty().literal_content(), Some(Vec::new()));
    }

    #[test]
    fn extension_is_not_identity() {
        let cid = Cid::from_content(b"hello world").unwrap();
        let a: Cid = format!("/{cid}.txt").parse().unwrap();
        let b: Cid = format!("{cid}.md?raw#x").parse().unwrap();
        assert_eq!(a, cid);
        assert_eq!(b, cid);

        let set: HashSet<Cid> = [a, b, cid].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn parse_rejects_inconsistent_cid() {
        assert!(Cid::parse("AAAAAAAEYWJj").is_err());
        assert!(Cid::parse("/servers/AAAAAAAA").is_err());
        assert!(Cid::parse("").is_err());
    }

    #[test]
    fn literal_and_hashed_accessors() {
        let small = Cid::from_content(b"abcd").unwrap();
        assert!(small.is_literal());
        assert_eq!(small.content_length(), 4);
        assert_eq!(small.payload(), b"abcd");
        assert_eq!(small.literal_content().unwrap(), b"abcd");

        let large = Cid::from_content(&[b'x'; 100]).unwrap();
        assert!(!large.is_literal());
        assert_eq!(large.content_length(), 100);
        assert_eq!(large.payload().len(), crate::DIGEST_SIZE);
        assert!(large.literal_content().is_none());
    }

    #[test]
    fn reader_and_slice_agree() {
        let data = vec![0x5Au8; 10_000];
        let from_reader = Cid::from_reader(data.as_slice()).unwrap();
        assert_eq!(from_reader, Cid::from_content(&data).unwrap());
    }

    #[test]
    fn to_path_formats() {
        let cid = Cid::empty();
        assert_eq!(cid.to_path(None), "/AAAAAAAA");
        assert_eq!(cid.to_path(Some("txt")), "/AAAAAAAA.txt");
        assert_eq!(cid.to_path(Some(".json")), "/AAAAAAAA.json");
        assert_eq!(cid.to_path(Some("")), "/AAAAAAAA");
    }

    #[test]
    fn serde_as_plain_string() {
        let cid = Cid::from_content(b"serde").unwrap();
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(json, format!("\"{cid}\""));

        let back: Cid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cid);

        let bad: std::result::Result<Cid, _> = serde_json::from_str("\"AAAAAAAEYWJj\"");
        assert!(bad.is_err());
    }
}
